//! Encoder configuration

use serde::{Deserialize, Serialize};

use crate::{AbiError, AbiResult};

/// Limits applied while classifying types and encoding values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderConfig {
    /// Maximum nesting of arrays and tuples
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    32
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl EncoderConfig {
    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject configurations that would refuse every input
    pub fn validate(&self) -> AbiResult<()> {
        if self.max_depth == 0 {
            return Err(AbiError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
