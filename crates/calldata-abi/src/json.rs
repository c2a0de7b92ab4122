//! JSON ABI parsing
//!
//! Reads the standard compiler output (an array of function, constructor,
//! receive, event and error entries) into an [`Interface`].

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::interface::{
    ErrorDef, EventDef, EventParam, FunctionDef, FunctionKind, Interface, Param, StateMutability,
};
use crate::{AbiError, AbiResult, EncoderConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryType {
    #[default]
    Function,
    Constructor,
    Receive,
    Fallback,
    Event,
    Error,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    #[serde(rename = "type", default)]
    entry_type: EntryType,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<EventParam>,
    #[serde(default)]
    outputs: Vec<Param>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    payable: Option<bool>,
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    anonymous: bool,
}

impl JsonEntry {
    fn into_function(self, kind: FunctionKind, config: &EncoderConfig) -> AbiResult<FunctionDef> {
        let state_mutability = self.state_mutability.ok_or_else(|| {
            AbiError::Parse(format!(
                "stateMutability is required for {}",
                describe(&self.name, kind)
            ))
        })?;
        let inputs = self.inputs.into_iter().map(|p| p.param).collect();
        let function = FunctionDef::with_config(kind, self.name, inputs, state_mutability, config)?;
        // Legacy flags win when present, otherwise they follow stateMutability
        let payable = self.payable.unwrap_or(function.is_payable());
        let constant = self.constant.unwrap_or(function.is_constant());
        Ok(function
            .with_outputs(self.outputs)
            .with_legacy_flags(payable, constant))
    }
}

fn describe(name: &str, kind: FunctionKind) -> String {
    match kind {
        FunctionKind::Function => format!("function {}", name),
        FunctionKind::Constructor => "constructor".to_string(),
        FunctionKind::Receive => "receive".to_string(),
    }
}

impl Interface {
    /// Parse a JSON ABI with the default limits
    pub fn from_json(json: &str) -> AbiResult<Self> {
        Self::from_json_with_config(json, EncoderConfig::default())
    }

    /// Parse a JSON ABI, classifying and encoding under `config`
    pub fn from_json_with_config(json: &str, config: EncoderConfig) -> AbiResult<Self> {
        config.validate()?;
        let entries: Vec<JsonEntry> = serde_json::from_str(json)?;

        let mut builder = Interface::builder().config(config.clone());
        for entry in entries {
            builder = match entry.entry_type {
                EntryType::Function => {
                    builder.function(entry.into_function(FunctionKind::Function, &config)?)
                }
                EntryType::Constructor => {
                    builder.function(entry.into_function(FunctionKind::Constructor, &config)?)
                }
                EntryType::Receive => {
                    builder.function(entry.into_function(FunctionKind::Receive, &config)?)
                }
                EntryType::Event => builder.event(EventDef::with_config(
                    entry.name,
                    entry.inputs,
                    entry.anonymous,
                    &config,
                )?),
                EntryType::Error => {
                    let inputs = entry.inputs.into_iter().map(|p| p.param).collect();
                    builder.error(ErrorDef::with_config(entry.name, inputs, &config)?)
                }
                EntryType::Fallback => {
                    debug!("skipping fallback entry");
                    builder
                }
            };
        }
        builder.build()
    }
}

impl FromStr for Interface {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}
