//! Function selectors and signatures
//!
//! Signatures are always built from canonical type names (`uint` becomes
//! `uint256`, tuples become `(..)`), never from the declared strings.

use calldata_crypto::keccak256;
use calldata_primitives::H256;

use crate::ParamType;

/// First 4 bytes of the Keccak-256 hash of a function signature
pub type Selector = [u8; 4];

/// Canonical signature, e.g. `transfer(address,uint256)`
pub fn signature(name: &str, types: &[ParamType]) -> String {
    let types: Vec<String> = types.iter().map(ParamType::to_string).collect();
    format!("{}({})", name, types.join(","))
}

/// Selector of `name` applied to `types`
pub fn selector(name: &str, types: &[ParamType]) -> Selector {
    selector_from_signature(&signature(name, types))
}

/// Compute function selector (first 4 bytes of keccak256(signature)).
///
/// The signature is hashed as given, so it must already be canonical.
pub fn selector_from_signature(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Full Keccak-256 of the canonical signature, as used for event topics
pub fn signature_hash(name: &str, types: &[ParamType]) -> H256 {
    keccak256(signature(name, types).as_bytes())
}
