//! Type descriptor classification
//!
//! Turns declared type strings (`uint256`, `bytes32`, `address[3]`, `tuple[]`
//! with components) into [`ParamType`]s. Classification is a pure function of
//! the descriptor; no lookup tables are built.

use crate::interface::Param;
use crate::{AbiError, AbiResult, EncoderConfig, ParamType};

const MAX_INT_BITS: usize = 256;
const MAX_FIXED_DECIMALS: usize = 80;
const MAX_FIXED_BYTES: usize = 32;

/// Parse a type string (e.g., "uint256", "address[2][]").
///
/// `tuple` needs its components and is only accepted through
/// [`parse_param`].
pub fn parse_type(descriptor: &str) -> AbiResult<ParamType> {
    let config = EncoderConfig::default();
    resolve(descriptor.trim(), None, 0, &config)
}

/// Classify a parameter, resolving tuple components recursively
pub fn parse_param(param: &Param, config: &EncoderConfig) -> AbiResult<ParamType> {
    resolve(&param.ty, Some(&param.components), 0, config)
}

/// Split a signature such as `transfer(address, uint)` or
/// `submit((uint256,bytes)[],bool)` into its name and resolved input types.
///
/// Whitespace around types is ignored and shorthand names are accepted, so
/// `signature(name, &types)` yields the canonical form.
pub fn parse_signature(signature: &str) -> AbiResult<(String, Vec<ParamType>)> {
    parse_signature_with(signature, &EncoderConfig::default())
}

pub(crate) fn parse_signature_with(
    signature: &str,
    config: &EncoderConfig,
) -> AbiResult<(String, Vec<ParamType>)> {
    let signature = signature.trim();
    let invalid = || AbiError::UnknownType(signature.to_string());
    let open = signature.find('(').ok_or_else(invalid)?;
    let list = signature[open + 1..].strip_suffix(')').ok_or_else(invalid)?;
    let types = resolve_list(list, 0, config)?;
    Ok((signature[..open].trim().to_string(), types))
}

fn resolve_list(list: &str, depth: usize, config: &EncoderConfig) -> AbiResult<Vec<ParamType>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)?
        .into_iter()
        .map(|ty| resolve_inline(ty.trim(), depth, config))
        .collect()
}

/// Comma-separated members, ignoring commas inside nested tuples
fn split_top_level(list: &str) -> AbiResult<Vec<&str>> {
    let unbalanced = || AbiError::UnknownType(list.to_string());
    let mut parts = Vec::new();
    let mut level = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => level += 1,
            ')' => level = level.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if level == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if level != 0 {
        return Err(unbalanced());
    }
    parts.push(&list[start..]);
    Ok(parts)
}

/// A member of a signature: an elementary type or an inline `(..)` tuple,
/// either with optional array suffixes
fn resolve_inline(ty: &str, depth: usize, config: &EncoderConfig) -> AbiResult<ParamType> {
    if depth > config.max_depth {
        return Err(AbiError::DepthExceeded(config.max_depth));
    }
    if !ty.starts_with('(') {
        return resolve(ty, None, depth, config);
    }

    let invalid = || AbiError::UnknownType(ty.to_string());
    // Array suffixes hold no parentheses, so the last ')' closes the tuple.
    let close = ty.rfind(')').ok_or_else(invalid)?;
    let mut param_type = ParamType::Tuple(resolve_list(&ty[1..close], depth + 1, config)?);

    let mut rest = &ty[close + 1..];
    let mut depth = depth;
    while let Some(suffix) = rest.strip_prefix('[') {
        depth += 1;
        if depth > config.max_depth {
            return Err(AbiError::DepthExceeded(config.max_depth));
        }
        let end = suffix.find(']').ok_or_else(invalid)?;
        let len = &suffix[..end];
        param_type = if len.is_empty() {
            ParamType::Array(Box::new(param_type))
        } else {
            let len = parse_decimal(len).ok_or_else(invalid)?;
            fits_head(ParamType::FixedArray(Box::new(param_type), len), ty)?
        };
        rest = &suffix[end + 1..];
    }
    if !rest.is_empty() {
        return Err(invalid());
    }
    fits_head(param_type, ty)
}

fn resolve(
    ty: &str,
    components: Option<&[Param]>,
    depth: usize,
    config: &EncoderConfig,
) -> AbiResult<ParamType> {
    if depth > config.max_depth {
        return Err(AbiError::DepthExceeded(config.max_depth));
    }

    // Array suffixes bind right-to-left: `T[2][]` is a dynamic array of `T[2]`.
    if let Some(prefix) = ty.strip_suffix(']') {
        let open = prefix
            .rfind('[')
            .ok_or_else(|| AbiError::UnknownType(ty.to_string()))?;
        let (elem, len) = (&prefix[..open], &prefix[open + 1..]);
        let inner = Box::new(resolve(elem, components, depth + 1, config)?);
        if len.is_empty() {
            return Ok(ParamType::Array(inner));
        }
        let len = parse_decimal(len).ok_or_else(|| AbiError::UnknownType(ty.to_string()))?;
        return fits_head(ParamType::FixedArray(inner, len), ty);
    }

    if ty == "tuple" {
        let components = components.ok_or_else(|| AbiError::UnknownType(ty.to_string()))?;
        let types = components
            .iter()
            .map(|c| resolve(&c.ty, Some(&c.components), depth + 1, config))
            .collect::<AbiResult<Vec<_>>>()?;
        return fits_head(ParamType::Tuple(types), ty);
    }

    parse_elementary(ty).ok_or_else(|| AbiError::UnknownType(ty.to_string()))
}

/// Static composites whose inlined size overflows `usize` cannot be encoded
fn fits_head(param_type: ParamType, ty: &str) -> AbiResult<ParamType> {
    match param_type.checked_head_size() {
        Some(_) => Ok(param_type),
        None => Err(AbiError::UnknownType(ty.to_string())),
    }
}

fn parse_elementary(ty: &str) -> Option<ParamType> {
    match ty {
        "bool" => return Some(ParamType::Bool),
        "address" => return Some(ParamType::Address),
        "string" => return Some(ParamType::String),
        "bytes" => return Some(ParamType::Bytes),
        _ => {}
    }

    if let Some(rest) = ty.strip_prefix("uint") {
        return parse_int_bits(rest).map(ParamType::Uint);
    }
    if let Some(rest) = ty.strip_prefix("int") {
        return parse_int_bits(rest).map(ParamType::Int);
    }
    if let Some(rest) = ty.strip_prefix("ufixed") {
        return parse_fixed_suffix(rest).map(|(m, n)| ParamType::UFixed(m, n));
    }
    if let Some(rest) = ty.strip_prefix("fixed") {
        return parse_fixed_suffix(rest).map(|(m, n)| ParamType::Fixed(m, n));
    }
    if let Some(rest) = ty.strip_prefix("bytes") {
        return parse_decimal(rest)
            .filter(|size| *size <= MAX_FIXED_BYTES)
            .map(ParamType::FixedBytes);
    }
    None
}

/// `""` means 256; otherwise a multiple of 8 in 8..=256
fn parse_int_bits(s: &str) -> Option<usize> {
    if s.is_empty() {
        return Some(MAX_INT_BITS);
    }
    parse_bit_width(s)
}

fn parse_bit_width(s: &str) -> Option<usize> {
    parse_decimal(s).filter(|bits| bits % 8 == 0 && *bits <= MAX_INT_BITS)
}

/// `MxN` with M a bit width and N in 1..=80. A bare `fixed` has no default.
fn parse_fixed_suffix(s: &str) -> Option<(usize, usize)> {
    let (bits, decimals) = s.split_once('x')?;
    let bits = parse_bit_width(bits)?;
    let decimals = parse_decimal(decimals).filter(|n| *n <= MAX_FIXED_DECIMALS)?;
    Some((bits, decimals))
}

/// Positive decimal without sign or leading zeros
fn parse_decimal(s: &str) -> Option<usize> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
