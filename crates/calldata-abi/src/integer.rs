//! Integer encoding
//!
//! Non-negative values are left-padded with `0x00`; negative values are
//! written as 256-bit two's complement, which left-pads with `0xFF`.

use calldata_primitives::U256;

use crate::word::{u256_word, Word};
use crate::{AbiError, AbiResult, I256};

const MAX_BITS: usize = 256;

/// Encode an integer into one word, checking it fits `bits` of the given
/// signedness.
///
/// `bits` must be a multiple of 8 in `8..=256`.
pub fn encode_integer(value: &I256, bits: usize, signed: bool) -> AbiResult<Word> {
    if bits == 0 || bits % 8 != 0 || bits > MAX_BITS {
        return Err(AbiError::OutOfRange(format!("invalid integer width {}", bits)));
    }
    check_range(value, bits, signed)?;

    if value.is_negative() {
        let twos = (!value.abs).overflowing_add(U256::one()).0;
        Ok(u256_word(&twos))
    } else {
        Ok(u256_word(&value.abs))
    }
}

fn check_range(value: &I256, bits: usize, signed: bool) -> AbiResult<()> {
    let type_name = if signed { "int" } else { "uint" };
    let out_of_range = || {
        AbiError::OutOfRange(format!("{} does not fit {}{}", value, type_name, bits))
    };

    match (signed, value.is_negative()) {
        (false, true) => Err(out_of_range()),
        (false, false) => {
            if value.abs.bits() > bits {
                return Err(out_of_range());
            }
            Ok(())
        }
        // Non-negative signed values keep the top bit clear.
        (true, false) => {
            if value.abs.bits() > bits - 1 {
                return Err(out_of_range());
            }
            Ok(())
        }
        // Magnitude may reach 2^(bits-1) exactly.
        (true, true) => {
            if value.abs > U256::one() << (bits - 1) {
                return Err(out_of_range());
            }
            Ok(())
        }
    }
}
