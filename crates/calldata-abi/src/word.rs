//! 32-byte ABI words and padding

use calldata_primitives::U256;

/// Size of one ABI slot in bytes
pub const WORD_SIZE: usize = 32;

/// One ABI slot
pub type Word = [u8; WORD_SIZE];

/// Right-align `data` in a word, filling the rest with `fill`.
///
/// Input longer than a word keeps its trailing 32 bytes; callers range-check
/// before padding.
pub fn pad_left(data: &[u8], fill: u8) -> Word {
    let mut word = [fill; WORD_SIZE];
    let data = &data[data.len().saturating_sub(WORD_SIZE)..];
    word[WORD_SIZE - data.len()..].copy_from_slice(data);
    word
}

/// Left-align `data` in a word, filling the rest with `fill`.
pub fn pad_right(data: &[u8], fill: u8) -> Word {
    let mut word = [fill; WORD_SIZE];
    let data = &data[..data.len().min(WORD_SIZE)];
    word[..data.len()].copy_from_slice(data);
    word
}

/// Round a byte length up to a whole number of words
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Big-endian word holding a length or offset
pub fn usize_word(value: usize) -> Word {
    u256_word(&U256::from(value))
}

/// Big-endian word holding a U256
pub fn u256_word(value: &U256) -> Word {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_left() {
        let word = pad_left(&[0xab, 0xcd], 0x00);
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(&word[30..], &[0xab, 0xcd]);

        let word = pad_left(&[0x80], 0xff);
        assert_eq!(&word[..31], &[0xffu8; 31]);
        assert_eq!(word[31], 0x80);
    }

    #[test]
    fn test_pad_right() {
        let word = pad_right(b"abc", 0x00);
        assert_eq!(&word[..3], b"abc");
        assert_eq!(&word[3..], &[0u8; 29]);
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 32);
        assert_eq!(padded_len(32), 32);
        assert_eq!(padded_len(33), 64);
    }

    #[test]
    fn test_usize_word() {
        let word = usize_word(0x0120);
        assert_eq!(word[30], 0x01);
        assert_eq!(word[31], 0x20);
        assert_eq!(&word[..30], &[0u8; 30]);
    }
}
