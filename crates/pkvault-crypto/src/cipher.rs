//! Linear congruential XOR keystream.
//!
//! Each step advances `seed = seed * 0x41C64E6D + 0x6073` and yields the
//! upper 16 bits as the next key word. XOR is self-inverse, so the same call
//! both encrypts and decrypts.

use pkvault_common::Endian;

const MULTIPLIER: u32 = 0x41C6_4E6D;
const INCREMENT: u32 = 0x0000_6073;

/// Keystream of 16-bit key words.
#[derive(Debug, Clone)]
pub struct Keystream {
    seed: u32,
}

impl Keystream {
    /// Create a keystream from a seed.
    #[inline]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Current internal state.
    #[inline]
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

impl Iterator for Keystream {
    type Item = u16;

    #[inline]
    fn next(&mut self) -> Option<u16> {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        Some((self.seed >> 16) as u16)
    }
}

/// XOR `data` in place with the keystream seeded by `seed`.
///
/// Words are combined in `endian` order. A trailing odd byte is left alone.
pub fn crypt(data: &mut [u8], seed: u32, endian: Endian) {
    for (i, key) in (0..data.len() / 2).zip(Keystream::new(seed)) {
        let offset = i * 2;
        let word = endian.read_u16(data, offset);
        endian.write_u16(data, offset, word ^ key);
    }
}
