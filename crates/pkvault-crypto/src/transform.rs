//! Capability-driven stored-form transform.

use pkvault_common::Endian;

use crate::cipher::crypt;
use crate::shuffle::{shuffle_blocks, shuffle_value, unshuffle_blocks, BODY_OFFSET};

/// Offset of the personality value in the record header.
const PID_OFFSET: usize = 0x00;

/// Offset of the checksum in the record header.
const CHECKSUM_OFFSET: usize = 0x06;

/// The stored-form transform of one format.
///
/// Byte order, shuffling and encryption vary independently between formats,
/// so each is its own flag.
///
/// Decoding decrypts then unshuffles; encoding shuffles then encrypts. The
/// body `[0x08, stored_size)` is keyed by the checksum, and any party bytes
/// past `stored_size` by the personality value. Both transforms are total
/// over buffers of at least `stored_size` bytes: corrupt input decodes to
/// garbage, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Byte order of the header and key words.
    pub endian: Endian,
    /// Whether the body is block-shuffled.
    pub shuffle: bool,
    /// Whether the body is XOR-encrypted.
    pub cipher: bool,
}

impl Transform {
    /// A transform that leaves data untouched.
    pub const fn identity(endian: Endian) -> Self {
        Self {
            endian,
            shuffle: false,
            cipher: false,
        }
    }

    /// Check whether this transform changes anything.
    pub const fn is_identity(&self) -> bool {
        !self.shuffle && !self.cipher
    }

    /// Convert stored-form bytes to the working layout in place.
    pub fn decode(&self, data: &mut [u8], stored_size: usize) {
        let pid = self.endian.read_u32(data, PID_OFFSET);

        if self.cipher {
            self.crypt(data, pid, stored_size);
        }
        if self.shuffle {
            unshuffle_blocks(data, shuffle_value(pid));
        }
    }

    /// Convert working-layout bytes to stored form in place.
    pub fn encode(&self, data: &mut [u8], stored_size: usize) {
        let pid = self.endian.read_u32(data, PID_OFFSET);

        if self.shuffle {
            shuffle_blocks(data, shuffle_value(pid));
        }
        if self.cipher {
            self.crypt(data, pid, stored_size);
        }
    }

    fn crypt(&self, data: &mut [u8], pid: u32, stored_size: usize) {
        let checksum = self.endian.read_u16(data, CHECKSUM_OFFSET);
        crypt(&mut data[BODY_OFFSET..stored_size], checksum as u32, self.endian);
        if data.len() > stored_size {
            crypt(&mut data[stored_size..], pid, self.endian);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STORED: usize = 136;
    const PARTY: usize = 236;

    fn sample(pid: u32, len: usize) -> Vec<u8> {
        let mut data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        data[0..4].copy_from_slice(&pid.to_le_bytes());
        data
    }

    #[test]
    fn test_identity() {
        let transform = Transform::identity(Endian::Little);
        assert!(transform.is_identity());
        let mut data = sample(0x1234_5678, STORED);
        let original = data.clone();
        transform.encode(&mut data, STORED);
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_only_keeps_bytes() {
        let transform = Transform {
            endian: Endian::Big,
            shuffle: true,
            cipher: false,
        };
        let mut data = sample(0, STORED);
        data[0..4].copy_from_slice(&0x0000_2000u32.to_be_bytes());
        let mut before = data.clone();
        transform.encode(&mut data, STORED);
        assert_ne!(data, before);

        let mut after = data.clone();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_cipher_leaves_header() {
        let transform = Transform {
            endian: Endian::Little,
            shuffle: true,
            cipher: true,
        };
        let mut data = sample(0xDEAD_BEEF, PARTY);
        let header = data[..8].to_vec();
        transform.encode(&mut data, STORED);
        assert_eq!(&data[..8], header.as_slice());
    }

    proptest! {
        #[test]
        fn transform_round_trips(
            body in prop::collection::vec(any::<u8>(), PARTY),
            shuffle in any::<bool>(),
            cipher in any::<bool>(),
            big in any::<bool>(),
            party in any::<bool>(),
        ) {
            let transform = Transform {
                endian: if big { Endian::Big } else { Endian::Little },
                shuffle,
                cipher,
            };
            let len = if party { PARTY } else { STORED };
            let mut data = body[..len].to_vec();
            transform.encode(&mut data, STORED);
            transform.decode(&mut data, STORED);
            prop_assert_eq!(&data[..], &body[..len]);
        }
    }
}
