//! Stored-form transforms for entity records.
//!
//! Records found in a save file are not laid out the way they are edited.
//! Depending on the format, the body may be block-shuffled, XOR-encrypted
//! with a linear congruential keystream, or both. This crate provides both
//! sub-transforms and a [`Transform`] that composes them from independent
//! capability flags.
//!
//! # Example
//!
//! ```
//! use pkvault_common::Endian;
//! use pkvault_crypto::Transform;
//!
//! let transform = Transform {
//!     endian: Endian::Big,
//!     shuffle: true,
//!     cipher: false,
//! };
//!
//! let mut data = vec![0u8; 136];
//! data[0..4].copy_from_slice(&0x0002_6000u32.to_be_bytes());
//! data[8] = 0xAB;
//! let original = data.clone();
//!
//! transform.encode(&mut data, 136);
//! transform.decode(&mut data, 136);
//! assert_eq!(data, original);
//! ```

mod cipher;
mod shuffle;
mod transform;

pub use cipher::{crypt, Keystream};
pub use shuffle::{
    shuffle_blocks, shuffle_value, unshuffle_blocks, BLOCK_COUNT, BLOCK_POSITION,
    BLOCK_POSITION_INVERT, BLOCK_SIZE, BODY_OFFSET, PERMUTATION_COUNT,
};
pub use transform::Transform;
