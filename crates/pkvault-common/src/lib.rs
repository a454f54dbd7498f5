//! Common utilities for pkvault.
//!
//! This crate provides the foundational layers shared by every entity format:
//!
//! - [`field`] - Typed get/set over fixed offsets in a byte buffer, including
//!   bit-packed sub-word fields and single-bit flags
//! - [`checksum`] - The 16-bit additive checksum used by stored entity records
//! - [`Endian`] - Per-format byte order

mod error;

pub mod checksum;
pub mod field;

pub use checksum::ChecksumSpec;
pub use error::{Error, Result};
pub use field::{BitField, Endian, Field, Flag, Overflow, Width};
