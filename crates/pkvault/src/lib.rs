//! Pkvault - Gen 4 entity record codec.
//!
//! This crate provides a unified interface to the pkvault library ecosystem
//! for reading and writing Gen 4 entity records.
//!
//! # Crates
//!
//! - [`pkvault_common`] - Byte-field accessors and the checksum engine
//! - [`pkvault_crypto`] - Block shuffle, LCG stream cipher and stored-form transform
//! - [`pkvault_entity`] - Format descriptors, entity records and conversion
//!
//! # Example
//!
//! ```
//! use pkvault::prelude::*;
//!
//! let mut entity = Entity::new(&PK4);
//! entity.set_pid(0x2A9C_44D1);
//! entity.set_species(493);
//! entity.set_iv(Stat::Spe, 40);
//! assert_eq!(entity.iv(Stat::Spe), 31);
//!
//! let stored = entity.encode();
//! let decoded = Entity::decode(&PK4, &stored)?;
//! assert!(decoded.is_valid());
//!
//! let converted = convert(&decoded, &BK4);
//! assert!(converted.is_lossless());
//! assert_eq!(converted.entity.species(), 493);
//! # Ok::<(), pkvault::entity::Error>(())
//! ```

// Re-export all sub-crates
pub use pkvault_common as common;
pub use pkvault_crypto as crypto;
pub use pkvault_entity as entity;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use pkvault_common::{ChecksumSpec, Endian};
    pub use pkvault_crypto::Transform;
    pub use pkvault_entity::batch::{convert_all, decode_all, encode_all, refresh_all};
    pub use pkvault_entity::{
        convert, BattleStats, Conversion, Entity, FieldId, FormatDescriptor, Ribbon, Stat,
        TrashPolicy, BK4, PK4,
    };
}

// Re-export commonly used types at the crate root
pub use pkvault_entity::{Entity, FormatDescriptor, BK4, PK4};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
