//! Entity record codec for Gen 4 save data.
//!
//! An entity is a fixed-size binary record packing identity, progression,
//! ribbon flags, text and provenance data at offsets fixed by the save
//! format. This crate maps those bytes to typed accessors, drives the
//! stored-form transform, maintains the checksum and converts records
//! between formats.
//!
//! # Formats
//!
//! Every format is described by a [`FormatDescriptor`] value: byte order,
//! shuffle and cipher flags, checksum range, buffer sizes and a field-offset
//! table. One generic [`Entity`] type works with any descriptor.
//!
//! - [`BK4`] - Battle Revolution boxes: big-endian, shuffled, not encrypted
//! - [`PK4`] - DS saves: little-endian, shuffled and encrypted, with party stats
//!
//! # Example
//!
//! ```
//! use pkvault_entity::{Entity, Ribbon, BK4, PK4};
//!
//! let mut entity = Entity::new(&BK4);
//! assert_eq!(entity.sanity(), 0x4000);
//! assert!(entity.is_valid());
//!
//! entity.set_species(25);
//! entity.set_nickname("PIKA");
//! entity.set_ribbon(Ribbon::ChampionSinnoh, true);
//! entity.refresh_checksum();
//!
//! let stored = entity.encode();
//! let decoded = Entity::decode(&BK4, &stored)?;
//! assert_eq!(decoded.nickname(), "PIKA");
//!
//! let converted = decoded.convert_to(&PK4);
//! assert!(converted.checksum_valid());
//! assert!(converted.ribbon(Ribbon::ChampionSinnoh));
//! # Ok::<(), pkvault_entity::Error>(())
//! ```

mod accessors;
mod entity;
mod error;
mod format;
mod header;

pub mod batch;
pub mod convert;
pub mod layout;
pub mod ribbon;
pub mod species;
pub mod stats;
pub mod text;

pub use accessors::{Stat, BALL_CHERISH, BALL_POKE, LOCATION_FARAWAY, VERSION_HG, VERSION_SS};
pub use convert::{convert, Conversion};
pub use entity::Entity;
pub use error::{Error, Result};
pub use format::{FormatDescriptor, BK4, PK4};
pub use header::EntityHeader;
pub use layout::{FieldId, FieldSpec};
pub use ribbon::Ribbon;
pub use species::{Gen4Species, SpeciesTable};
pub use stats::{BattleStats, ContestStats, GameDate, MoveSlot, PartyLayout, StatSet};
pub use text::{TextCodec, TextRegion, TrashPolicy, Utf16Text};
