//! Record header.
//!
//! The first eight bytes are never shuffled or encrypted, so the personality
//! value, sanity marker and checksum can be read straight from stored bytes.

use pkvault_common::{Endian, Field};
use zerocopy::byteorder::{BigEndian, LittleEndian, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Error, Result};

/// Personality value.
pub(crate) const PID: Field = Field::u32(0x00);

/// Sanity marker.
pub(crate) const SANITY: Field = Field::u16(0x04);

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawHeaderBe {
    pid: U32<BigEndian>,
    sanity: U16<BigEndian>,
    checksum: U16<BigEndian>,
}

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawHeaderLe {
    pid: U32<LittleEndian>,
    sanity: U16<LittleEndian>,
    checksum: U16<LittleEndian>,
}

/// The unencrypted header of an entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityHeader {
    /// Personality value.
    pub pid: u32,
    /// Sanity marker.
    pub sanity: u16,
    /// Stored checksum.
    pub checksum: u16,
}

impl EntityHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    /// Read a header from the start of `data`.
    pub fn read(data: &[u8], endian: Endian) -> Result<Self> {
        let too_short = || {
            Error::Common(pkvault_common::Error::FieldOutOfBounds {
                offset: 0,
                width: Self::SIZE,
                len: data.len(),
            })
        };

        let header = match endian {
            Endian::Big => {
                let (raw, _) = RawHeaderBe::read_from_prefix(data).map_err(|_| too_short())?;
                Self {
                    pid: raw.pid.get(),
                    sanity: raw.sanity.get(),
                    checksum: raw.checksum.get(),
                }
            }
            Endian::Little => {
                let (raw, _) = RawHeaderLe::read_from_prefix(data).map_err(|_| too_short())?;
                Self {
                    pid: raw.pid.get(),
                    sanity: raw.sanity.get(),
                    checksum: raw.checksum.get(),
                }
            }
        };
        Ok(header)
    }

    /// Check whether the slot holds nothing (all header bytes zero).
    pub const fn is_empty(&self) -> bool {
        self.pid == 0 && self.sanity == 0 && self.checksum == 0
    }
}
