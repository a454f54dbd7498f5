//! Format descriptors.
//!
//! A [`FormatDescriptor`] captures everything that differs between entity
//! formats as plain data. [`Entity`](crate::Entity) is generic over it at
//! runtime, so adding a format means adding a descriptor, not a type.

use pkvault_common::{ChecksumSpec, Endian, Field};
use pkvault_crypto::{Transform, BLOCK_COUNT, BLOCK_SIZE, BODY_OFFSET};

use crate::header::{self, EntityHeader};
use crate::layout::{bk4_field, pk4_field, FieldId, FieldSpec};
use crate::ribbon::{Ribbon, RibbonOffsets, BK4_RIBBON_OFFSETS, PK4_RIBBON_OFFSETS};
use crate::species::{SpeciesTable, GEN4_SPECIES};
use crate::stats::{PartyLayout, PK4_PARTY};
use crate::text::{TextCodec, TextRegion, TrashPolicy, UTF16_BE, UTF16_LE};
use crate::{Error, Result};

/// Stored size of every Gen 4 record.
pub const SIZE_4STORED: usize = 0x88;

/// Party size of DS records.
pub const SIZE_4PARTY: usize = 0xEC;

const GEN4_CHECKSUM: ChecksumSpec = ChecksumSpec::new(0x08, SIZE_4STORED, 0x06);
const GEN4_NICKNAME: TextRegion = TextRegion::new(0x48, 22, 10);
const GEN4_TRAINER_NAME: TextRegion = TextRegion::new(0x68, 16, 7);
const GEN4_RESERVED: &[usize] = &[0x42, 0x43, 0x5E, 0x64, 0x65, 0x66, 0x67];

/// End of the block-shuffled body.
const SHUFFLED_END: usize = BODY_OFFSET + BLOCK_COUNT * BLOCK_SIZE;

/// Static description of one entity format.
pub struct FormatDescriptor {
    /// Short format name.
    pub name: &'static str,
    /// Byte order of all multi-byte fields.
    pub endian: Endian,
    /// Stored-form transform.
    pub transform: Transform,
    /// Length of the stored form.
    pub stored_size: usize,
    /// Length of the working buffer, party region included.
    pub party_size: usize,
    /// Checksum location and range.
    pub checksum: ChecksumSpec,
    /// Sanity marker written into fresh records.
    pub reset_sanity: u16,
    /// Field-offset table.
    pub fields: fn(FieldId) -> Option<FieldSpec>,
    /// Byte offset of each ribbon group.
    pub ribbon_offsets: RibbonOffsets,
    /// Nickname region.
    pub nickname: TextRegion,
    /// Original trainer name region.
    pub trainer_name: TextRegion,
    /// Codec for both text regions.
    pub text: &'static dyn TextCodec,
    /// Trash handling for text writes.
    pub trash: TrashPolicy,
    /// Persisted battle stats, if the format has a party region.
    pub party: Option<PartyLayout>,
    /// Bytes with no known meaning, preserved verbatim.
    pub reserved: &'static [usize],
    /// Species oracle for validity checks.
    pub species: &'static dyn SpeciesTable,
}

/// Pokémon Battle Revolution box format.
///
/// Big-endian, shuffled but never encrypted, no party region.
pub static BK4: FormatDescriptor = FormatDescriptor {
    name: "BK4",
    endian: Endian::Big,
    transform: Transform {
        endian: Endian::Big,
        shuffle: true,
        cipher: false,
    },
    stored_size: SIZE_4STORED,
    party_size: SIZE_4STORED,
    checksum: GEN4_CHECKSUM,
    reset_sanity: 0x4000,
    fields: bk4_field,
    ribbon_offsets: BK4_RIBBON_OFFSETS,
    nickname: GEN4_NICKNAME,
    trainer_name: GEN4_TRAINER_NAME,
    text: &UTF16_BE,
    trash: TrashPolicy::Preserve,
    party: None,
    reserved: GEN4_RESERVED,
    species: &GEN4_SPECIES,
};

/// Diamond/Pearl/Platinum/HeartGold/SoulSilver format.
///
/// Little-endian, shuffled and encrypted, with a party region.
pub static PK4: FormatDescriptor = FormatDescriptor {
    name: "PK4",
    endian: Endian::Little,
    transform: Transform {
        endian: Endian::Little,
        shuffle: true,
        cipher: true,
    },
    stored_size: SIZE_4STORED,
    party_size: SIZE_4PARTY,
    checksum: GEN4_CHECKSUM,
    reset_sanity: 0,
    fields: pk4_field,
    ribbon_offsets: PK4_RIBBON_OFFSETS,
    nickname: GEN4_NICKNAME,
    trainer_name: GEN4_TRAINER_NAME,
    text: &UTF16_LE,
    trash: TrashPolicy::Preserve,
    party: Some(PK4_PARTY),
    reserved: GEN4_RESERVED,
    species: &GEN4_SPECIES,
};

impl FormatDescriptor {
    /// Look up a field.
    #[inline]
    pub fn field(&self, id: FieldId) -> Option<FieldSpec> {
        (self.fields)(id)
    }

    /// Check whether the format persists battle stats.
    #[inline]
    pub const fn has_party_region(&self) -> bool {
        self.party_size > self.stored_size
    }

    /// Check whether `len` is an acceptable buffer length.
    #[inline]
    pub const fn accepts_len(&self, len: usize) -> bool {
        len == self.stored_size || len == self.party_size
    }

    /// Return an error unless `len` is an acceptable buffer length.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if !self.accepts_len(len) {
            return Err(Error::InvalidSize {
                format: self.name,
                stored: self.stored_size,
                party: self.party_size,
                actual: len,
            });
        }
        Ok(())
    }

    /// Check that every offset the descriptor names fits its buffers.
    ///
    /// A descriptor that passes can be used with every [`Entity`](crate::Entity)
    /// operation without panicking, and a refreshed checksum always validates.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidLayout {
            format: self.name,
            reason,
        };

        if self.stored_size > self.party_size {
            return Err(invalid(format!(
                "stored size {} exceeds party size {}",
                self.stored_size, self.party_size
            )));
        }
        if self.transform.endian != self.endian {
            return Err(invalid("transform byte order differs from field byte order".into()));
        }
        if self.stored_size < EntityHeader::SIZE {
            return Err(invalid(format!(
                "stored size {} cannot hold the {}-byte header",
                self.stored_size,
                EntityHeader::SIZE
            )));
        }
        if self.transform.shuffle && self.stored_size < SHUFFLED_END {
            return Err(invalid(format!(
                "shuffled body ends at {SHUFFLED_END:#x}, past the stored size {:#x}",
                self.stored_size
            )));
        }

        let checksum = &self.checksum;
        if checksum.start < header::SANITY.end() || checksum.end > self.stored_size {
            return Err(invalid(format!(
                "checksum range {:#x}..{:#x} must lie between the header and the stored size",
                checksum.start, checksum.end
            )));
        }
        let checksum_field = Field::u16(checksum.field);
        checksum_field.check_bounds(self.stored_size)?;
        if checksum_field.offset < checksum.end && checksum_field.end() > checksum.start {
            return Err(invalid(format!(
                "checksum field at {:#x} lies inside its own range {:#x}..{:#x}",
                checksum.field, checksum.start, checksum.end
            )));
        }

        for &id in FieldId::ALL {
            if let Some(spec) = self.field(id) {
                spec.storage().check_bounds(self.stored_size)?;
            }
        }

        for &ribbon in Ribbon::ALL {
            let flag = ribbon.flag(&self.ribbon_offsets);
            if flag.offset >= self.stored_size {
                return Err(invalid(format!("{ribbon} lies past the stored size")));
            }
        }

        for region in [self.nickname, self.trainer_name] {
            if region.end() > self.stored_size || region.len < 2 * (region.max_chars + 1) {
                return Err(invalid(format!(
                    "text region at {:#x} cannot hold {} characters",
                    region.offset, region.max_chars
                )));
            }
        }

        if let Some(&offset) = self.reserved.iter().find(|&&o| o >= self.stored_size) {
            return Err(invalid(format!(
                "reserved byte {offset:#x} lies past the stored size"
            )));
        }

        if let Some(party) = &self.party {
            for field in party.fields() {
                field.check_bounds(self.party_size)?;
                if field.offset < self.stored_size {
                    return Err(invalid(format!(
                        "party field at {:#x} overlaps the stored form",
                        field.offset
                    )));
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("name", &self.name)
            .field("endian", &self.endian)
            .field("transform", &self.transform)
            .field("stored_size", &self.stored_size)
            .field("party_size", &self.party_size)
            .field("checksum", &self.checksum)
            .field("reset_sanity", &self.reset_sanity)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
