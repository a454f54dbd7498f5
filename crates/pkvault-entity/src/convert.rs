//! Cross-format conversion.
//!
//! Conversion starts from a fresh target record and copies every catalogued
//! field both formats carry, clamping to the target's range. Fields only the
//! source carries are dropped; fields only the target carries keep their reset
//! value. Ribbons, names and battle stats go across through their own
//! accessors, so byte order and bit packing never leak between formats.

use tracing::debug;

use crate::entity::Entity;
use crate::format::FormatDescriptor;
use crate::layout::FieldId;
use crate::ribbon::Ribbon;

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The converted record, checksum refreshed.
    pub entity: Entity,
    /// Source fields the target format cannot hold.
    pub dropped: Vec<FieldId>,
}

impl Conversion {
    /// Check whether every source field made it across.
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Convert `source` to the `target` format.
///
/// Never fails and never mutates `source`. Values wider than the target field
/// are clamped to its maximum.
pub fn convert(source: &Entity, target: &'static FormatDescriptor) -> Conversion {
    let origin = source.format();
    let mut entity = Entity::new(target);
    let mut dropped = Vec::new();

    for &id in FieldId::ALL {
        let Some(value) = source.get(id) else {
            continue;
        };
        match target.field(id) {
            Some(spec) => {
                entity.set(id, value.min(spec.max()));
            }
            None => dropped.push(id),
        }
    }

    for &ribbon in Ribbon::ALL {
        entity.set_ribbon(ribbon, source.ribbon(ribbon));
    }

    entity.set_nickname(&source.nickname());
    entity.set_trainer_name(&source.trainer_name());
    entity.set_battle_stats(source.battle_stats());
    entity.refresh_checksum();

    debug!(
        source = origin.name,
        target = target.name,
        dropped = dropped.len(),
        "converted record"
    );
    Conversion { entity, dropped }
}

impl Entity {
    /// Convert to another format, discarding the list of dropped fields.
    pub fn convert_to(&self, target: &'static FormatDescriptor) -> Entity {
        convert(self, target).entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{BK4, PK4};
    use crate::layout::{pk4_field, FieldSpec};
    use crate::ribbon::PK4_RIBBON_OFFSETS;
    use crate::species::{GEN4_SPECIES, MAX_SPECIES_ID_4};
    use crate::stats::{BattleStats, PK4_PARTY};
    use crate::text::{TextRegion, TrashPolicy, UTF16_LE};
    use crate::Stat;
    use pkvault_common::{ChecksumSpec, Endian};
    use pkvault_crypto::Transform;

    fn lite_field(id: FieldId) -> Option<FieldSpec> {
        match id {
            FieldId::PokeathlonStat | FieldId::BallHgss | FieldId::ShinyLeaf => None,
            _ => pk4_field(id),
        }
    }

    /// PK4 without the HGSS-only fields.
    static PK4_LITE: FormatDescriptor = FormatDescriptor {
        name: "PK4-lite",
        endian: Endian::Little,
        transform: Transform {
            endian: Endian::Little,
            shuffle: true,
            cipher: true,
        },
        stored_size: 0x88,
        party_size: 0xEC,
        checksum: ChecksumSpec::new(0x08, 0x88, 0x06),
        reset_sanity: 0,
        fields: lite_field,
        ribbon_offsets: PK4_RIBBON_OFFSETS,
        nickname: TextRegion::new(0x48, 22, 10),
        trainer_name: TextRegion::new(0x68, 16, 7),
        text: &UTF16_LE,
        trash: TrashPolicy::Preserve,
        party: Some(PK4_PARTY),
        reserved: &[0x42, 0x43, 0x5E, 0x64, 0x65, 0x66, 0x67],
        species: &GEN4_SPECIES,
    };

    #[test]
    fn test_custom_descriptor_validates() {
        PK4_LITE.validate().unwrap();
    }

    fn decorated(format: &'static FormatDescriptor) -> Entity {
        let mut entity = Entity::new(format);
        entity.set_pid(0xFEDC_BA98);
        entity.set_species(MAX_SPECIES_ID_4);
        entity.set_id32(0xAAAA_5555);
        entity.set_exp(0x0012_3456);
        for stat in Stat::ALL {
            entity.set_iv(stat, 31);
            entity.set_ev(stat, 85);
        }
        entity.set_is_egg(true);
        entity.set_is_nicknamed(true);
        entity.set_fateful_encounter(true);
        entity.set_form(31);
        entity.set_met_level(127);
        entity.set_ot_gender(1);
        entity.set_pokeathlon_stat(200);
        entity.set_shiny_leaf(0x3F);
        entity.set_version(7);
        entity.set_met_location(2010);
        entity.set(FieldId::BallHgss, 24);
        for &ribbon in Ribbon::ALL {
            entity.set_ribbon(ribbon, true);
        }
        entity.set_nickname("Arceus");
        entity.set_trainer_name("Cynthia");
        entity.refresh_checksum();
        entity
    }

    #[test]
    fn test_bk4_to_pk4_keeps_overlap() {
        let source = decorated(&BK4);
        let result = convert(&source, &PK4);
        let converted = &result.entity;

        assert!(result.is_lossless());
        assert!(converted.checksum_valid());
        assert!(converted.is_valid());
        assert_eq!(converted.sanity(), 0);
        for &id in FieldId::ALL {
            assert_eq!(converted.get(id), source.get(id), "{id} differs");
        }
        assert!(Ribbon::ALL.iter().all(|&r| converted.ribbon(r)));
        assert_eq!(converted.nickname(), "Arceus");
        assert_eq!(converted.trainer_name(), "Cynthia");
        assert_eq!(converted.data().len(), 236);
    }

    #[test]
    fn test_round_trip_through_other_format() {
        let source = decorated(&PK4);
        let back = source.convert_to(&BK4).convert_to(&PK4);
        for &id in FieldId::ALL {
            assert_eq!(back.get(id), source.get(id), "{id} differs");
        }
        assert_eq!(back.ribbon_count(), Ribbon::ALL.len());
    }

    #[test]
    fn test_unused_ribbon_bits_not_carried() {
        let mut source = Entity::new(&PK4);
        source.data_mut()[0x63] = 0xFF;
        let converted = source.convert_to(&BK4);
        assert_eq!(converted.data()[0x63], 0);
    }

    #[test]
    fn test_source_unchanged() {
        let source = decorated(&BK4);
        let snapshot = source.data().to_vec();
        let _ = convert(&source, &PK4);
        assert_eq!(source.data(), snapshot.as_slice());
        assert!(source.checksum_valid());
    }

    #[test]
    fn test_dropped_fields() {
        let source = decorated(&PK4);
        let result = convert(&source, &PK4_LITE);
        assert_eq!(
            result.dropped,
            vec![FieldId::ShinyLeaf, FieldId::BallHgss, FieldId::PokeathlonStat]
        );
        assert!(result.entity.checksum_valid());
        assert_eq!(result.entity.species(), MAX_SPECIES_ID_4);
        // bytes of dropped fields keep the reset value
        assert_eq!(result.entity.data()[0x87], 0);
        assert_eq!(result.entity.data()[0x86], 0);
    }

    #[test]
    fn test_target_only_fields_default() {
        let mut source = decorated(&PK4_LITE);
        source.data_mut()[0x87] = 0x55;
        let converted = source.convert_to(&PK4);
        assert_eq!(converted.pokeathlon_stat(), 0);
        assert_eq!(converted.species(), MAX_SPECIES_ID_4);
    }

    #[test]
    fn test_battle_stats_carry_to_working_view() {
        let mut source = Entity::new(&PK4);
        let stats = BattleStats {
            level: 70,
            hp_max: 250,
            ..BattleStats::default()
        };
        source.set_battle_stats(stats);
        let converted = source.convert_to(&BK4);
        assert_eq!(converted.battle_stats(), stats);
        assert_eq!(converted.data().len(), 136);
    }
}
