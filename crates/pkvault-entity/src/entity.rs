//! The entity record.

use pkvault_common::Flag;
use tracing::{debug, trace};

use crate::format::FormatDescriptor;
use crate::header::{self, EntityHeader};
use crate::layout::FieldId;
use crate::ribbon::Ribbon;
use crate::species::SpeciesTable;
use crate::stats::BattleStats;
use crate::text::TextRegion;
use crate::Result;

/// One entity record in its working (decoded) layout.
///
/// The buffer is always `party_size` bytes long and owned exclusively by this
/// record; cloning copies it. Setters never touch the checksum: mutate as many
/// fields as needed, then call [`Entity::refresh_checksum`] (or let
/// [`Entity::encode`] do it).
#[derive(Debug, Clone)]
pub struct Entity {
    format: &'static FormatDescriptor,
    data: Vec<u8>,
    /// Battle stats for formats without a party region.
    working: BattleStats,
}

impl Entity {
    /// Create a blank record with the format's reset sanity marker.
    pub fn new(format: &'static FormatDescriptor) -> Self {
        let mut data = vec![0u8; format.party_size];
        header::SANITY.write(&mut data, format.endian, format.reset_sanity as u32);
        Self {
            format,
            data,
            working: BattleStats::default(),
        }
    }

    /// Wrap an already-decoded buffer.
    ///
    /// The buffer must be exactly the stored or the party size; a stored-size
    /// buffer is extended with a zeroed party region.
    pub fn from_bytes(format: &'static FormatDescriptor, mut data: Vec<u8>) -> Result<Self> {
        format.check_len(data.len())?;
        data.resize(format.party_size, 0);
        Ok(Self {
            format,
            data,
            working: BattleStats::default(),
        })
    }

    /// Copy an already-decoded buffer.
    pub fn from_slice(format: &'static FormatDescriptor, data: &[u8]) -> Result<Self> {
        Self::from_bytes(format, data.to_vec())
    }

    /// Decode stored-form (or party-form) bytes.
    ///
    /// A checksum mismatch is not an error; check [`Entity::is_valid`].
    pub fn decode(format: &'static FormatDescriptor, stored: &[u8]) -> Result<Self> {
        format.check_len(stored.len())?;
        let header = EntityHeader::read(stored, format.endian)?;

        let mut data = stored.to_vec();
        format.transform.decode(&mut data, format.stored_size);
        let entity = Self::from_bytes(format, data)?;

        if !entity.checksum_valid() {
            debug!(
                format = format.name,
                pid = header.pid,
                stored = header.checksum,
                computed = entity.calculate_checksum(),
                "decoded record with mismatched checksum"
            );
        }
        Ok(entity)
    }

    /// Read the unencrypted header of stored bytes without decoding them.
    pub fn peek_header(format: &'static FormatDescriptor, stored: &[u8]) -> Result<EntityHeader> {
        EntityHeader::read(stored, format.endian)
    }

    /// Refresh the checksum and produce the stored form.
    pub fn encode(&mut self) -> Vec<u8> {
        self.refresh_checksum();
        let mut stored = self.data[..self.format.stored_size].to_vec();
        self.format
            .transform
            .encode(&mut stored, self.format.stored_size);
        stored
    }

    /// Refresh the checksum and produce the party form.
    ///
    /// For formats without a party region this equals [`Entity::encode`].
    pub fn encode_party(&mut self) -> Vec<u8> {
        self.refresh_checksum();
        let mut party = self.data.clone();
        self.format
            .transform
            .encode(&mut party, self.format.stored_size);
        party
    }

    /// The format descriptor.
    #[inline]
    pub fn format(&self) -> &'static FormatDescriptor {
        self.format
    }

    /// The working buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The working buffer, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The stored-size prefix of the working buffer.
    #[inline]
    pub fn stored_data(&self) -> &[u8] {
        &self.data[..self.format.stored_size]
    }

    /// Consume the record, returning its working buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    // Catalogue access

    /// Read a catalogued field, or `None` when the format lacks it.
    #[inline]
    pub fn get(&self, id: FieldId) -> Option<u32> {
        let spec = self.format.field(id)?;
        Some(spec.read(&self.data, self.format.endian))
    }

    /// Write a catalogued field. Returns `false` when the format lacks it.
    #[inline]
    pub fn set(&mut self, id: FieldId, value: u32) -> bool {
        match self.format.field(id) {
            Some(spec) => {
                trace!(field = id.name(), value, "set field");
                spec.write(&mut self.data, self.format.endian, value);
                true
            }
            None => false,
        }
    }

    /// Read a field known to exist in every built-in format.
    #[inline]
    pub(crate) fn value(&self, id: FieldId) -> u32 {
        self.get(id).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn store(&mut self, id: FieldId, value: u32) {
        self.set(id, value);
    }

    // Header

    /// The record header.
    pub fn header(&self) -> EntityHeader {
        EntityHeader {
            pid: self.pid(),
            sanity: self.sanity(),
            checksum: self.checksum(),
        }
    }

    /// Personality value.
    #[inline]
    pub fn pid(&self) -> u32 {
        header::PID.read(&self.data, self.format.endian)
    }

    /// Set the personality value.
    ///
    /// This changes the block order used by the stored form.
    #[inline]
    pub fn set_pid(&mut self, value: u32) {
        header::PID.write(&mut self.data, self.format.endian, value);
    }

    /// Sanity marker.
    #[inline]
    pub fn sanity(&self) -> u16 {
        header::SANITY.read(&self.data, self.format.endian) as u16
    }

    /// Set the sanity marker.
    #[inline]
    pub fn set_sanity(&mut self, value: u16) {
        header::SANITY.write(&mut self.data, self.format.endian, value as u32);
    }

    // Checksum and validity

    /// Stored checksum.
    #[inline]
    pub fn checksum(&self) -> u16 {
        self.format.checksum.stored(&self.data, self.format.endian)
    }

    /// Checksum computed from the current contents.
    #[inline]
    pub fn calculate_checksum(&self) -> u16 {
        self.format.checksum.compute(&self.data, self.format.endian)
    }

    /// Check whether the stored checksum matches the contents.
    #[inline]
    pub fn checksum_valid(&self) -> bool {
        self.format.checksum.is_valid(&self.data, self.format.endian)
    }

    /// Recompute and store the checksum.
    pub fn refresh_checksum(&mut self) -> u16 {
        self.format.checksum.refresh(&mut self.data, self.format.endian)
    }

    /// Check validity against the format's species table.
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(self.format.species)
    }

    /// Check validity: the checksum matches, or the record is a placeholder
    /// (reset sanity marker and a species inside `table`).
    pub fn is_valid_with(&self, table: &dyn SpeciesTable) -> bool {
        self.checksum_valid()
            || (self.sanity() == self.format.reset_sanity && table.contains(self.species()))
    }

    // Ribbons

    /// Read a ribbon.
    #[inline]
    pub fn ribbon(&self, ribbon: Ribbon) -> bool {
        ribbon.flag(&self.format.ribbon_offsets).get(&self.data)
    }

    /// Write a ribbon, leaving every other bit of its byte alone.
    #[inline]
    pub fn set_ribbon(&mut self, ribbon: Ribbon, value: bool) {
        ribbon
            .flag(&self.format.ribbon_offsets)
            .set(&mut self.data, value);
    }

    /// Iterate over every ribbon the record holds.
    pub fn ribbons(&self) -> impl Iterator<Item = Ribbon> + '_ {
        Ribbon::ALL.iter().copied().filter(|&r| self.ribbon(r))
    }

    /// Read any bit of a ribbon group, assigned or not.
    ///
    /// # Panics
    ///
    /// Panics if `group` is [`RIBBON_GROUPS`](crate::ribbon::RIBBON_GROUPS) or more,
    /// or if `bit` is 8 or more.
    pub fn ribbon_bit(&self, group: usize, bit: u8) -> bool {
        assert!(bit < 8, "ribbon bit {bit} out of range");
        Flag::new(self.format.ribbon_offsets[group], bit).get(&self.data)
    }

    /// Number of ribbons held.
    pub fn ribbon_count(&self) -> usize {
        self.ribbons().count()
    }

    // Text

    /// Nickname.
    pub fn nickname(&self) -> String {
        self.read_text(self.format.nickname)
    }

    /// Set the nickname, truncating to the region's capacity.
    ///
    /// This does not touch the nicknamed flag.
    pub fn set_nickname(&mut self, value: &str) {
        self.write_text(self.format.nickname, value);
    }

    /// Original trainer name.
    pub fn trainer_name(&self) -> String {
        self.read_text(self.format.trainer_name)
    }

    /// Set the original trainer name, truncating to the region's capacity.
    pub fn set_trainer_name(&mut self, value: &str) {
        self.write_text(self.format.trainer_name, value);
    }

    /// Raw nickname bytes.
    pub fn nickname_trash(&self) -> &[u8] {
        self.format.nickname.slice(&self.data)
    }

    /// Raw original trainer name bytes.
    pub fn trainer_name_trash(&self) -> &[u8] {
        self.format.trainer_name.slice(&self.data)
    }

    fn read_text(&self, region: TextRegion) -> String {
        self.format
            .text
            .decode(region.slice(&self.data), region.max_chars)
    }

    fn write_text(&mut self, region: TextRegion, value: &str) {
        let dest = region.slice_mut(&mut self.data);
        self.format
            .text
            .encode(value, dest, region.max_chars, self.format.trash);
    }

    // Working view

    /// Battle stats, from the party region when the format has one.
    pub fn battle_stats(&self) -> BattleStats {
        match &self.format.party {
            Some(party) => party.read(&self.data, self.format.endian),
            None => self.working,
        }
    }

    /// Set the battle stats.
    pub fn set_battle_stats(&mut self, stats: BattleStats) {
        match &self.format.party {
            Some(party) => party.write(&mut self.data, self.format.endian, &stats),
            None => self.working = stats,
        }
    }

    /// Clear the battle stats.
    pub fn reset_party_stats(&mut self) {
        self.set_battle_stats(BattleStats::default());
    }

    /// Bytes with no known meaning, as `(offset, value)` pairs.
    pub fn reserved_bytes(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.format
            .reserved
            .iter()
            .map(|&offset| (offset, self.data[offset]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{BK4, PK4};
    use crate::ribbon::{RIBBON_GROUPS, UNUSED_RIBBON_BITS};
    use crate::Error;
    use proptest::prelude::*;

    fn populated(format: &'static FormatDescriptor) -> Entity {
        let mut entity = Entity::new(format);
        entity.set_pid(0x5A3C_91E7);
        entity.set_species(445);
        entity.set_held_item(234);
        entity.set_id32(0x1234_ABCD);
        entity.set_exp(1_250_000);
        entity.set_ev(crate::Stat::Spe, 252);
        entity.set_iv(crate::Stat::Atk, 31);
        entity.set_iv(crate::Stat::Spd, 17);
        entity.set_is_nicknamed(true);
        entity.set_nickname("Chomper");
        entity.set_trainer_name("Lucas");
        entity.set_ribbon(Ribbon::ChampionSinnoh, true);
        entity.set_ribbon(Ribbon::G4CuteMaster, true);
        entity.set_met_level(24);
        entity.set_ot_gender(1);
        entity.set_version(10);
        entity
    }

    #[test]
    fn test_new_record_is_placeholder() {
        let entity = Entity::new(&BK4);
        assert_eq!(entity.sanity(), 0x4000);
        assert_eq!(entity.species(), 0);
        assert_eq!(entity.data().len(), 136);
        assert!(entity.is_valid());
    }

    #[test]
    fn test_placeholder_valid_without_checksum() {
        let mut entity = Entity::new(&BK4);
        entity.set_species(1);
        assert!(!entity.checksum_valid());
        assert!(entity.is_valid());

        entity.set_species(600);
        assert!(!entity.is_valid());

        entity.set_sanity(0);
        entity.set_species(1);
        assert!(!entity.is_valid());
        entity.refresh_checksum();
        assert!(entity.is_valid());
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        for len in [0, 135, 137, 236] {
            assert!(matches!(
                Entity::from_bytes(&BK4, vec![0; len]),
                Err(Error::InvalidSize { .. })
            ));
        }
        assert!(Entity::decode(&PK4, &[0u8; 200]).is_err());
        assert!(Entity::from_bytes(&PK4, vec![0; 136]).is_ok());
    }

    #[test]
    fn test_bk4_is_big_endian() {
        let mut entity = Entity::new(&BK4);
        entity.set_species(0x01ED);
        entity.set_id32(0x0001_0002);
        assert_eq!(&entity.data()[0x08..0x0A], &[0x01, 0xED]);
        assert_eq!(entity.sid16(), 1);
        assert_eq!(entity.tid16(), 2);
        assert_eq!(&entity.data()[0x0C..0x10], &[0x00, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn test_bk4_encode_only_shuffles() {
        let mut entity = populated(&BK4);
        let stored = entity.encode();
        let mut sorted_stored = stored.clone();
        let mut sorted_data = entity.data().to_vec();
        sorted_stored.sort_unstable();
        sorted_data.sort_unstable();
        assert_eq!(sorted_stored, sorted_data);
        assert_eq!(&stored[..8], &entity.data()[..8]);
    }

    #[test]
    fn test_encode_refreshes_checksum() {
        let mut entity = populated(&PK4);
        assert!(!entity.checksum_valid());
        let stored = entity.encode();
        assert!(entity.checksum_valid());
        assert_eq!(Entity::peek_header(&PK4, &stored).unwrap(), entity.header());
    }

    #[test]
    fn test_round_trip_both_formats() {
        for format in [&BK4, &PK4] {
            let mut entity = populated(format);
            let stored = entity.encode();
            assert_eq!(stored.len(), 136);
            let decoded = Entity::decode(format, &stored).unwrap();
            assert_eq!(decoded.stored_data(), entity.stored_data());
            assert_eq!(decoded.nickname(), "Chomper");
            assert_eq!(decoded.trainer_name(), "Lucas");
            assert!(decoded.checksum_valid());
        }
    }

    #[test]
    fn test_party_round_trip() {
        let mut entity = populated(&PK4);
        let stats = BattleStats {
            level: 48,
            hp_current: 100,
            hp_max: 180,
            ..BattleStats::default()
        };
        entity.set_battle_stats(stats);
        let party = entity.encode_party();
        assert_eq!(party.len(), 236);
        let decoded = Entity::decode(&PK4, &party).unwrap();
        assert_eq!(decoded.battle_stats(), stats);
        assert_eq!(decoded.data(), entity.data());
    }

    #[test]
    fn test_stats_never_touch_checksum() {
        for format in [&BK4, &PK4] {
            let mut entity = populated(format);
            entity.refresh_checksum();
            entity.set_battle_stats(BattleStats {
                hp_current: 99,
                ..BattleStats::default()
            });
            assert!(entity.checksum_valid());
            assert_eq!(entity.battle_stats().hp_current, 99);
        }
    }

    #[test]
    fn test_corrupt_stored_bytes_decode() {
        let mut entity = populated(&PK4);
        let mut stored = entity.encode();
        stored[0x50] ^= 0xFF;
        let mut decoded = Entity::decode(&PK4, &stored).unwrap();
        assert!(!decoded.checksum_valid());
        // still a placeholder: sanity 0 and a known species
        assert!(decoded.is_valid());
        decoded.set_sanity(1);
        assert!(!decoded.is_valid());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = populated(&BK4);
        let mut copy = original.clone();
        copy.set_species(1);
        copy.set_ribbon(Ribbon::ChampionSinnoh, false);
        assert_eq!(original.species(), 445);
        assert!(original.ribbon(Ribbon::ChampionSinnoh));
    }

    #[test]
    fn test_ribbon_listing() {
        let entity = populated(&PK4);
        let held: Vec<_> = entity.ribbons().collect();
        assert_eq!(held, vec![Ribbon::ChampionSinnoh, Ribbon::G4CuteMaster]);
        assert_eq!(entity.ribbon_count(), 2);
    }

    #[test]
    fn test_ribbon_bit_reads_group_bytes() {
        let mut entity = Entity::new(&BK4);
        entity.data_mut()[0x27] = 0x01;
        entity.data_mut()[0x63] = 0x80;
        assert!(entity.ribbon_bit(0, 0));
        assert!(entity.ribbon_bit(11, 7));
        assert!(!entity.ribbon_bit(RIBBON_GROUPS - 1, 6));
    }

    #[test]
    #[should_panic]
    fn test_ribbon_bit_group_out_of_range() {
        Entity::new(&PK4).ribbon_bit(RIBBON_GROUPS, 0);
    }

    #[test]
    #[should_panic(expected = "ribbon bit 8 out of range")]
    fn test_ribbon_bit_index_out_of_range() {
        Entity::new(&PK4).ribbon_bit(0, 8);
    }

    proptest! {
        #[test]
        fn round_trip_preserves_every_byte(
            body in prop::collection::vec(any::<u8>(), 136),
            big in any::<bool>(),
        ) {
            let format = if big { &BK4 } else { &PK4 };
            let mut entity = Entity::from_slice(format, &body).unwrap();
            let stored = entity.encode();
            let decoded = Entity::decode(format, &stored).unwrap();
            prop_assert_eq!(decoded.stored_data(), entity.stored_data());
            prop_assert!(decoded.checksum_valid());

            // everything but the checksum is the caller's original input
            let mut expected = body.clone();
            expected[6..8].copy_from_slice(&decoded.data()[6..8]);
            prop_assert_eq!(decoded.stored_data(), &expected[..]);
        }

        #[test]
        fn unused_ribbon_bits_survive_ribbon_writes(
            body in prop::collection::vec(any::<u8>(), 136),
            index in 0usize..80,
            value in any::<bool>(),
        ) {
            let mut entity = Entity::from_slice(&BK4, &body).unwrap();
            let before: Vec<bool> = UNUSED_RIBBON_BITS
                .iter()
                .map(|&(g, b)| entity.ribbon_bit(g as usize, b))
                .collect();
            entity.set_ribbon(Ribbon::ALL[index], value);
            let after: Vec<bool> = UNUSED_RIBBON_BITS
                .iter()
                .map(|&(g, b)| entity.ribbon_bit(g as usize, b))
                .collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn reserved_bytes_survive_field_writes(
            body in prop::collection::vec(any::<u8>(), 136),
            value in any::<u32>(),
        ) {
            let mut entity = Entity::from_slice(&PK4, &body).unwrap();
            let before: Vec<_> = entity.reserved_bytes().collect();
            for &id in FieldId::ALL {
                entity.set(id, value);
            }
            entity.set_nickname("Trash");
            entity.set_trainer_name("Bytes");
            let after: Vec<_> = entity.reserved_bytes().collect();
            prop_assert_eq!(before, after);
        }
    }
}
