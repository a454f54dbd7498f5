//! Aggregate value types and the battle-stat working view.
//!
//! Battle stats are derived values. Formats with a party region persist them
//! past the stored size (see [`PartyLayout`]); the others hold them in memory
//! only. Either way they sit outside the checksum range and are never part of
//! the stored form.

use pkvault_common::{Endian, Field};

/// Battle stats computed when a record enters a battle context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    /// Status condition bits.
    pub status_condition: u32,
    /// Current level.
    pub level: u8,
    /// Current HP.
    pub hp_current: u16,
    /// Maximum HP.
    pub hp_max: u16,
    /// Attack.
    pub atk: u16,
    /// Defense.
    pub def: u16,
    /// Speed.
    pub spe: u16,
    /// Special attack.
    pub spa: u16,
    /// Special defense.
    pub spd: u16,
}

/// Where a format persists [`BattleStats`] in its party region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartyLayout {
    /// Status condition bits, 32 bits wide.
    pub status_condition: Field,
    /// Current level.
    pub level: Field,
    /// Current HP.
    pub hp_current: Field,
    /// Maximum HP.
    pub hp_max: Field,
    /// Attack.
    pub atk: Field,
    /// Defense.
    pub def: Field,
    /// Speed.
    pub spe: Field,
    /// Special attack.
    pub spa: Field,
    /// Special defense.
    pub spd: Field,
}

impl PartyLayout {
    /// Fields in declaration order.
    pub const fn fields(&self) -> [Field; 9] {
        [
            self.status_condition,
            self.level,
            self.hp_current,
            self.hp_max,
            self.atk,
            self.def,
            self.spe,
            self.spa,
            self.spd,
        ]
    }

    /// Read the stats from a party buffer.
    pub fn read(&self, data: &[u8], endian: Endian) -> BattleStats {
        BattleStats {
            status_condition: self.status_condition.read(data, endian),
            level: self.level.read(data, endian) as u8,
            hp_current: self.hp_current.read(data, endian) as u16,
            hp_max: self.hp_max.read(data, endian) as u16,
            atk: self.atk.read(data, endian) as u16,
            def: self.def.read(data, endian) as u16,
            spe: self.spe.read(data, endian) as u16,
            spa: self.spa.read(data, endian) as u16,
            spd: self.spd.read(data, endian) as u16,
        }
    }

    /// Write the stats into a party buffer.
    pub fn write(&self, data: &mut [u8], endian: Endian, stats: &BattleStats) {
        self.status_condition.write(data, endian, stats.status_condition);
        self.level.write(data, endian, stats.level as u32);
        self.hp_current.write(data, endian, stats.hp_current as u32);
        self.hp_max.write(data, endian, stats.hp_max as u32);
        self.atk.write(data, endian, stats.atk as u32);
        self.def.write(data, endian, stats.def as u32);
        self.spe.write(data, endian, stats.spe as u32);
        self.spa.write(data, endian, stats.spa as u32);
        self.spd.write(data, endian, stats.spd as u32);
    }
}

/// Party region of the DS format.
pub const PK4_PARTY: PartyLayout = PartyLayout {
    status_condition: Field::u32(0x88),
    level: Field::u8(0x8C),
    // 0x8D seal capsule index
    hp_current: Field::u16(0x8E),
    hp_max: Field::u16(0x90),
    atk: Field::u16(0x92),
    def: Field::u16(0x94),
    spe: Field::u16(0x96),
    spa: Field::u16(0x98),
    spd: Field::u16(0x9A),
};

/// One value per stat, used for EVs and IVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSet {
    /// HP.
    pub hp: u8,
    /// Attack.
    pub atk: u8,
    /// Defense.
    pub def: u8,
    /// Speed.
    pub spe: u8,
    /// Special attack.
    pub spa: u8,
    /// Special defense.
    pub spd: u8,
}

impl StatSet {
    /// Values in HP, ATK, DEF, SPE, SPA, SPD order.
    pub const fn to_array(&self) -> [u8; 6] {
        [self.hp, self.atk, self.def, self.spe, self.spa, self.spd]
    }

    /// Build from HP, ATK, DEF, SPE, SPA, SPD order.
    pub const fn from_array(values: [u8; 6]) -> Self {
        Self {
            hp: values[0],
            atk: values[1],
            def: values[2],
            spe: values[3],
            spa: values[4],
            spd: values[5],
        }
    }

    /// Sum of all six values.
    pub fn total(&self) -> u32 {
        self.to_array().iter().map(|&v| v as u32).sum()
    }
}

/// Contest condition stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContestStats {
    /// Coolness.
    pub cool: u8,
    /// Beauty.
    pub beauty: u8,
    /// Cuteness.
    pub cute: u8,
    /// Smartness.
    pub smart: u8,
    /// Toughness.
    pub tough: u8,
    /// Sheen, which caps how much more condition can be gained.
    pub sheen: u8,
}

/// One move slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    /// Move ordinal, 0 = empty.
    pub id: u16,
    /// Remaining PP.
    pub pp: u8,
    /// PP-ups applied.
    pub pp_ups: u8,
}

impl MoveSlot {
    /// Check if the slot is empty.
    pub const fn is_empty(&self) -> bool {
        self.id == 0
    }
}

/// A met or egg date as stored: year offset from 2000, month, day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameDate {
    /// Years since 2000.
    pub year: u8,
    /// Month of the year.
    pub month: u8,
    /// Day of the month.
    pub day: u8,
}

impl GameDate {
    /// Create a date.
    pub const fn new(year: u8, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Check whether the date is unset.
    pub const fn is_empty(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// Full calendar year.
    pub const fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }
}

impl std::fmt::Display for GameDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.full_year(), self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_layout_round_trip() {
        let stats = BattleStats {
            status_condition: 0x40,
            level: 50,
            hp_current: 120,
            hp_max: 150,
            atk: 90,
            def: 80,
            spe: 110,
            spa: 70,
            spd: 60,
        };
        let mut data = vec![0u8; 0xEC];
        PK4_PARTY.write(&mut data, Endian::Little, &stats);
        assert_eq!(PK4_PARTY.read(&data, Endian::Little), stats);
        assert_eq!(data[0x8C], 50);
        assert_eq!(&data[0x8E..0x90], &[120, 0]);
    }

    #[test]
    fn test_party_fields_past_stored_size() {
        assert!(PK4_PARTY.fields().iter().all(|f| f.offset >= 0x88));
    }

    #[test]
    fn test_stat_set_array() {
        let set = StatSet::from_array([1, 2, 3, 4, 5, 6]);
        assert_eq!(set.spe, 4);
        assert_eq!(set.to_array(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(set.total(), 21);
    }

    #[test]
    fn test_game_date_display() {
        assert_eq!(GameDate::new(8, 3, 14).to_string(), "2008-03-14");
        assert!(GameDate::default().is_empty());
    }
}
