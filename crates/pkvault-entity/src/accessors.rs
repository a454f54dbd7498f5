//! Typed accessors over the field catalogue.
//!
//! Plain fields forward to [`Entity::get`]/[`Entity::set`]. The Gen 4
//! location and ball pairs are combined here: both formats carry a Diamond/
//! Pearl field and a Platinum/HGSS field for the same value.

use crate::entity::Entity;
use crate::layout::FieldId;
use crate::stats::{ContestStats, GameDate, MoveSlot, StatSet};

/// Legacy location meaning "a faraway place", used when the real location
/// only exists in the extended field.
pub const LOCATION_FARAWAY: u16 = 3002;

/// Poké Ball.
pub const BALL_POKE: u8 = 4;

/// Cherish Ball, the last ball DPPt can show.
pub const BALL_CHERISH: u8 = 16;

/// HeartGold version id.
pub const VERSION_HG: u8 = 7;

/// SoulSilver version id.
pub const VERSION_SS: u8 = 8;

/// One of the six stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    /// Hit points.
    Hp,
    /// Attack.
    Atk,
    /// Defense.
    Def,
    /// Speed.
    Spe,
    /// Special attack.
    Spa,
    /// Special defense.
    Spd,
}

impl Stat {
    /// All stats in storage order.
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Atk,
        Stat::Def,
        Stat::Spe,
        Stat::Spa,
        Stat::Spd,
    ];

    /// Effort value field.
    pub const fn ev(self) -> FieldId {
        match self {
            Stat::Hp => FieldId::EvHp,
            Stat::Atk => FieldId::EvAtk,
            Stat::Def => FieldId::EvDef,
            Stat::Spe => FieldId::EvSpe,
            Stat::Spa => FieldId::EvSpa,
            Stat::Spd => FieldId::EvSpd,
        }
    }

    /// Individual value field.
    pub const fn iv(self) -> FieldId {
        match self {
            Stat::Hp => FieldId::IvHp,
            Stat::Atk => FieldId::IvAtk,
            Stat::Def => FieldId::IvDef,
            Stat::Spe => FieldId::IvSpe,
            Stat::Spa => FieldId::IvSpa,
            Stat::Spd => FieldId::IvSpd,
        }
    }
}

const MOVES: [FieldId; 4] = [FieldId::Move1, FieldId::Move2, FieldId::Move3, FieldId::Move4];
const MOVE_PP: [FieldId; 4] = [
    FieldId::Move1Pp,
    FieldId::Move2Pp,
    FieldId::Move3Pp,
    FieldId::Move4Pp,
];
const MOVE_PP_UPS: [FieldId; 4] = [
    FieldId::Move1PpUps,
    FieldId::Move2PpUps,
    FieldId::Move3PpUps,
    FieldId::Move4PpUps,
];

/// Check whether a location only exists in the extended field.
const fn is_extended_location(location: u16) -> bool {
    matches!(location, 112..=1999 | 2011..=2999)
}

macro_rules! accessors {
    ($($get:ident / $set:ident: $ty:ty => $id:ident;)*) => {
        impl Entity {
            $(
                #[doc = concat!("Read the `", stringify!($id), "` field.")]
                #[inline]
                pub fn $get(&self) -> $ty {
                    self.value(FieldId::$id) as $ty
                }

                #[doc = concat!("Write the `", stringify!($id), "` field.")]
                #[inline]
                pub fn $set(&mut self, value: $ty) {
                    self.store(FieldId::$id, value as u32);
                }
            )*
        }
    };
}

accessors! {
    species / set_species: u16 => Species;
    held_item / set_held_item: u16 => HeldItem;
    id32 / set_id32: u32 => Id32;
    exp / set_exp: u32 => Exp;
    friendship / set_friendship: u8 => Friendship;
    ability / set_ability: u8 => Ability;
    markings / set_markings: u8 => Markings;
    language / set_language: u8 => Language;
    gender / set_gender: u8 => Gender;
    form / set_form: u8 => Form;
    shiny_leaf / set_shiny_leaf: u8 => ShinyLeaf;
    version / set_version: u8 => Version;
    pkrs_days / set_pkrs_days: u8 => PkrsDays;
    pkrs_strain / set_pkrs_strain: u8 => PkrsStrain;
    met_level / set_met_level: u8 => MetLevel;
    ot_gender / set_ot_gender: u8 => OtGender;
    ground_tile / set_ground_tile: u8 => GroundTile;
    pokeathlon_stat / set_pokeathlon_stat: u8 => PokeathlonStat;
}

impl Entity {
    // Flags

    /// Egg flag.
    pub fn is_egg(&self) -> bool {
        self.value(FieldId::IsEgg) != 0
    }

    /// Set the egg flag.
    pub fn set_is_egg(&mut self, value: bool) {
        self.store(FieldId::IsEgg, value as u32);
    }

    /// Nicknamed flag.
    pub fn is_nicknamed(&self) -> bool {
        self.value(FieldId::IsNicknamed) != 0
    }

    /// Set the nicknamed flag.
    pub fn set_is_nicknamed(&mut self, value: bool) {
        self.store(FieldId::IsNicknamed, value as u32);
    }

    /// Fateful encounter (event) flag.
    pub fn fateful_encounter(&self) -> bool {
        self.value(FieldId::FatefulEncounter) != 0
    }

    /// Set the fateful encounter flag.
    pub fn set_fateful_encounter(&mut self, value: bool) {
        self.store(FieldId::FatefulEncounter, value as u32);
    }

    // Identity

    /// Trainer ID, the low half of ID32.
    pub fn tid16(&self) -> u16 {
        self.id32() as u16
    }

    /// Set the trainer ID, keeping the secret ID.
    pub fn set_tid16(&mut self, value: u16) {
        self.set_id32((self.id32() & 0xFFFF_0000) | value as u32);
    }

    /// Secret ID, the high half of ID32.
    pub fn sid16(&self) -> u16 {
        (self.id32() >> 16) as u16
    }

    /// Set the secret ID, keeping the trainer ID.
    pub fn set_sid16(&mut self, value: u16) {
        self.set_id32((self.id32() & 0x0000_FFFF) | ((value as u32) << 16));
    }

    /// Nature, derived from the personality value.
    pub fn nature(&self) -> u8 {
        (self.pid() % 25) as u8
    }

    /// Shiny xor of the trainer IDs and both PID halves.
    pub fn shiny_xor(&self) -> u16 {
        let pid = self.pid();
        self.tid16() ^ self.sid16() ^ (pid >> 16) as u16 ^ pid as u16
    }

    /// Check whether the record is shiny.
    pub fn is_shiny(&self) -> bool {
        self.shiny_xor() < 8
    }

    /// Check whether the Pokérus strain is set.
    pub fn has_pokerus(&self) -> bool {
        self.pkrs_strain() != 0
    }

    // Stat sets

    /// Effort value for one stat.
    pub fn ev(&self, stat: Stat) -> u8 {
        self.value(stat.ev()) as u8
    }

    /// Set the effort value for one stat.
    pub fn set_ev(&mut self, stat: Stat, value: u8) {
        self.store(stat.ev(), value as u32);
    }

    /// Individual value for one stat, 0..=31.
    pub fn iv(&self, stat: Stat) -> u8 {
        self.value(stat.iv()) as u8
    }

    /// Set an individual value; values above 31 clamp to 31.
    pub fn set_iv(&mut self, stat: Stat, value: u8) {
        self.store(stat.iv(), value as u32);
    }

    /// All effort values.
    pub fn evs(&self) -> StatSet {
        StatSet::from_array(Stat::ALL.map(|s| self.ev(s)))
    }

    /// Set all effort values.
    pub fn set_evs(&mut self, evs: StatSet) {
        for (stat, value) in Stat::ALL.into_iter().zip(evs.to_array()) {
            self.set_ev(stat, value);
        }
    }

    /// All individual values.
    pub fn ivs(&self) -> StatSet {
        StatSet::from_array(Stat::ALL.map(|s| self.iv(s)))
    }

    /// Set all individual values, clamping each to 31.
    pub fn set_ivs(&mut self, ivs: StatSet) {
        for (stat, value) in Stat::ALL.into_iter().zip(ivs.to_array()) {
            self.set_iv(stat, value);
        }
    }

    /// Contest condition stats.
    pub fn contest_stats(&self) -> ContestStats {
        ContestStats {
            cool: self.value(FieldId::ContestCool) as u8,
            beauty: self.value(FieldId::ContestBeauty) as u8,
            cute: self.value(FieldId::ContestCute) as u8,
            smart: self.value(FieldId::ContestSmart) as u8,
            tough: self.value(FieldId::ContestTough) as u8,
            sheen: self.value(FieldId::ContestSheen) as u8,
        }
    }

    /// Set the contest condition stats.
    pub fn set_contest_stats(&mut self, stats: ContestStats) {
        self.store(FieldId::ContestCool, stats.cool as u32);
        self.store(FieldId::ContestBeauty, stats.beauty as u32);
        self.store(FieldId::ContestCute, stats.cute as u32);
        self.store(FieldId::ContestSmart, stats.smart as u32);
        self.store(FieldId::ContestTough, stats.tough as u32);
        self.store(FieldId::ContestSheen, stats.sheen as u32);
    }

    // Moves

    /// Move slot `index` (0..4).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 4 or more.
    pub fn move_slot(&self, index: usize) -> MoveSlot {
        MoveSlot {
            id: self.value(MOVES[index]) as u16,
            pp: self.value(MOVE_PP[index]) as u8,
            pp_ups: self.value(MOVE_PP_UPS[index]) as u8,
        }
    }

    /// Set move slot `index` (0..4).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 4 or more.
    pub fn set_move_slot(&mut self, index: usize, slot: MoveSlot) {
        self.store(MOVES[index], slot.id as u32);
        self.store(MOVE_PP[index], slot.pp as u32);
        self.store(MOVE_PP_UPS[index], slot.pp_ups as u32);
    }

    /// All four move slots.
    pub fn moves(&self) -> [MoveSlot; 4] {
        [0, 1, 2, 3].map(|i| self.move_slot(i))
    }

    // Dates

    /// Date the record was met.
    pub fn met_date(&self) -> GameDate {
        GameDate::new(
            self.value(FieldId::MetYear) as u8,
            self.value(FieldId::MetMonth) as u8,
            self.value(FieldId::MetDay) as u8,
        )
    }

    /// Set the met date.
    pub fn set_met_date(&mut self, date: GameDate) {
        self.store(FieldId::MetYear, date.year as u32);
        self.store(FieldId::MetMonth, date.month as u32);
        self.store(FieldId::MetDay, date.day as u32);
    }

    /// Date the egg was received.
    pub fn egg_date(&self) -> GameDate {
        GameDate::new(
            self.value(FieldId::EggYear) as u8,
            self.value(FieldId::EggMonth) as u8,
            self.value(FieldId::EggDay) as u8,
        )
    }

    /// Set the egg date.
    pub fn set_egg_date(&mut self, date: GameDate) {
        self.store(FieldId::EggYear, date.year as u32);
        self.store(FieldId::EggMonth, date.month as u32);
        self.store(FieldId::EggDay, date.day as u32);
    }

    // Locations

    /// Met location: the extended value when set, else the legacy one.
    pub fn met_location(&self) -> u16 {
        self.location(FieldId::MetLocationLegacy, FieldId::MetLocationExtended)
    }

    /// Set the met location, splitting it across the legacy and extended fields.
    pub fn set_met_location(&mut self, value: u16) {
        self.set_location(FieldId::MetLocationLegacy, FieldId::MetLocationExtended, value);
    }

    /// Egg location: the extended value when set, else the legacy one.
    pub fn egg_location(&self) -> u16 {
        self.location(FieldId::EggLocationLegacy, FieldId::EggLocationExtended)
    }

    /// Set the egg location, splitting it across the legacy and extended fields.
    pub fn set_egg_location(&mut self, value: u16) {
        self.set_location(FieldId::EggLocationLegacy, FieldId::EggLocationExtended, value);
    }

    fn location(&self, legacy: FieldId, extended: FieldId) -> u16 {
        match self.value(extended) as u16 {
            0 => self.value(legacy) as u16,
            value => value,
        }
    }

    fn set_location(&mut self, legacy: FieldId, extended: FieldId, value: u16) {
        let (legacy_value, extended_value) = match value {
            0 => (0, 0),
            v if is_extended_location(v) => (LOCATION_FARAWAY, v),
            v => (v, 0),
        };
        self.store(legacy, legacy_value as u32);
        self.store(extended, extended_value as u32);
    }

    // Ball

    /// Ball: the larger of the DPPt and HGSS values.
    pub fn ball(&self) -> u8 {
        let dppt = self.value(FieldId::BallDppt) as u8;
        let hgss = self.value(FieldId::BallHgss) as u8;
        dppt.max(hgss)
    }

    /// Set the ball.
    ///
    /// DPPt cannot show balls past Cherish and falls back to a Poké Ball. The
    /// HGSS value is only kept for non-event HeartGold/SoulSilver records.
    pub fn set_ball(&mut self, value: u8) {
        let dppt = if value <= BALL_CHERISH { value } else { BALL_POKE };
        let hgss_origin = matches!(self.version(), VERSION_HG | VERSION_SS);
        let hgss = if hgss_origin && !self.fateful_encounter() {
            value
        } else {
            0
        };
        self.store(FieldId::BallDppt, dppt as u32);
        self.store(FieldId::BallHgss, hgss as u32);
    }
}
