//! Ribbon flag table.
//!
//! Ribbons are independent booleans packed eight to a byte across twelve
//! ribbon bytes. A ribbon's discriminant encodes its position: the high bits
//! pick the ribbon group and the low three bits the bit within that group's
//! byte. Where each group byte lives is a per-format detail (BK4 stores the
//! first eight groups byte-reversed), so a [`Ribbon`] resolves to a concrete
//! [`Flag`] only through a format's group offsets.
//!
//! Bits that carry no ribbon are left untouched by every ribbon write.

use pkvault_common::Flag;

/// Number of ribbon bytes.
pub const RIBBON_GROUPS: usize = 12;

/// Byte offset of each ribbon group, indexed by group number.
pub type RibbonOffsets = [usize; RIBBON_GROUPS];

/// Group bytes of the DS format, in group order.
pub const PK4_RIBBON_OFFSETS: RibbonOffsets = [
    0x24, 0x25, 0x26, 0x27, 0x3C, 0x3D, 0x3E, 0x3F, 0x60, 0x61, 0x62, 0x63,
];

/// Group bytes of the Battle Revolution format; the first two words are
/// stored big-endian, which reverses their byte order.
pub const BK4_RIBBON_OFFSETS: RibbonOffsets = [
    0x27, 0x26, 0x25, 0x24, 0x3F, 0x3E, 0x3D, 0x3C, 0x60, 0x61, 0x62, 0x63,
];

/// Positions `(group, bit)` that carry no ribbon.
pub const UNUSED_RIBBON_BITS: &[(u8, u8)] = &[
    (3, 4),
    (3, 5),
    (3, 6),
    (3, 7),
    (10, 4),
    (10, 5),
    (10, 6),
    (10, 7),
    (11, 0),
    (11, 1),
    (11, 2),
    (11, 3),
    (11, 4),
    (11, 5),
    (11, 6),
    (11, 7),
];

macro_rules! ribbons {
    ($($id:ident = $pos:literal => $name:literal,)*) => {
        /// A ribbon achievement flag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum Ribbon {
            $($id = $pos,)*
        }

        impl Ribbon {
            /// Every ribbon, in position order.
            pub const ALL: &'static [Ribbon] = &[$(Ribbon::$id,)*];

            /// Get the name of this ribbon.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Ribbon::$id => $name,)*
                }
            }
        }
    };
}

ribbons! {
    // Sinnoh 1
    ChampionSinnoh = 0 => "RibbonChampionSinnoh",
    Ability = 1 => "RibbonAbility",
    AbilityGreat = 2 => "RibbonAbilityGreat",
    AbilityDouble = 3 => "RibbonAbilityDouble",
    AbilityMulti = 4 => "RibbonAbilityMulti",
    AbilityPair = 5 => "RibbonAbilityPair",
    AbilityWorld = 6 => "RibbonAbilityWorld",
    Alert = 7 => "RibbonAlert",
    // Sinnoh 2
    Shock = 8 => "RibbonShock",
    Downcast = 9 => "RibbonDowncast",
    Careless = 10 => "RibbonCareless",
    Relax = 11 => "RibbonRelax",
    Snooze = 12 => "RibbonSnooze",
    Smile = 13 => "RibbonSmile",
    Gorgeous = 14 => "RibbonGorgeous",
    Royal = 15 => "RibbonRoyal",
    // Unova 1
    GorgeousRoyal = 16 => "RibbonGorgeousRoyal",
    Footprint = 17 => "RibbonFootprint",
    Record = 18 => "RibbonRecord",
    Event = 19 => "RibbonEvent",
    Legend = 20 => "RibbonLegend",
    ChampionWorld = 21 => "RibbonChampionWorld",
    Birthday = 22 => "RibbonBirthday",
    Special = 23 => "RibbonSpecial",
    // Unova 2
    Souvenir = 24 => "RibbonSouvenir",
    Wishing = 25 => "RibbonWishing",
    Classic = 26 => "RibbonClassic",
    Premier = 27 => "RibbonPremier",
    // Hoenn 1a
    G3Cool = 32 => "RibbonG3Cool",
    G3CoolSuper = 33 => "RibbonG3CoolSuper",
    G3CoolHyper = 34 => "RibbonG3CoolHyper",
    G3CoolMaster = 35 => "RibbonG3CoolMaster",
    G3Beauty = 36 => "RibbonG3Beauty",
    G3BeautySuper = 37 => "RibbonG3BeautySuper",
    G3BeautyHyper = 38 => "RibbonG3BeautyHyper",
    G3BeautyMaster = 39 => "RibbonG3BeautyMaster",
    // Hoenn 1b
    G3Cute = 40 => "RibbonG3Cute",
    G3CuteSuper = 41 => "RibbonG3CuteSuper",
    G3CuteHyper = 42 => "RibbonG3CuteHyper",
    G3CuteMaster = 43 => "RibbonG3CuteMaster",
    G3Smart = 44 => "RibbonG3Smart",
    G3SmartSuper = 45 => "RibbonG3SmartSuper",
    G3SmartHyper = 46 => "RibbonG3SmartHyper",
    G3SmartMaster = 47 => "RibbonG3SmartMaster",
    // Hoenn 2a
    G3Tough = 48 => "RibbonG3Tough",
    G3ToughSuper = 49 => "RibbonG3ToughSuper",
    G3ToughHyper = 50 => "RibbonG3ToughHyper",
    G3ToughMaster = 51 => "RibbonG3ToughMaster",
    ChampionG3 = 52 => "RibbonChampionG3",
    Winning = 53 => "RibbonWinning",
    Victory = 54 => "RibbonVictory",
    Artist = 55 => "RibbonArtist",
    // Hoenn 2b
    Effort = 56 => "RibbonEffort",
    ChampionBattle = 57 => "RibbonChampionBattle",
    ChampionRegional = 58 => "RibbonChampionRegional",
    ChampionNational = 59 => "RibbonChampionNational",
    Country = 60 => "RibbonCountry",
    National = 61 => "RibbonNational",
    Earth = 62 => "RibbonEarth",
    World = 63 => "RibbonWorld",
    // Sinnoh 3
    G4Cool = 64 => "RibbonG4Cool",
    G4CoolGreat = 65 => "RibbonG4CoolGreat",
    G4CoolUltra = 66 => "RibbonG4CoolUltra",
    G4CoolMaster = 67 => "RibbonG4CoolMaster",
    G4Beauty = 68 => "RibbonG4Beauty",
    G4BeautyGreat = 69 => "RibbonG4BeautyGreat",
    G4BeautyUltra = 70 => "RibbonG4BeautyUltra",
    G4BeautyMaster = 71 => "RibbonG4BeautyMaster",
    // Sinnoh 4
    G4Cute = 72 => "RibbonG4Cute",
    G4CuteGreat = 73 => "RibbonG4CuteGreat",
    G4CuteUltra = 74 => "RibbonG4CuteUltra",
    G4CuteMaster = 75 => "RibbonG4CuteMaster",
    G4Smart = 76 => "RibbonG4Smart",
    G4SmartGreat = 77 => "RibbonG4SmartGreat",
    G4SmartUltra = 78 => "RibbonG4SmartUltra",
    G4SmartMaster = 79 => "RibbonG4SmartMaster",
    // Sinnoh 5
    G4Tough = 80 => "RibbonG4Tough",
    G4ToughGreat = 81 => "RibbonG4ToughGreat",
    G4ToughUltra = 82 => "RibbonG4ToughUltra",
    G4ToughMaster = 83 => "RibbonG4ToughMaster",
}

impl Ribbon {
    /// Ribbon group (byte index into the group offsets).
    #[inline]
    pub const fn group(self) -> usize {
        (self as u8 >> 3) as usize
    }

    /// Bit within the group byte.
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8 & 7
    }

    /// Resolve to a concrete flag for a format's group offsets.
    #[inline]
    pub const fn flag(self, offsets: &RibbonOffsets) -> Flag {
        Flag::new(offsets[self.group()], self.bit())
    }
}

impl std::fmt::Display for Ribbon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
