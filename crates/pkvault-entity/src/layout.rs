//! Field catalogue and per-format offset tables.
//!
//! [`FieldId`] names every numeric field an entity format may carry. A format
//! maps each id to a [`FieldSpec`] through its `fields` function, or to `None`
//! when it has no such field. Conversion between formats walks this catalogue.
//!
//! The two Gen 4 formats share offsets for every whole field. They differ in
//! byte order (handled by the descriptor) and in how the bit-packed words are
//! arranged, which is why the IV word, the 0x40 flags byte and the 0x84 met
//! byte are listed separately per format.

use pkvault_common::{BitField, Endian, Field};

/// Location and shape of one catalogued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSpec {
    /// A whole 1, 2 or 4 byte integer.
    Whole(Field),
    /// Bits inside a shared word.
    Bits(BitField),
}

impl FieldSpec {
    /// Largest value the field can hold.
    #[inline]
    pub const fn max(&self) -> u32 {
        match self {
            Self::Whole(field) => field.width.max(),
            Self::Bits(bits) => bits.max(),
        }
    }

    /// The enclosing word or field.
    #[inline]
    pub const fn storage(&self) -> Field {
        match self {
            Self::Whole(field) => *field,
            Self::Bits(bits) => bits.word,
        }
    }

    /// Read the value.
    #[inline]
    pub fn read(&self, data: &[u8], endian: Endian) -> u32 {
        match self {
            Self::Whole(field) => field.read(data, endian),
            Self::Bits(bits) => bits.read(data, endian),
        }
    }

    /// Write the value.
    ///
    /// Whole fields truncate; bit fields mask or saturate per their
    /// [`Overflow`](pkvault_common::Overflow) policy.
    #[inline]
    pub fn write(&self, data: &mut [u8], endian: Endian, value: u32) {
        match self {
            Self::Whole(field) => field.write(data, endian, value),
            Self::Bits(bits) => bits.write(data, endian, value),
        }
    }
}

macro_rules! field_ids {
    ($($(#[$meta:meta])* $id:ident => $name:literal,)*) => {
        /// Identifier of a catalogued entity field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum FieldId {
            $($(#[$meta])* $id,)*
        }

        impl FieldId {
            /// Every field, in catalogue order.
            pub const ALL: &'static [FieldId] = &[$(FieldId::$id,)*];

            /// Get the name of this field.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(FieldId::$id => $name,)*
                }
            }
        }
    };
}

field_ids! {
    /// Personality value.
    Pid => "PID",
    Species => "Species",
    HeldItem => "HeldItem",
    /// Combined trainer ID, SID in the high half.
    Id32 => "ID32",
    Exp => "EXP",
    Friendship => "OriginalTrainerFriendship",
    Ability => "Ability",
    Markings => "Markings",
    Language => "Language",
    EvHp => "EV_HP",
    EvAtk => "EV_ATK",
    EvDef => "EV_DEF",
    EvSpe => "EV_SPE",
    EvSpa => "EV_SPA",
    EvSpd => "EV_SPD",
    ContestCool => "ContestCool",
    ContestBeauty => "ContestBeauty",
    ContestCute => "ContestCute",
    ContestSmart => "ContestSmart",
    ContestTough => "ContestTough",
    ContestSheen => "ContestSheen",
    Move1 => "Move1",
    Move2 => "Move2",
    Move3 => "Move3",
    Move4 => "Move4",
    Move1Pp => "Move1_PP",
    Move2Pp => "Move2_PP",
    Move3Pp => "Move3_PP",
    Move4Pp => "Move4_PP",
    Move1PpUps => "Move1_PPUps",
    Move2PpUps => "Move2_PPUps",
    Move3PpUps => "Move3_PPUps",
    Move4PpUps => "Move4_PPUps",
    IvHp => "IV_HP",
    IvAtk => "IV_ATK",
    IvDef => "IV_DEF",
    IvSpe => "IV_SPE",
    IvSpa => "IV_SPA",
    IvSpd => "IV_SPD",
    IsEgg => "IsEgg",
    IsNicknamed => "IsNicknamed",
    FatefulEncounter => "FatefulEncounter",
    Gender => "Gender",
    Form => "Form",
    ShinyLeaf => "ShinyLeaf",
    /// Pt/HGSS egg location.
    EggLocationExtended => "EggLocationExtended",
    /// Pt/HGSS met location.
    MetLocationExtended => "MetLocationExtended",
    Version => "Version",
    EggYear => "EggYear",
    EggMonth => "EggMonth",
    EggDay => "EggDay",
    MetYear => "MetYear",
    MetMonth => "MetMonth",
    MetDay => "MetDay",
    /// Diamond/Pearl egg location.
    EggLocationLegacy => "EggLocationDP",
    /// Diamond/Pearl met location.
    MetLocationLegacy => "MetLocationDP",
    PkrsDays => "PKRS_Days",
    PkrsStrain => "PKRS_Strain",
    /// Ball shown by DPPt.
    BallDppt => "BallDPPt",
    MetLevel => "MetLevel",
    OtGender => "OriginalTrainerGender",
    GroundTile => "GroundTile",
    /// Ball shown by HGSS.
    BallHgss => "BallHGSS",
    PokeathlonStat => "PokeathlonStat",
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Offsets shared by every Gen 4 format.
fn gen4_common(id: FieldId) -> Option<FieldSpec> {
    use FieldId::*;

    let field = match id {
        Pid => Field::u32(0x00),
        Species => Field::u16(0x08),
        HeldItem => Field::u16(0x0A),
        Id32 => Field::u32(0x0C),
        Exp => Field::u32(0x10),
        Friendship => Field::u8(0x14),
        Ability => Field::u8(0x15),
        Markings => Field::u8(0x16),
        Language => Field::u8(0x17),
        EvHp => Field::u8(0x18),
        EvAtk => Field::u8(0x19),
        EvDef => Field::u8(0x1A),
        EvSpe => Field::u8(0x1B),
        EvSpa => Field::u8(0x1C),
        EvSpd => Field::u8(0x1D),
        ContestCool => Field::u8(0x1E),
        ContestBeauty => Field::u8(0x1F),
        ContestCute => Field::u8(0x20),
        ContestSmart => Field::u8(0x21),
        ContestTough => Field::u8(0x22),
        ContestSheen => Field::u8(0x23),
        // 0x24-0x27 ribbons
        Move1 => Field::u16(0x28),
        Move2 => Field::u16(0x2A),
        Move3 => Field::u16(0x2C),
        Move4 => Field::u16(0x2E),
        Move1Pp => Field::u8(0x30),
        Move2Pp => Field::u8(0x31),
        Move3Pp => Field::u8(0x32),
        Move4Pp => Field::u8(0x33),
        Move1PpUps => Field::u8(0x34),
        Move2PpUps => Field::u8(0x35),
        Move3PpUps => Field::u8(0x36),
        Move4PpUps => Field::u8(0x37),
        // 0x38 IV word, 0x3C-0x3F ribbons, 0x40 flags byte
        ShinyLeaf => Field::u8(0x41),
        // 0x42-0x43 unused
        EggLocationExtended => Field::u16(0x44),
        MetLocationExtended => Field::u16(0x46),
        // 0x48-0x5D nickname, 0x5E unused
        Version => Field::u8(0x5F),
        // 0x60-0x63 ribbons, 0x64-0x67 unused, 0x68-0x77 OT name
        EggYear => Field::u8(0x78),
        EggMonth => Field::u8(0x79),
        EggDay => Field::u8(0x7A),
        MetYear => Field::u8(0x7B),
        MetMonth => Field::u8(0x7C),
        MetDay => Field::u8(0x7D),
        EggLocationLegacy => Field::u16(0x7E),
        MetLocationLegacy => Field::u16(0x80),
        PkrsDays => return Some(FieldSpec::Bits(BitField::masked(Field::u8(0x82), 0, 4))),
        PkrsStrain => return Some(FieldSpec::Bits(BitField::masked(Field::u8(0x82), 4, 4))),
        BallDppt => Field::u8(0x83),
        // 0x84 met level / OT gender
        GroundTile => Field::u8(0x85),
        BallHgss => Field::u8(0x86),
        PokeathlonStat => Field::u8(0x87),
        _ => return None,
    };
    Some(FieldSpec::Whole(field))
}

const IV_WORD: Field = Field::u32(0x38);
const FLAGS_BYTE: Field = Field::u8(0x40);
const MET_BYTE: Field = Field::u8(0x84);

/// Field table of the Battle Revolution (BK4) format.
pub fn bk4_field(id: FieldId) -> Option<FieldSpec> {
    use FieldId::*;

    let bits = match id {
        IvHp => BitField::saturating(IV_WORD, 27, 5),
        IvAtk => BitField::saturating(IV_WORD, 22, 5),
        IvDef => BitField::saturating(IV_WORD, 17, 5),
        IvSpe => BitField::saturating(IV_WORD, 12, 5),
        IvSpa => BitField::saturating(IV_WORD, 7, 5),
        IvSpd => BitField::saturating(IV_WORD, 2, 5),
        IsEgg => BitField::masked(IV_WORD, 1, 1),
        IsNicknamed => BitField::masked(IV_WORD, 0, 1),
        FatefulEncounter => BitField::masked(FLAGS_BYTE, 7, 1),
        Gender => BitField::masked(FLAGS_BYTE, 5, 2),
        Form => BitField::masked(FLAGS_BYTE, 0, 5),
        MetLevel => BitField::masked(MET_BYTE, 1, 7),
        OtGender => BitField::masked(MET_BYTE, 0, 1),
        _ => return gen4_common(id),
    };
    Some(FieldSpec::Bits(bits))
}

/// Field table of the DS (PK4) format.
pub fn pk4_field(id: FieldId) -> Option<FieldSpec> {
    use FieldId::*;

    let bits = match id {
        IvHp => BitField::saturating(IV_WORD, 0, 5),
        IvAtk => BitField::saturating(IV_WORD, 5, 5),
        IvDef => BitField::saturating(IV_WORD, 10, 5),
        IvSpe => BitField::saturating(IV_WORD, 15, 5),
        IvSpa => BitField::saturating(IV_WORD, 20, 5),
        IvSpd => BitField::saturating(IV_WORD, 25, 5),
        IsEgg => BitField::masked(IV_WORD, 30, 1),
        IsNicknamed => BitField::masked(IV_WORD, 31, 1),
        FatefulEncounter => BitField::masked(FLAGS_BYTE, 0, 1),
        Gender => BitField::masked(FLAGS_BYTE, 1, 2),
        Form => BitField::masked(FLAGS_BYTE, 3, 5),
        MetLevel => BitField::masked(MET_BYTE, 0, 7),
        OtGender => BitField::masked(MET_BYTE, 7, 1),
        _ => return gen4_common(id),
    };
    Some(FieldSpec::Bits(bits))
}
