//! Byte-field access over fixed offsets.
//!
//! Entity records are flat byte buffers whose layout is fixed by an external
//! format. This module provides the addressing primitives every record type is
//! built from:
//!
//! - [`Field`] - a whole 1, 2 or 4 byte unsigned integer at a fixed offset
//! - [`BitField`] - a run of bits inside a wider word, sharing that word with
//!   unrelated neighbours
//! - [`Flag`] - a single bit inside one byte
//!
//! None of these hold state; they describe where a value lives and operate on
//! the buffer passed in. Multi-byte reads and writes take the [`Endian`] of the
//! owning format.
//!
//! # Example
//!
//! ```
//! use pkvault_common::{BitField, Endian, Field, Flag};
//!
//! let mut data = [0u8; 8];
//! let exp = Field::u32(0x00);
//! exp.write(&mut data, Endian::Big, 0x0001_2345);
//! assert_eq!(&data[..4], &[0x00, 0x01, 0x23, 0x45]);
//!
//! // 5-bit value saturates instead of wrapping
//! let iv = BitField::saturating(Field::u32(0x04), 27, 5);
//! iv.write(&mut data, Endian::Big, 40);
//! assert_eq!(iv.read(&data, Endian::Big), 31);
//!
//! let flag = Flag::new(0x00, 7);
//! flag.set(&mut data, true);
//! assert!(flag.get(&data));
//! ```

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Byte order of multi-byte fields.
///
/// This is a per-format constant: every multi-byte field of a given format
/// uses the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl Endian {
    /// Read a u16 at `offset`.
    #[inline]
    pub fn read_u16(self, data: &[u8], offset: usize) -> u16 {
        let bytes = &data[offset..offset + 2];
        match self {
            Self::Little => LittleEndian::read_u16(bytes),
            Self::Big => BigEndian::read_u16(bytes),
        }
    }

    /// Read a u32 at `offset`.
    #[inline]
    pub fn read_u32(self, data: &[u8], offset: usize) -> u32 {
        let bytes = &data[offset..offset + 4];
        match self {
            Self::Little => LittleEndian::read_u32(bytes),
            Self::Big => BigEndian::read_u32(bytes),
        }
    }

    /// Write a u16 at `offset`.
    #[inline]
    pub fn write_u16(self, data: &mut [u8], offset: usize, value: u16) {
        let bytes = &mut data[offset..offset + 2];
        match self {
            Self::Little => LittleEndian::write_u16(bytes, value),
            Self::Big => BigEndian::write_u16(bytes, value),
        }
    }

    /// Write a u32 at `offset`.
    #[inline]
    pub fn write_u32(self, data: &mut [u8], offset: usize, value: u32) {
        let bytes = &mut data[offset..offset + 4];
        match self {
            Self::Little => LittleEndian::write_u32(bytes, value),
            Self::Big => BigEndian::write_u32(bytes, value),
        }
    }

    /// Get the name of this byte order.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Little => "little-endian",
            Self::Big => "big-endian",
        }
    }
}

impl std::fmt::Display for Endian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage width of a whole field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Width {
    /// One byte.
    U8 = 1,
    /// Two bytes.
    U16 = 2,
    /// Four bytes.
    U32 = 4,
}

impl Width {
    /// Size in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Size in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        (self as u32) * 8
    }

    /// Largest value the width can hold.
    #[inline]
    pub const fn max(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }
}

/// A whole unsigned integer at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Byte offset from the start of the buffer.
    pub offset: usize,
    /// Storage width.
    pub width: Width,
}

impl Field {
    /// A one-byte field.
    pub const fn u8(offset: usize) -> Self {
        Self {
            offset,
            width: Width::U8,
        }
    }

    /// A two-byte field.
    pub const fn u16(offset: usize) -> Self {
        Self {
            offset,
            width: Width::U16,
        }
    }

    /// A four-byte field.
    pub const fn u32(offset: usize) -> Self {
        Self {
            offset,
            width: Width::U32,
        }
    }

    /// Offset one past the last byte of the field.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.width.bytes()
    }

    /// Read the field, widened to u32.
    ///
    /// Panics if the field lies outside `data`; use [`Field::try_read`] when
    /// the buffer length is not already known to cover the layout.
    #[inline]
    pub fn read(&self, data: &[u8], endian: Endian) -> u32 {
        match self.width {
            Width::U8 => data[self.offset] as u32,
            Width::U16 => endian.read_u16(data, self.offset) as u32,
            Width::U32 => endian.read_u32(data, self.offset),
        }
    }

    /// Write the field, truncating `value` to the field width.
    #[inline]
    pub fn write(&self, data: &mut [u8], endian: Endian, value: u32) {
        match self.width {
            Width::U8 => data[self.offset] = value as u8,
            Width::U16 => endian.write_u16(data, self.offset, value as u16),
            Width::U32 => endian.write_u32(data, self.offset, value),
        }
    }

    /// Read the field after checking it fits in `data`.
    pub fn try_read(&self, data: &[u8], endian: Endian) -> Result<u32> {
        self.check_bounds(data.len())?;
        Ok(self.read(data, endian))
    }

    /// Check that the field fits in a buffer of `len` bytes.
    pub fn check_bounds(&self, len: usize) -> Result<()> {
        if self.end() > len {
            return Err(Error::FieldOutOfBounds {
                offset: self.offset,
                width: self.width.bytes(),
                len,
            });
        }
        Ok(())
    }
}

/// What a [`BitField`] does with a value wider than its bit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Keep only the low bits.
    Mask,
    /// Clamp to the largest representable value.
    Saturate,
}

/// A run of bits inside a wider word.
///
/// Writes preserve every bit of the word outside `mask << shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    /// The word the bits live in.
    pub word: Field,
    /// Position of the lowest bit.
    pub shift: u32,
    /// Number of bits.
    pub bits: u32,
    /// Handling of out-of-range writes.
    pub overflow: Overflow,
}

impl BitField {
    /// A bit field that masks oversized values.
    pub const fn masked(word: Field, shift: u32, bits: u32) -> Self {
        Self {
            word,
            shift,
            bits,
            overflow: Overflow::Mask,
        }
    }

    /// A bit field that clamps oversized values to its maximum.
    pub const fn saturating(word: Field, shift: u32, bits: u32) -> Self {
        Self {
            word,
            shift,
            bits,
            overflow: Overflow::Saturate,
        }
    }

    /// Unshifted mask of the field.
    #[inline]
    pub const fn mask(&self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.bits) - 1
        }
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max(&self) -> u32 {
        self.mask()
    }

    /// Read the field.
    #[inline]
    pub fn read(&self, data: &[u8], endian: Endian) -> u32 {
        (self.word.read(data, endian) >> self.shift) & self.mask()
    }

    /// Write the field, leaving sibling bits untouched.
    #[inline]
    pub fn write(&self, data: &mut [u8], endian: Endian, value: u32) {
        let mask = self.mask();
        let value = match self.overflow {
            Overflow::Mask => value & mask,
            Overflow::Saturate => value.min(mask),
        };
        let word = self.word.read(data, endian);
        let updated = (word & !(mask << self.shift)) | (value << self.shift);
        self.word.write(data, endian, updated);
    }
}

/// A single bit inside one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag {
    /// Byte offset.
    pub offset: usize,
    /// Bit index, 0 = least significant.
    pub bit: u8,
}

impl Flag {
    /// Create a flag at `offset`, bit `bit`.
    pub const fn new(offset: usize, bit: u8) -> Self {
        Self { offset, bit }
    }

    /// Read the flag.
    #[inline]
    pub fn get(&self, data: &[u8]) -> bool {
        (data[self.offset] >> self.bit) & 1 == 1
    }

    /// Write the flag.
    #[inline]
    pub fn set(&self, data: &mut [u8], value: bool) {
        let mask = 1u8 << self.bit;
        data[self.offset] = (data[self.offset] & !mask) | if value { mask } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_field_byte_order() {
        let mut data = [0u8; 4];
        Field::u16(0).write(&mut data, Endian::Big, 0x1234);
        Field::u16(2).write(&mut data, Endian::Little, 0x1234);
        assert_eq!(data, [0x12, 0x34, 0x34, 0x12]);
    }

    #[test]
    fn test_field_truncates() {
        let mut data = [0u8; 2];
        Field::u8(0).write(&mut data, Endian::Big, 0x1FF);
        assert_eq!(data[0], 0xFF);
        assert_eq!(data[1], 0);
    }

    #[test]
    fn test_try_read_out_of_bounds() {
        let data = [0u8; 3];
        assert!(Field::u32(0).try_read(&data, Endian::Little).is_err());
        assert!(Field::u16(1).try_read(&data, Endian::Little).is_ok());
    }

    #[test]
    fn test_masked_bit_field() {
        let mut data = [0xFFu8];
        let nibble = BitField::masked(Field::u8(0), 4, 4);
        nibble.write(&mut data, Endian::Big, 0x12);
        assert_eq!(data[0], 0x2F);
    }

    #[test]
    fn test_width_limits() {
        assert_eq!(Width::U8.max(), 0xFF);
        assert_eq!(Width::U16.bits(), 16);
        assert_eq!(Width::U32.bytes(), 4);
    }

    proptest! {
        #[test]
        fn saturating_field_clamps(value in any::<u32>(), word in any::<u32>()) {
            let field = BitField::saturating(Field::u32(0), 7, 5);
            let mut data = word.to_be_bytes();
            field.write(&mut data, Endian::Big, value);
            prop_assert_eq!(field.read(&data, Endian::Big), value.min(31));
        }

        #[test]
        fn bit_field_preserves_siblings(value in any::<u32>(), word in any::<u32>(), shift in 0u32..27) {
            let field = BitField::saturating(Field::u32(0), shift, 5);
            let mut data = word.to_le_bytes();
            field.write(&mut data, Endian::Little, value);
            let outside = !(0x1Fu32 << shift);
            prop_assert_eq!(u32::from_le_bytes(data) & outside, word & outside);
        }

        #[test]
        fn flags_are_independent(byte in any::<u8>(), i in 0u8..8, j in 0u8..8, value in any::<bool>()) {
            prop_assume!(i != j);
            let mut data = [byte];
            let before = Flag::new(0, j).get(&data);
            Flag::new(0, i).set(&mut data, value);
            prop_assert_eq!(Flag::new(0, i).get(&data), value);
            prop_assert_eq!(Flag::new(0, j).get(&data), before);
        }
    }
}
