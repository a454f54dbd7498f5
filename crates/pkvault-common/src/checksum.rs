//! 16-bit additive checksum.
//!
//! Stored entity records are guarded by the wrapping sum of all 16-bit words
//! in a fixed byte range. The header (personality value, sanity marker and the
//! checksum itself) sits outside that range, so the start offset is a
//! published per-format constant and must never be inferred.

use crate::field::Endian;

/// Sum the 16-bit words of `data[start..end]`, wrapping modulo 2^16.
///
/// A trailing odd byte is ignored.
#[inline]
pub fn sum_words(data: &[u8], start: usize, end: usize, endian: Endian) -> u16 {
    let words = end.saturating_sub(start) / 2;
    (0..words).fold(0u16, |acc, i| acc.wrapping_add(endian.read_u16(data, start + i * 2)))
}

/// Location of a checksum and the range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChecksumSpec {
    /// First byte covered.
    pub start: usize,
    /// One past the last byte covered.
    pub end: usize,
    /// Offset of the stored u16 checksum.
    pub field: usize,
}

impl ChecksumSpec {
    /// Create a checksum spec.
    pub const fn new(start: usize, end: usize, field: usize) -> Self {
        Self { start, end, field }
    }

    /// Compute the checksum over the covered range.
    #[inline]
    pub fn compute(&self, data: &[u8], endian: Endian) -> u16 {
        sum_words(data, self.start, self.end, endian)
    }

    /// Read the stored checksum.
    #[inline]
    pub fn stored(&self, data: &[u8], endian: Endian) -> u16 {
        endian.read_u16(data, self.field)
    }

    /// Recompute and store the checksum, returning the new value.
    pub fn refresh(&self, data: &mut [u8], endian: Endian) -> u16 {
        let checksum = self.compute(data, endian);
        endian.write_u16(data, self.field, checksum);
        checksum
    }

    /// Check whether the stored checksum matches the covered range.
    #[inline]
    pub fn is_valid(&self, data: &[u8], endian: Endian) -> bool {
        self.stored(data, endian) == self.compute(data, endian)
    }
}
