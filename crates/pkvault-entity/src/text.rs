//! Text codec collaborator and trash-byte regions.
//!
//! Names are stored in fixed-width byte regions ("trash bytes"). What sits
//! after the terminator is whatever the game left there, so writes must not
//! disturb it unless asked to. Entity records delegate all character mapping
//! to a [`TextCodec`]; [`Utf16Text`] is the built-in implementation.

use pkvault_common::Endian;

/// Terminator code unit.
pub const TERMINATOR: u16 = 0xFFFF;

/// What happens to the bytes after the terminator on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrashPolicy {
    /// Leave the trailing bytes as they were.
    #[default]
    Preserve,
    /// Zero the trailing bytes.
    ClearZero,
}

/// A fixed text region inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRegion {
    /// Byte offset.
    pub offset: usize,
    /// Length in bytes, terminator included.
    pub len: usize,
    /// Maximum visible characters.
    pub max_chars: usize,
}

impl TextRegion {
    /// Create a text region.
    pub const fn new(offset: usize, len: usize, max_chars: usize) -> Self {
        Self {
            offset,
            len,
            max_chars,
        }
    }

    /// Offset one past the last byte.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The region's bytes.
    #[inline]
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset..self.end()]
    }

    /// The region's bytes, mutably.
    #[inline]
    pub fn slice_mut<'a>(&self, data: &'a mut [u8]) -> &'a mut [u8] {
        &mut data[self.offset..self.end()]
    }
}

/// Converts between strings and encoded trash bytes.
pub trait TextCodec: std::fmt::Debug + Send + Sync {
    /// Decode at most `max_chars` characters, stopping at the terminator.
    fn decode(&self, bytes: &[u8], max_chars: usize) -> String;

    /// Encode `text` into `dest`, truncating to `max_chars` characters and to
    /// what fits before a terminator.
    ///
    /// Returns the number of characters written, terminator excluded.
    fn encode(&self, text: &str, dest: &mut [u8], max_chars: usize, policy: TrashPolicy) -> usize;
}

/// UTF-16 text with a 0xFFFF terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf16Text {
    endian: Endian,
}

impl Utf16Text {
    /// Create a codec using `endian` code units.
    pub const fn new(endian: Endian) -> Self {
        Self { endian }
    }

    /// Byte order of the code units.
    pub const fn endian(&self) -> Endian {
        self.endian
    }
}

/// Big-endian text used by BK4.
pub static UTF16_BE: Utf16Text = Utf16Text::new(Endian::Big);

/// Little-endian text used by PK4.
pub static UTF16_LE: Utf16Text = Utf16Text::new(Endian::Little);

impl TextCodec for Utf16Text {
    fn decode(&self, bytes: &[u8], max_chars: usize) -> String {
        let units = (0..bytes.len() / 2)
            .map(|i| self.endian.read_u16(bytes, i * 2))
            .take_while(|&unit| unit != TERMINATOR && unit != 0);

        char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .take(max_chars)
            .collect()
    }

    fn encode(&self, text: &str, dest: &mut [u8], max_chars: usize, policy: TrashPolicy) -> usize {
        let capacity = (dest.len() / 2).saturating_sub(1);
        let mut buf = [0u16; 2];
        let mut written = 0;
        let mut chars = 0;

        for c in text.chars().take(max_chars) {
            let units = c.encode_utf16(&mut buf);
            if written + units.len() > capacity {
                break;
            }
            for &unit in units.iter() {
                self.endian.write_u16(dest, written * 2, unit);
                written += 1;
            }
            chars += 1;
        }

        if written * 2 + 2 <= dest.len() {
            self.endian.write_u16(dest, written * 2, TERMINATOR);
            written += 1;
        }

        if policy == TrashPolicy::ClearZero {
            dest[written * 2..].fill(0);
        }

        chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut region = [0u8; 22];
        let written = UTF16_BE.encode("Pikachu", &mut region, 10, TrashPolicy::Preserve);
        assert_eq!(written, 7);
        assert_eq!(&region[..4], &[0x00, b'P', 0x00, b'i']);
        assert_eq!(&region[14..16], &[0xFF, 0xFF]);
        assert_eq!(UTF16_BE.decode(&region, 10), "Pikachu");
    }

    #[test]
    fn test_truncates_to_max_chars() {
        let mut region = [0u8; 22];
        let written = UTF16_LE.encode("ABCDEFGHIJKLMNOP", &mut region, 10, TrashPolicy::Preserve);
        assert_eq!(written, 10);
        assert_eq!(UTF16_LE.decode(&region, 10), "ABCDEFGHIJ");
        assert_eq!(&region[20..22], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_truncates_to_region() {
        let mut region = [0u8; 8];
        let written = UTF16_LE.encode("ABCDEFG", &mut region, 10, TrashPolicy::Preserve);
        assert_eq!(written, 3);
        assert_eq!(UTF16_LE.decode(&region, 10), "ABC");
    }

    #[test]
    fn test_preserves_trash() {
        let mut region = [0xAAu8; 16];
        UTF16_BE.encode("Ab", &mut region, 7, TrashPolicy::Preserve);
        assert!(region[6..].iter().all(|&b| b == 0xAA));

        UTF16_BE.encode("Ab", &mut region, 7, TrashPolicy::ClearZero);
        assert!(region[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_stops_at_terminator() {
        let region = [0x00, b'A', 0xFF, 0xFF, 0x00, b'B'];
        assert_eq!(UTF16_BE.decode(&region, 10), "A");
    }

    #[test]
    fn test_surrogate_pair_fits_or_drops() {
        let mut region = [0u8; 6];
        // two units of room: "A" then a pair would need three
        let written = UTF16_LE.encode("A\u{1F600}", &mut region, 10, TrashPolicy::Preserve);
        assert_eq!(written, 1);
        assert_eq!(UTF16_LE.decode(&region, 10), "A");
    }
}
