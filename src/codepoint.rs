use crate::utf8;
use std::fmt;

/// Highest Unicode scalar value.
pub const MAX_SCALAR: u32 = 0x10FFFF;

const SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDFFF;

/// Returns whether `v` is a Unicode scalar value: in `0..=0x10FFFF` and not a surrogate.
#[inline]
pub const fn is_valid(v: u32) -> bool {
    v <= 0xD7FF || (0xE000 <= v && v <= MAX_SCALAR)
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Tag {
    WellFormed,
    Overlong(u8),
    Malformed([u8; utf8::MAX_BYTE_COUNT], u8),
}

/// A codepoint as found in possibly-invalid text.
///
/// Besides its numeric value, a `Codepoint` remembers whether it was
/// decoded from a non-minimal (overlong) byte sequence, or whether the
/// bytes it came from did not form a codepoint at all (malformed). Both
/// conditions make the codepoint invalid regardless of its value, but
/// neither is an error: they flow through scanning and case mapping as
/// ordinary values.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint {
    value: u32,
    tag: Tag,
}

impl Codepoint {
    /// A well-formed codepoint with the given value. The value may lie
    /// outside the scalar range (surrogates, or above `U+10FFFF`).
    pub const fn from_u32(value: u32) -> Self {
        Codepoint {
            value,
            tag: Tag::WellFormed,
        }
    }

    pub(crate) const fn overlong(value: u32, encoded_len: u8) -> Self {
        Codepoint {
            value,
            tag: Tag::Overlong(encoded_len),
        }
    }

    /// A malformed codepoint made of the given raw bytes. At most four
    /// bytes are kept.
    pub fn malformed(bytes: &[u8]) -> Self {
        let len = bytes.len().min(utf8::MAX_BYTE_COUNT);
        let mut raw = [0u8; utf8::MAX_BYTE_COUNT];
        raw[..len].copy_from_slice(&bytes[..len]);
        Codepoint {
            value: 0,
            tag: Tag::Malformed(raw, len as u8),
        }
    }

    /// The numeric value, or `None` for a malformed codepoint.
    pub fn value(self) -> Option<u32> {
        match self.tag {
            Tag::Malformed(..) => None,
            Tag::WellFormed | Tag::Overlong(_) => Some(self.value),
        }
    }

    /// Whether this codepoint did not come from a valid encoding.
    pub fn is_malformed(self) -> bool {
        matches!(self.tag, Tag::Malformed(..))
    }

    /// Whether this codepoint was decoded from a non-minimal encoding.
    pub fn is_overlong(self) -> bool {
        matches!(self.tag, Tag::Overlong(_))
    }

    /// The raw bytes of a malformed codepoint; empty for any other codepoint.
    pub fn malformed_bytes(&self) -> &[u8] {
        match &self.tag {
            Tag::Malformed(raw, len) => &raw[..*len as usize],
            Tag::WellFormed | Tag::Overlong(_) => &[],
        }
    }

    /// Whether this is a Unicode scalar value coming from a valid encoding.
    pub fn is_valid(self) -> bool {
        !self.is_malformed() && !self.is_overlong() && is_valid(self.value)
    }

    /// Whether the value is a surrogate. Malformed codepoints are not.
    pub fn is_surrogate(self) -> bool {
        !self.is_malformed() && SURROGATES.contains(&self.value)
    }

    /// Converts to `char` if this codepoint is valid.
    pub fn to_char(self) -> Option<char> {
        if self.is_valid() {
            char::from_u32(self.value)
        } else {
            None
        }
    }

    /// Number of bytes this codepoint occupies in encoded form.
    pub fn len_utf8(self) -> usize {
        match self.tag {
            Tag::WellFormed => utf8::len(self.value).unwrap_or(utf8::MAX_BYTE_COUNT),
            Tag::Overlong(len) | Tag::Malformed(_, len) => len as usize,
        }
    }

    /// Appends the encoded form of this codepoint to `dst`.
    ///
    /// Overlong and malformed codepoints write back exactly the bytes they
    /// were decoded from, so decoding and re-encoding any byte string is
    /// lossless.
    pub fn encode_utf8(self, dst: &mut Vec<u8>) {
        let mut buf = [0u8; utf8::MAX_BYTE_COUNT];
        match self.tag {
            Tag::Malformed(raw, len) => dst.extend_from_slice(&raw[..len as usize]),
            Tag::WellFormed | Tag::Overlong(_) => {
                let len = self.len_utf8();
                dst.extend_from_slice(utf8::encode_with_len(self.value, len, &mut buf));
            }
        }
    }
}

impl From<char> for Codepoint {
    fn from(ch: char) -> Self {
        Codepoint::from_u32(ch as u32)
    }
}

impl PartialEq<char> for Codepoint {
    fn eq(&self, rhs: &char) -> bool {
        self.to_char() == Some(*rhs)
    }
}

impl PartialEq<Codepoint> for char {
    fn eq(&self, rhs: &Codepoint) -> bool {
        rhs == self
    }
}

impl fmt::Debug for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Tag::WellFormed => match self.to_char() {
                Some(ch) => write!(f, "Codepoint('{}')", ch.escape_debug()),
                None => write!(f, "Codepoint(U+{:04X})", self.value),
            },
            Tag::Overlong(len) => {
                write!(f, "Codepoint(U+{:04X}, overlong {} bytes)", self.value, len)
            }
            Tag::Malformed(..) => {
                write!(f, "Codepoint(malformed ")?;
                for b in self.malformed_bytes() {
                    write!(f, "\\x{:02x}", b)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Codepoint {
    /// Valid codepoints print as themselves, everything else as U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert!(is_valid(0xD799));
        assert!(!is_valid(0xD800));
        assert!(!is_valid(0xDFFF));
        assert!(is_valid(0xE000));
        assert!(is_valid(MAX_SCALAR));
        assert!(!is_valid(MAX_SCALAR + 1));
    }

    #[test]
    fn test_tags_force_invalid() {
        assert!(Codepoint::from('a').is_valid());
        assert!(!Codepoint::overlong('a' as u32, 2).is_valid());
        assert!(!Codepoint::malformed(&[0x80]).is_valid());
        assert!(!Codepoint::from_u32(0xD800).is_valid());
        assert!(Codepoint::from_u32(0xD800).is_surrogate());
        assert_eq!(None, Codepoint::from_u32(0x110000).to_char());
    }

    #[test]
    fn test_encode_is_lossless() {
        let bytes: &[u8] = &[b'x', 0xC0, 0xAF, 0xED, 0xA0, 0x80, 0xE2, 0x82, 0xF4, 0x90, 0x80, 0x80];
        let mut out = Vec::new();
        for (_, cp) in utf8::codepoint_indices(bytes) {
            cp.encode_utf8(&mut out);
        }
        assert_eq!(bytes, &out[..]);
    }

    #[test]
    fn test_fmt() {
        assert_eq!("Codepoint('\\n')", format!("{:?}", Codepoint::from('\n')));
        assert_eq!(
            "Codepoint(malformed \\xe2\\x82)",
            format!("{:?}", Codepoint::malformed(&[0xE2, 0x82]))
        );
        assert_eq!("\u{FFFD}", Codepoint::from_u32(0xDC00).to_string());
    }
}
