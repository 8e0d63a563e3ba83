//! Lossless UTF-8 decoding into tagged [`Codepoint`]s.
//!
//! Unlike `str::chars`, decoding never fails: overlong forms keep their
//! value and are tagged overlong, and anything that can't start a
//! sequence is returned as a malformed codepoint holding the raw bytes.

use crate::codepoint::Codepoint;

pub(crate) const MAX_BYTE_COUNT: usize = 4;

const TAG_CONT: u8 = 0b1000_0000;
const TAG_TWO_B: u8 = 0b1100_0000;
const TAG_THREE_B: u8 = 0b1110_0000;
const TAG_FOUR_B: u8 = 0b1111_0000;
const TAG_INVALID: u8 = 0b1111_1000;
const END_ONE_B: u32 = 0x80;
const END_TWO_B: u32 = 0x800;
const END_THREE_B: u32 = 0x10000;
const END_FOUR_B: u32 = 0x20_0000;

const CONT_PREFIX_MASK: u8 = 0b1100_0000;
const CONT_VALUE_MASK: u8 = 0b0011_1111;

/// Minimal encoded length of `code`, or `None` if it needs more than four bytes.
pub(crate) fn len(code: u32) -> Option<usize> {
    if code < END_ONE_B {
        Some(1)
    } else if code < END_TWO_B {
        Some(2)
    } else if code < END_THREE_B {
        Some(3)
    } else if code < END_FOUR_B {
        Some(4)
    } else {
        None
    }
}

fn len_from_first_byte(v: u8) -> Option<usize> {
    if v < TAG_CONT {
        Some(1)
    } else if v & TAG_INVALID == TAG_INVALID {
        None
    } else if v & TAG_FOUR_B == TAG_FOUR_B {
        Some(4)
    } else if v & TAG_THREE_B == TAG_THREE_B {
        Some(3)
    } else if v & TAG_TWO_B == TAG_TWO_B {
        Some(2)
    } else {
        // stray continuation byte
        None
    }
}

#[inline]
pub(crate) fn is_cont_byte(v: u8) -> bool {
    (v & CONT_PREFIX_MASK) == TAG_CONT
}

/// Encodes `code` using exactly `len` bytes, which may be longer than the
/// minimal length (that's how overlong codepoints round-trip).
pub(crate) fn encode_with_len(code: u32, len: usize, buf: &mut [u8; MAX_BYTE_COUNT]) -> &[u8] {
    match (len, &mut buf[..]) {
        (1, [a, ..]) => {
            *a = code as u8;
        }
        (2, [a, b, ..]) => {
            *a = (code >> 6 & 0x1F) as u8 | TAG_TWO_B;
            *b = (code & 0x3F) as u8 | TAG_CONT;
        }
        (3, [a, b, c, ..]) => {
            *a = (code >> 12 & 0x0F) as u8 | TAG_THREE_B;
            *b = (code >> 6 & 0x3F) as u8 | TAG_CONT;
            *c = (code & 0x3F) as u8 | TAG_CONT;
        }
        (4, [a, b, c, d, ..]) => {
            *a = (code >> 18 & 0x07) as u8 | TAG_FOUR_B;
            *b = (code >> 12 & 0x3F) as u8 | TAG_CONT;
            *c = (code >> 6 & 0x3F) as u8 | TAG_CONT;
            *d = (code & 0x3F) as u8 | TAG_CONT;
        }
        _ => unreachable!("encoded length must be between 1 and 4"),
    };
    &buf[..len]
}

#[inline]
fn utf8_first_byte(byte: u8, width: u32) -> u32 {
    (byte & (0x7F >> width)) as u32
}

#[inline]
fn utf8_acc_cont_byte(ch: u32, byte: u8) -> u32 {
    (ch << 6) | (byte & CONT_VALUE_MASK) as u32
}

#[inline]
fn decode_value(h: u8, cont: &[u8]) -> u32 {
    let mut v = utf8_first_byte(h, cont.len() as u32 + 1);
    for c in cont.iter().copied() {
        v = utf8_acc_cont_byte(v, c);
    }
    v
}

/// Decodes the codepoint at the start of `bytes`, returning it with the
/// number of bytes consumed. Returns `None` only for empty input.
pub fn decode(bytes: &[u8]) -> Option<(Codepoint, usize)> {
    let (&head, rest) = bytes.split_first()?;
    let len = match len_from_first_byte(head) {
        Some(len) => len,
        None => return Some((Codepoint::malformed(&bytes[..1]), 1)),
    };
    if len == 1 {
        return Some((Codepoint::from_u32(head as u32), 1));
    }
    let cont_len = rest
        .iter()
        .copied()
        .take(len - 1)
        .take_while(|&b| is_cont_byte(b))
        .count();
    if cont_len + 1 < len {
        let consumed = cont_len + 1;
        return Some((Codepoint::malformed(&bytes[..consumed]), consumed));
    }
    let value = decode_value(head, &rest[..cont_len]);
    let cp = if self::len(value) == Some(len) {
        Codepoint::from_u32(value)
    } else {
        Codepoint::overlong(value, len as u8)
    };
    Some((cp, len))
}

/// Returns an iterator over the codepoints of `bytes`, together with their byte offsets.
pub fn codepoint_indices(bytes: &[u8]) -> CodepointIndices<'_> {
    CodepointIndices {
        data: bytes,
        offset: 0,
    }
}

/// An iterator over the tagged codepoints of a byte string and their offsets.
#[derive(Clone, Copy, Debug)]
pub struct CodepointIndices<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> CodepointIndices<'a> {
    /// Byte offset of the next codepoint to be yielded.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for CodepointIndices<'a> {
    type Item = (usize, Codepoint);

    fn next(&mut self) -> Option<Self::Item> {
        let (cp, len) = decode(self.data)?;
        let start = self.offset;
        self.data = &self.data[len..];
        self.offset += len;
        Some((start, cp))
    }
}

impl std::iter::FusedIterator for CodepointIndices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Codepoint> {
        codepoint_indices(bytes).map(|(_, cp)| cp).collect()
    }

    #[test]
    fn test_decode_wellformed() {
        let cps = decode_all("aé€😀".as_bytes());
        let values: Vec<_> = cps.iter().map(|cp| cp.value()).collect();
        assert_eq!(
            vec![Some(0x61), Some(0xE9), Some(0x20AC), Some(0x1F600)],
            values
        );
        assert!(cps.iter().all(|cp| cp.is_valid()));
    }

    #[test]
    fn test_decode_overlong() {
        let (cp, len) = decode(&[0xC0, 0xAF]).unwrap();
        assert_eq!(2, len);
        assert!(cp.is_overlong());
        assert_eq!(Some(0x2F), cp.value());
        assert!(!cp.is_valid());

        let (cp, len) = decode(&[0xE0, 0x80, 0x80]).unwrap();
        assert_eq!(3, len);
        assert!(cp.is_overlong());
        assert_eq!(Some(0), cp.value());
    }

    #[test]
    fn test_decode_surrogate_is_not_malformed() {
        let (cp, len) = decode(&[0xED, 0xA0, 0x80]).unwrap();
        assert_eq!(3, len);
        assert!(!cp.is_malformed());
        assert_eq!(Some(0xD800), cp.value());
        assert!(!cp.is_valid());
    }

    #[test]
    fn test_decode_malformed() {
        // stray continuation, then a truncated three byte sequence, then 'a'
        let cps = decode_all(&[0x80, 0xE2, 0x82, b'a']);
        assert_eq!(3, cps.len());
        assert!(cps[0].is_malformed());
        assert!(cps[1].is_malformed());
        assert_eq!(&[0xE2, 0x82], cps[1].malformed_bytes());
        assert_eq!(Some(0x61), cps[2].value());

        let cps = decode_all(&[0xFF, 0xF8]);
        assert_eq!(2, cps.len());
        assert!(cps.iter().all(|cp| cp.is_malformed()));
    }

    #[test]
    fn test_indices() {
        let offsets: Vec<_> = codepoint_indices("aé€".as_bytes())
            .map(|(offset, _)| offset)
            .collect();
        assert_eq!(vec![0, 1, 3], offsets);
    }

    #[test]
    fn test_encode_with_len_roundtrips_overlong() {
        let mut buf = [0u8; MAX_BYTE_COUNT];
        assert_eq!(&[0xC0, 0xAF], encode_with_len(0x2F, 2, &mut buf));
        assert_eq!("€".as_bytes(), encode_with_len(0x20AC, 3, &mut buf));
    }
}
