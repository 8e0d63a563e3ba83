//! Terminal column widths.

use crate::{ucd::Tables, UnicodeData};

/// Columns `c` occupies in a monospace terminal: 0, 1 or 2.
#[inline]
pub fn char_width(c: char) -> usize {
    if (' '..='~').contains(&c) {
        1
    } else {
        Tables.display_width(c as u32) as usize
    }
}

/// Columns `text` occupies, summed per character.
pub fn text_width(text: &str) -> usize {
    text_width_with(&Tables, text)
}

/// [`text_width`] against custom Unicode data.
pub fn text_width_with<D: UnicodeData + ?Sized>(data: &D, text: &str) -> usize {
    text.chars().map(|c| data.display_width(c as u32) as usize).sum()
}
