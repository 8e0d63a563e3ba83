//! Canonicalization of identifiers that contain easily confused characters.

use crate::{
    error::Result,
    normalize::{NormalizationForm, Normalizer, NormalizeConfig},
};

// Sorted by source character.
static CONFUSABLES: [(char, char); 6] = [
    ('\u{00B5}', '\u{03BC}'), // micro sign -> greek small mu
    ('\u{00B7}', '\u{22C5}'), // middle dot -> dot operator
    ('\u{025B}', '\u{03B5}'), // latin small open e -> greek small epsilon
    ('\u{0387}', '\u{22C5}'), // greek ano teleia -> dot operator
    ('\u{210F}', '\u{0127}'), // planck over two pi -> h with stroke
    ('\u{2212}', '\u{002D}'), // minus sign -> hyphen-minus
];

/// Replaces `c` by its canonical look-alike, if it has one.
pub fn confusable_remap(c: char) -> char {
    CONFUSABLES
        .binary_search_by_key(&c, |&(from, _)| from)
        .map_or(c, |idx| CONFUSABLES[idx].1)
}

/// Normalizes an identifier: NFC, with confusable characters remapped first.
///
/// ```
/// assert_eq!("\u{03BC}s", runeops::normalize_identifier("\u{00B5}s").unwrap());
/// ```
pub fn normalize_identifier(ident: &str) -> Result<String> {
    let remap = confusable_remap;
    let options = NormalizeConfig::from(NormalizationForm::Nfc)
        .with_transform(&remap)
        .build()?;
    Normalizer::new().normalize(ident, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(CONFUSABLES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_remap() {
        assert_eq!('ε', confusable_remap('ɛ'));
        assert_eq!('μ', confusable_remap('µ'));
        assert_eq!('⋅', confusable_remap('·'));
        assert_eq!('⋅', confusable_remap('\u{0387}'));
        assert_eq!('-', confusable_remap('−'));
        assert_eq!('ħ', confusable_remap('ℏ'));
        assert_eq!('x', confusable_remap('x'));
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!("x\u{22C5}y", normalize_identifier("x\u{00B7}y").unwrap());
        assert_eq!("\u{0127}", normalize_identifier("\u{210F}").unwrap());
        assert_eq!("caf\u{00E9}", normalize_identifier("cafe\u{0301}").unwrap());
    }
}
