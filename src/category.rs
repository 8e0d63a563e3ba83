//! General category codes and the character-class predicates built on them.

use crate::{codepoint::Codepoint, ucd::Tables, UnicodeData};
use std::fmt;

/// Unicode general category of a codepoint, plus two sentinels for
/// codepoints the category table cannot describe.
///
/// The discriminants are stable and dense: `0..=29` are the real
/// categories, [`Category::TooHigh`] is `30` and [`Category::Malformed`] is
/// `31`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Category {
    Unassigned = 0,
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    /// The value lies above `U+10FFFF`.
    TooHigh = 30,
    /// The codepoint did not come from a valid encoding.
    Malformed = 31,
}

// (abbreviation, label), indexed by discriminant.
static CATEGORY_LABELS: [(&str, &str); 32] = [
    ("Cn", "Other, not assigned"),
    ("Lu", "Letter, uppercase"),
    ("Ll", "Letter, lowercase"),
    ("Lt", "Letter, titlecase"),
    ("Lm", "Letter, modifier"),
    ("Lo", "Letter, other"),
    ("Mn", "Mark, nonspacing"),
    ("Mc", "Mark, spacing combining"),
    ("Me", "Mark, enclosing"),
    ("Nd", "Number, decimal digit"),
    ("Nl", "Number, letter"),
    ("No", "Number, other"),
    ("Pc", "Punctuation, connector"),
    ("Pd", "Punctuation, dash"),
    ("Ps", "Punctuation, open"),
    ("Pe", "Punctuation, close"),
    ("Pi", "Punctuation, initial quote"),
    ("Pf", "Punctuation, final quote"),
    ("Po", "Punctuation, other"),
    ("Sm", "Symbol, math"),
    ("Sc", "Symbol, currency"),
    ("Sk", "Symbol, modifier"),
    ("So", "Symbol, other"),
    ("Zs", "Separator, space"),
    ("Zl", "Separator, line"),
    ("Zp", "Separator, paragraph"),
    ("Cc", "Other, control"),
    ("Cf", "Other, format"),
    ("Cs", "Other, surrogate"),
    ("Co", "Other, private use"),
    ("In", "Invalid, too high"),
    ("Ma", "Malformed, bad data"),
];

impl Category {
    /// The numeric code, `0..=31`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Two-letter abbreviation, e.g. `"Lu"`.
    pub fn abbrev(self) -> &'static str {
        CATEGORY_LABELS[self as usize].0
    }

    /// Human readable label, e.g. `"Letter, uppercase"`.
    pub fn label(self) -> &'static str {
        CATEGORY_LABELS[self as usize].1
    }

    /// `Lu`, `Ll`, `Lt`, `Lm` or `Lo`.
    pub fn is_letter(self) -> bool {
        (Category::UppercaseLetter..=Category::OtherLetter).contains(&self)
    }

    /// `Mn`, `Mc` or `Me`.
    pub fn is_mark(self) -> bool {
        (Category::NonspacingMark..=Category::EnclosingMark).contains(&self)
    }

    /// `Nd`, `Nl` or `No`.
    pub fn is_number(self) -> bool {
        (Category::DecimalNumber..=Category::OtherNumber).contains(&self)
    }

    /// Any of the `P*` categories.
    pub fn is_punctuation(self) -> bool {
        (Category::ConnectorPunctuation..=Category::OtherPunctuation).contains(&self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.abbrev(), self.label())
    }
}

/// General category of `cp`, with the [`Category::Malformed`] and
/// [`Category::TooHigh`] sentinels for codepoints outside the table.
pub fn category(cp: impl Into<Codepoint>) -> Category {
    category_with(&Tables, cp.into())
}

pub(crate) fn category_with<D: UnicodeData + ?Sized>(data: &D, cp: Codepoint) -> Category {
    match cp.value() {
        None => Category::Malformed,
        Some(v) if v > crate::codepoint::MAX_SCALAR => Category::TooHigh,
        Some(v) => data.category(v),
    }
}

/// Letters: categories `Lu` through `Lo`.
pub fn is_letter(c: char) -> bool {
    category(c).is_letter()
}

/// ASCII decimal digits `0-9`.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Any numeric character: categories `Nd`, `Nl` and `No`.
pub fn is_numeric(c: char) -> bool {
    category(c).is_number()
}

/// Punctuation: any `P*` category.
pub fn is_punctuation(c: char) -> bool {
    category(c).is_punctuation()
}

/// ASCII whitespace, `U+0085`, and any `Zs` character.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t'..='\r' | '\u{85}')
        || ('\u{A0}' <= c && category(c) == Category::SpaceSeparator)
}

/// C0 and C1 control codes.
pub fn is_control(c: char) -> bool {
    c <= '\u{1F}' || ('\u{7F}'..='\u{9F}').contains(&c)
}

/// Printable characters: letters through space separators.
pub fn is_print(c: char) -> bool {
    (Category::UppercaseLetter..=Category::SpaceSeparator).contains(&category(c))
}

/// Printable characters other than spaces.
pub fn is_graphic(c: char) -> bool {
    (Category::UppercaseLetter..=Category::OtherSymbol).contains(&category(c))
}

/// ASCII hexadecimal digits.
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Characters with the `Lowercase` property.
pub fn is_lowercase(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_lowercase()
    } else {
        Tables.is_lowercase(c as u32)
    }
}

/// Characters with the `Uppercase` property.
pub fn is_uppercase(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_uppercase()
    } else {
        Tables.is_uppercase(c as u32)
    }
}

/// Lowercase, uppercase or titlecase characters.
pub fn is_cased(c: char) -> bool {
    is_lowercase(c) || is_uppercase(c) || category(c) == Category::TitlecaseLetter
}
