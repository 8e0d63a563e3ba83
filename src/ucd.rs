//! The Unicode Character Database service.
//!
//! Everything in this crate that needs per-codepoint Unicode data goes
//! through the [`UnicodeData`] trait. [`Tables`] implements it on top of
//! the ICU4X compiled property data and the `unicode-normalization`
//! decomposition tables; tests and embedders may supply their own.

use crate::{
    category::Category,
    error::UcdError,
    grapheme::BreakState,
    normalize::{NewlineMode, NormalizeOptions},
};
use icu_casemap::CaseMapper;
use icu_properties::{
    props::{
        DefaultIgnorableCodePoint, EastAsianWidth, EmojiPresentation, ExtendedPictographic,
        GeneralCategory, GraphemeClusterBreak, IndicConjunctBreak, Lowercase, Uppercase,
    },
    CodePointMapData, CodePointSetData,
};
use smallvec::SmallVec;
use unicode_normalization::char::{
    canonical_combining_class, compose, decompose_canonical, decompose_compatible,
};

/// Which simple case mapping to apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaseKind {
    /// Simple lowercase mapping.
    Lower,
    /// Simple uppercase mapping.
    Upper,
    /// Simple titlecase mapping.
    Title,
    /// Simple case folding.
    Fold,
}

/// Per-codepoint Unicode data and the primitive algorithms defined on it.
///
/// # Decomposition protocol
///
/// [`decompose`](UnicodeData::decompose) must behave like a sizing call
/// when `buffer` is too small: it returns the number of scalars the
/// decomposition needs and writes nothing past the end of `buffer`.
/// Called again with a buffer of at least that length, it must fill it
/// and return the same count. Callers check the two counts agree.
pub trait UnicodeData {
    /// General category of a value in `0..=0x10FFFF`.
    fn category(&self, value: u32) -> Category;

    /// Simple (single codepoint) case mapping; unmapped characters map to themselves.
    fn case_map(&self, ch: char, kind: CaseKind) -> char;

    /// Decomposes `input` according to `options` into `buffer`, returning
    /// the number of scalars the full decomposition occupies.
    fn decompose(
        &self,
        input: &[char],
        options: &NormalizeOptions<'_>,
        buffer: &mut [u32],
    ) -> Result<usize, UcdError>;

    /// Finishes a decomposed buffer in place (composing it if requested),
    /// returning the number of scalars left at the front of `buffer`.
    fn reencode(&self, buffer: &mut [u32], options: &NormalizeOptions<'_>) -> Result<usize, UcdError>;

    /// Extended grapheme cluster boundary between `prev` and `next`,
    /// given the running `state` of the scan.
    fn grapheme_break_stateful(&self, prev: u32, next: u32, state: &mut BreakState) -> bool;

    /// Boundary between exactly two codepoints, with no surrounding context.
    fn grapheme_break(&self, prev: u32, next: u32) -> bool {
        self.grapheme_break_stateful(prev, next, &mut BreakState::new())
    }

    /// Display width in terminal columns: 0, 1 or 2.
    fn display_width(&self, value: u32) -> u8;

    /// `Default_Ignorable_Code_Point` property.
    fn is_default_ignorable(&self, value: u32) -> bool;

    /// `Lowercase` property.
    fn is_lowercase(&self, value: u32) -> bool;

    /// `Uppercase` property.
    fn is_uppercase(&self, value: u32) -> bool;
}

impl<D: UnicodeData + ?Sized> UnicodeData for &D {
    fn category(&self, value: u32) -> Category {
        (**self).category(value)
    }
    fn case_map(&self, ch: char, kind: CaseKind) -> char {
        (**self).case_map(ch, kind)
    }
    fn decompose(
        &self,
        input: &[char],
        options: &NormalizeOptions<'_>,
        buffer: &mut [u32],
    ) -> Result<usize, UcdError> {
        (**self).decompose(input, options, buffer)
    }
    fn reencode(&self, buffer: &mut [u32], options: &NormalizeOptions<'_>) -> Result<usize, UcdError> {
        (**self).reencode(buffer, options)
    }
    fn grapheme_break_stateful(&self, prev: u32, next: u32, state: &mut BreakState) -> bool {
        (**self).grapheme_break_stateful(prev, next, state)
    }
    fn display_width(&self, value: u32) -> u8 {
        (**self).display_width(value)
    }
    fn is_default_ignorable(&self, value: u32) -> bool {
        (**self).is_default_ignorable(value)
    }
    fn is_lowercase(&self, value: u32) -> bool {
        (**self).is_lowercase(value)
    }
    fn is_uppercase(&self, value: u32) -> bool {
        (**self).is_uppercase(value)
    }
}

/// The built-in Unicode data, backed by compiled ICU4X tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tables;

// Largest decomposition we agree to size; each scalar may cost 4 bytes once encoded.
const MAX_DECOMPOSED: usize = isize::MAX as usize / 4;

type Expansion = SmallVec<[char; 8]>;

impl UnicodeData for Tables {
    fn category(&self, value: u32) -> Category {
        from_general_category(CodePointMapData::<GeneralCategory>::new().get32(value))
    }

    fn case_map(&self, ch: char, kind: CaseKind) -> char {
        let mapper = CaseMapper::new();
        match kind {
            CaseKind::Lower => mapper.simple_lowercase(ch),
            CaseKind::Upper => mapper.simple_uppercase(ch),
            CaseKind::Title => mapper.simple_titlecase(ch),
            CaseKind::Fold => mapper.simple_fold(ch),
        }
    }

    fn decompose(
        &self,
        input: &[char],
        options: &NormalizeOptions<'_>,
        buffer: &mut [u32],
    ) -> Result<usize, UcdError> {
        let mut count = 0usize;
        let mut expansion = Expansion::new();
        let mut chars = input.iter().copied().peekable();
        while let Some(ch) = chars.next() {
            if ch == '\r' && chars.peek() == Some(&'\n') && folds_newlines(options) {
                chars.next();
            }
            expansion.clear();
            self.decompose_char(ch, options, &mut expansion)?;
            for &d in expansion.iter() {
                if let Some(slot) = buffer.get_mut(count) {
                    *slot = d as u32;
                }
                count += 1;
                if count > MAX_DECOMPOSED {
                    return Err(UcdError::Overflow);
                }
            }
        }
        if count <= buffer.len() {
            canonical_order(&mut buffer[..count]);
        }
        Ok(count)
    }

    fn reencode(&self, buffer: &mut [u32], options: &NormalizeOptions<'_>) -> Result<usize, UcdError> {
        if options.compose() && options.decompose() {
            return Err(UcdError::InvalidOptions);
        }
        if options.compose() {
            Ok(compose_in_place(buffer))
        } else {
            Ok(buffer.len())
        }
    }

    fn grapheme_break_stateful(&self, prev: u32, next: u32, state: &mut BreakState) -> bool {
        let next_class = break_class(next);
        let next_incb = conjunct_class(next);
        let (context, conjunct) = match BreakClass::from_state(state.into_raw()) {
            Some(decoded) if !state.is_start() => decoded,
            _ => (break_class(prev), Conjunct::None.advance(conjunct_class(prev))),
        };
        // GB9c
        let is_break = if conjunct == Conjunct::Linked && next_incb == IndicConjunctBreak::Consonant
        {
            false
        } else {
            break_between(context, next_class)
        };
        let advanced = match (context, next_class) {
            // a completed pair: the next indicator starts over
            (BreakClass::RegionalIndicator, BreakClass::RegionalIndicator) => BreakClass::Other,
            (BreakClass::ExtendedPictographic, BreakClass::Extend) => {
                BreakClass::ExtendedPictographic
            }
            (BreakClass::ExtendedPictographic, BreakClass::ZWJ) => BreakClass::PictographicZwj,
            (_, class) => class,
        };
        let conjunct = conjunct.advance(next_incb);
        *state = BreakState::from_raw(advanced as i32 | (conjunct as i32) << CONJUNCT_SHIFT);
        is_break
    }

    fn display_width(&self, value: u32) -> u8 {
        if !crate::codepoint::is_valid(value) {
            return 1;
        }
        match self.category(value) {
            Category::NonspacingMark
            | Category::EnclosingMark
            | Category::Control
            | Category::LineSeparator
            | Category::ParagraphSeparator => return 0,
            // soft hyphen is visible when a line breaks at it
            Category::Format if value != 0x00AD => return 0,
            _ => {}
        }
        if matches!(break_class(value), BreakClass::V | BreakClass::T) {
            return 0;
        }
        let eaw = CodePointMapData::<EastAsianWidth>::new().get32(value);
        if eaw == EastAsianWidth::Wide
            || eaw == EastAsianWidth::Fullwidth
            || CodePointSetData::new::<EmojiPresentation>().contains32(value)
        {
            2
        } else {
            1
        }
    }

    fn is_default_ignorable(&self, value: u32) -> bool {
        CodePointSetData::new::<DefaultIgnorableCodePoint>().contains32(value)
    }

    fn is_lowercase(&self, value: u32) -> bool {
        CodePointSetData::new::<Lowercase>().contains32(value)
    }

    fn is_uppercase(&self, value: u32) -> bool {
        CodePointSetData::new::<Uppercase>().contains32(value)
    }
}

impl Tables {
    fn decompose_char(
        &self,
        ch: char,
        options: &NormalizeOptions<'_>,
        out: &mut Expansion,
    ) -> Result<(), UcdError> {
        let ch = match fold_control(ch, options) {
            Some(ch) => ch,
            None => return Ok(()),
        };
        let value = ch as u32;
        if options.strip_ignorable() && self.is_default_ignorable(value) {
            return Ok(());
        }
        let category = self.category(value);
        if options.reject_unassigned() && category == Category::Unassigned {
            return Err(UcdError::NotAssigned);
        }
        let ch = if options.lump() {
            lump(ch, category, options)
        } else {
            ch
        };
        let mut folded = Expansion::new();
        if options.casefold() {
            full_fold(ch, &mut folded);
        } else {
            folded.push(ch);
        }
        if !(options.compose() || options.decompose()) {
            out.extend(folded);
            return Ok(());
        }
        let strip_mark = options.strip_mark();
        for ch in folded {
            let emit = |d: char| {
                if !(strip_mark && self.category(d as u32).is_mark()) {
                    out.push(d);
                }
            };
            if options.compat() {
                decompose_compatible(ch, emit);
            } else {
                decompose_canonical(ch, emit);
            }
        }
        Ok(())
    }
}

/// Full case folding: `ß` folds to `ss`, `ŉ` to `ʼn`.
fn full_fold(ch: char, out: &mut Expansion) {
    if ch.is_ascii() {
        out.push(ch.to_ascii_lowercase());
        return;
    }
    let mut buf = [0u8; 4];
    let folded = CaseMapper::new().fold_string(ch.encode_utf8(&mut buf));
    out.extend(folded.chars());
}

fn folds_newlines(options: &NormalizeOptions<'_>) -> bool {
    options.newline() != NewlineMode::None || options.strip_control()
}

/// Newline conversion and control stripping; `None` drops the character.
fn fold_control(ch: char, options: &NormalizeOptions<'_>) -> Option<char> {
    let newline_like = matches!(ch, '\n' | '\r' | '\u{85}')
        || (options.strip_control() && matches!(ch, '\u{B}' | '\u{C}'));
    if newline_like && folds_newlines(options) {
        return Some(match options.newline() {
            NewlineMode::Ls => '\u{2028}',
            NewlineMode::Ps => '\u{2029}',
            NewlineMode::Lf => '\n',
            NewlineMode::None => ' ',
        });
    }
    if options.strip_control() && (ch <= '\u{1F}' || ('\u{7F}'..='\u{9F}').contains(&ch)) {
        return if ch == '\t' { Some(' ') } else { None };
    }
    Some(ch)
}

static LUMP_TABLE: &[(char, char)] = &[
    ('\u{02BC}', '\''),
    ('\u{02C4}', '^'),
    ('\u{02C6}', '^'),
    ('\u{02C8}', '\''),
    ('\u{02CB}', '`'),
    ('\u{02CD}', '_'),
    ('\u{2017}', '_'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{2038}', '^'),
    ('\u{2039}', '<'),
    ('\u{203A}', '>'),
    ('\u{2044}', '/'),
    ('\u{2212}', '-'),
    ('\u{2215}', '/'),
    ('\u{2216}', '\\'),
    ('\u{2223}', '|'),
    ('\u{2236}', ':'),
    ('\u{223C}', '~'),
    ('\u{2303}', '^'),
    ('\u{2329}', '<'),
    ('\u{232A}', '>'),
    ('\u{3008}', '<'),
    ('\u{3009}', '>'),
];

/// Folds look-alike punctuation and spaces to their ASCII counterparts.
fn lump(ch: char, category: Category, options: &NormalizeOptions<'_>) -> char {
    match category {
        Category::SpaceSeparator => return ' ',
        Category::DashPunctuation => return '-',
        _ => {}
    }
    if options.newline() == NewlineMode::Lf && matches!(ch, '\u{2028}' | '\u{2029}') {
        return '\n';
    }
    LUMP_TABLE
        .binary_search_by_key(&ch, |&(from, _)| from)
        .map_or(ch, |idx| LUMP_TABLE[idx].1)
}

fn combining_class(value: u32) -> u8 {
    char::from_u32(value).map_or(0, canonical_combining_class)
}

/// Stable sort of every run of non-starters by combining class.
fn canonical_order(buf: &mut [u32]) {
    let mut start = 0;
    while start < buf.len() {
        if combining_class(buf[start]) == 0 {
            start += 1;
            continue;
        }
        let run = buf[start..]
            .iter()
            .take_while(|&&v| combining_class(v) != 0)
            .count();
        buf[start..start + run].sort_by_key(|&v| combining_class(v));
        start += run;
    }
}

fn compose_pair(starter: u32, next: u32) -> Option<u32> {
    let starter = char::from_u32(starter)?;
    let next = char::from_u32(next)?;
    compose(starter, next).map(|ch| ch as u32)
}

/// Canonical composition of a canonically ordered buffer, in place.
fn compose_in_place(buf: &mut [u32]) -> usize {
    let mut out = 0;
    let mut starter: Option<usize> = None;
    let mut last_class = 0u8;
    for i in 0..buf.len() {
        let value = buf[i];
        let class = combining_class(value);
        if let Some(s) = starter {
            let blocked = out != s + 1 && (last_class == 0 || last_class >= class);
            if !blocked {
                if let Some(composed) = compose_pair(buf[s], value) {
                    buf[s] = composed;
                    continue;
                }
            }
        }
        if class == 0 {
            starter = Some(out);
        }
        last_class = class;
        buf[out] = value;
        out += 1;
    }
    out
}

fn from_general_category(gc: GeneralCategory) -> Category {
    match gc {
        GeneralCategory::Unassigned => Category::Unassigned,
        GeneralCategory::UppercaseLetter => Category::UppercaseLetter,
        GeneralCategory::LowercaseLetter => Category::LowercaseLetter,
        GeneralCategory::TitlecaseLetter => Category::TitlecaseLetter,
        GeneralCategory::ModifierLetter => Category::ModifierLetter,
        GeneralCategory::OtherLetter => Category::OtherLetter,
        GeneralCategory::NonspacingMark => Category::NonspacingMark,
        GeneralCategory::SpacingMark => Category::SpacingMark,
        GeneralCategory::EnclosingMark => Category::EnclosingMark,
        GeneralCategory::DecimalNumber => Category::DecimalNumber,
        GeneralCategory::LetterNumber => Category::LetterNumber,
        GeneralCategory::OtherNumber => Category::OtherNumber,
        GeneralCategory::SpaceSeparator => Category::SpaceSeparator,
        GeneralCategory::LineSeparator => Category::LineSeparator,
        GeneralCategory::ParagraphSeparator => Category::ParagraphSeparator,
        GeneralCategory::Control => Category::Control,
        GeneralCategory::Format => Category::Format,
        GeneralCategory::PrivateUse => Category::PrivateUse,
        GeneralCategory::Surrogate => Category::Surrogate,
        GeneralCategory::DashPunctuation => Category::DashPunctuation,
        GeneralCategory::OpenPunctuation => Category::OpenPunctuation,
        GeneralCategory::ClosePunctuation => Category::ClosePunctuation,
        GeneralCategory::ConnectorPunctuation => Category::ConnectorPunctuation,
        GeneralCategory::InitialPunctuation => Category::InitialPunctuation,
        GeneralCategory::FinalPunctuation => Category::FinalPunctuation,
        GeneralCategory::OtherPunctuation => Category::OtherPunctuation,
        GeneralCategory::MathSymbol => Category::MathSymbol,
        GeneralCategory::CurrencySymbol => Category::CurrencySymbol,
        GeneralCategory::ModifierSymbol => Category::ModifierSymbol,
        GeneralCategory::OtherSymbol => Category::OtherSymbol,
    }
}

/// Grapheme cluster break classes, plus one pseudo-class that only ever
/// lives in a [`BreakState`]. Zero is reserved for "start of scan".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
enum BreakClass {
    Other = 1,
    CR,
    LF,
    Control,
    Extend,
    ZWJ,
    RegionalIndicator,
    Prepend,
    SpacingMark,
    L,
    V,
    T,
    LV,
    LVT,
    ExtendedPictographic,
    /// `ExtPict Extend* ZWJ`
    PictographicZwj,
}

const STATE_CLASSES: [BreakClass; 16] = [
    BreakClass::Other,
    BreakClass::CR,
    BreakClass::LF,
    BreakClass::Control,
    BreakClass::Extend,
    BreakClass::ZWJ,
    BreakClass::RegionalIndicator,
    BreakClass::Prepend,
    BreakClass::SpacingMark,
    BreakClass::L,
    BreakClass::V,
    BreakClass::T,
    BreakClass::LV,
    BreakClass::LVT,
    BreakClass::ExtendedPictographic,
    BreakClass::PictographicZwj,
];

const GCB_CLASSES: [(GraphemeClusterBreak, BreakClass); 17] = [
    (GraphemeClusterBreak::Control, BreakClass::Control),
    (GraphemeClusterBreak::CR, BreakClass::CR),
    (GraphemeClusterBreak::LF, BreakClass::LF),
    (GraphemeClusterBreak::Extend, BreakClass::Extend),
    (GraphemeClusterBreak::ZWJ, BreakClass::ZWJ),
    (GraphemeClusterBreak::RegionalIndicator, BreakClass::RegionalIndicator),
    (GraphemeClusterBreak::Prepend, BreakClass::Prepend),
    (GraphemeClusterBreak::SpacingMark, BreakClass::SpacingMark),
    (GraphemeClusterBreak::L, BreakClass::L),
    (GraphemeClusterBreak::V, BreakClass::V),
    (GraphemeClusterBreak::T, BreakClass::T),
    (GraphemeClusterBreak::LV, BreakClass::LV),
    (GraphemeClusterBreak::LVT, BreakClass::LVT),
    // legacy emoji classes, empty in current data
    (GraphemeClusterBreak::EModifier, BreakClass::Extend),
    (GraphemeClusterBreak::EBase, BreakClass::ExtendedPictographic),
    (GraphemeClusterBreak::EBaseGAZ, BreakClass::ExtendedPictographic),
    (GraphemeClusterBreak::GlueAfterZwj, BreakClass::ExtendedPictographic),
];

impl BreakClass {
    /// Splits a raw state into the context class and the conjunct progress.
    fn from_state(raw: i32) -> Option<(Self, Conjunct)> {
        let class = STATE_CLASSES
            .iter()
            .copied()
            .find(|&class| class as i32 == raw & CLASS_MASK)?;
        let conjunct = match raw >> CONJUNCT_SHIFT {
            0 => Conjunct::None,
            1 => Conjunct::Consonant,
            2 => Conjunct::Linked,
            _ => return None,
        };
        Some((class, conjunct))
    }
}

const CLASS_MASK: i32 = 0xFF;
const CONJUNCT_SHIFT: u32 = 8;

/// Progress through `Consonant [Extend Linker]* Linker [Extend Linker]*`,
/// the context of rule GB9c.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
enum Conjunct {
    None = 0,
    /// A consonant, possibly followed by extenders.
    Consonant,
    /// A consonant followed by at least one linker.
    Linked,
}

impl Conjunct {
    fn advance(self, incb: IndicConjunctBreak) -> Self {
        match (self, incb) {
            (_, IndicConjunctBreak::Consonant) => Conjunct::Consonant,
            (Conjunct::Consonant | Conjunct::Linked, IndicConjunctBreak::Linker) => {
                Conjunct::Linked
            }
            (Conjunct::Consonant | Conjunct::Linked, IndicConjunctBreak::Extend) => self,
            _ => Conjunct::None,
        }
    }
}

fn conjunct_class(value: u32) -> IndicConjunctBreak {
    CodePointMapData::<IndicConjunctBreak>::new().get32(value)
}

fn break_class(value: u32) -> BreakClass {
    let gcb = CodePointMapData::<GraphemeClusterBreak>::new().get32(value);
    if let Some(&(_, class)) = GCB_CLASSES.iter().find(|(g, _)| *g == gcb) {
        return class;
    }
    if CodePointSetData::new::<ExtendedPictographic>().contains32(value) {
        BreakClass::ExtendedPictographic
    } else {
        BreakClass::Other
    }
}

/// The extended grapheme cluster rules GB3 through GB999, with `prev`
/// being the scan context rather than just the previous codepoint.
fn break_between(prev: BreakClass, next: BreakClass) -> bool {
    use BreakClass::*;

    match (prev, next) {
        (CR, LF) => false,
        (CR | LF | Control, _) => true,
        (_, CR | LF | Control) => true,
        (L, L | V | LV | LVT) => false,
        (LV | V, V | T) => false,
        (LVT | T, T) => false,
        (_, Extend | ZWJ | SpacingMark) => false,
        (Prepend, _) => false,
        (PictographicZwj, ExtendedPictographic) => false,
        (RegionalIndicator, RegionalIndicator) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeConfig;

    #[test]
    fn test_category_lookup() {
        assert_eq!(Category::DecimalNumber, Tables.category('9' as u32));
        assert_eq!(Category::LowercaseLetter, Tables.category('α' as u32));
        assert_eq!(Category::OtherSymbol, Tables.category(0x1F383));
    }

    #[test]
    fn test_case_map() {
        assert_eq!('é', Tables.case_map('É', CaseKind::Lower));
        assert_eq!('Σ', Tables.case_map('ς', CaseKind::Upper));
        assert_eq!('ǅ', Tables.case_map('ǆ', CaseKind::Title));
        assert_eq!('Ǆ', Tables.case_map('ǆ', CaseKind::Upper));
        assert_eq!('σ', Tables.case_map('ς', CaseKind::Fold));
        assert_eq!('1', Tables.case_map('1', CaseKind::Upper));
    }

    #[test]
    fn test_canonical_order() {
        // a + ring above (230) + cedilla (202) reorders to a + cedilla + ring
        let mut buf = ['a' as u32, 0x030A, 0x0327];
        canonical_order(&mut buf);
        assert_eq!(['a' as u32, 0x0327, 0x030A], buf);
    }

    #[test]
    fn test_compose_in_place() {
        let mut buf = ['e' as u32, 0x0301, 'x' as u32];
        assert_eq!(2, compose_in_place(&mut buf));
        assert_eq!(['é' as u32, 'x' as u32], buf[..2]);

        // hangul L V T
        let mut buf = [0x1100, 0x1161, 0x11A8];
        assert_eq!(1, compose_in_place(&mut buf));
        assert_eq!(0xAC01, buf[0]);

        // a blocked mark stays separate: a + grave(230) + acute(230)
        let mut buf = ['a' as u32, 0x0300, 0x0301];
        assert_eq!(2, compose_in_place(&mut buf));
        assert_eq!([0x00E0, 0x0301], buf[..2]);
    }

    #[test]
    fn test_break_rules() {
        let brk = |a: char, b: char| Tables.grapheme_break(a as u32, b as u32);
        assert!(!brk('\r', '\n'));
        assert!(brk('\n', '\r'));
        assert!(!brk('e', '\u{0301}'));
        assert!(brk('a', 'b'));
        assert!(!brk('\u{1100}', '\u{1161}'));
        assert!(!brk('\u{1F1FA}', '\u{1F1F8}'));
        assert!(brk('\u{1F600}', '\u{1F600}'));
    }

    #[test]
    fn test_regional_indicator_pairs() {
        let ri = 0x1F1E6u32;
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful(ri, ri, &mut state));
        assert!(Tables.grapheme_break_stateful(ri, ri, &mut state));
        assert!(!Tables.grapheme_break_stateful(ri, ri, &mut state));
    }

    #[test]
    fn test_emoji_zwj_sequence() {
        // woman, zwj, rocket
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful(0x1F469, 0x200D, &mut state));
        assert!(!Tables.grapheme_break_stateful(0x200D, 0x1F680, &mut state));
        // zwj without a pictographic base does join, but doesn't glue the next emoji
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful('a' as u32, 0x200D, &mut state));
        assert!(Tables.grapheme_break_stateful(0x200D, 0x1F680, &mut state));
    }

    #[test]
    fn test_indic_conjunct() {
        // ka, virama, ssa: the virama links the consonants
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful(0x0915, 0x094D, &mut state));
        assert!(!Tables.grapheme_break_stateful(0x094D, 0x0937, &mut state));
        // extenders may sit on either side of the linker
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful(0x0915, 0x094D, &mut state));
        assert!(!Tables.grapheme_break_stateful(0x094D, 0x200D, &mut state));
        assert!(!Tables.grapheme_break_stateful(0x200D, 0x0937, &mut state));
        // no linker, no conjunct
        let mut state = BreakState::new();
        assert!(Tables.grapheme_break_stateful(0x0915, 0x0937, &mut state));
        // a linker without a consonant before it
        let mut state = BreakState::new();
        assert!(!Tables.grapheme_break_stateful('a' as u32, 0x094D, &mut state));
        assert!(Tables.grapheme_break_stateful(0x094D, 0x0937, &mut state));
    }

    #[test]
    fn test_full_case_fold() {
        let options = NormalizeConfig { casefold: true, ..NormalizeConfig::default() }
            .build()
            .unwrap();
        let text: Vec<char> = "Straße".chars().collect();
        let mut buf = [0u32; 16];
        let len = Tables.decompose(&text, &options, &mut buf).unwrap();
        let folded: String = buf[..len].iter().filter_map(|&v| char::from_u32(v)).collect();
        assert_eq!("strasse", folded);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(1, Tables.display_width('a' as u32));
        assert_eq!(2, Tables.display_width('中' as u32));
        assert_eq!(0, Tables.display_width(0x0301));
        assert_eq!(0, Tables.display_width(0x0007));
        assert_eq!(2, Tables.display_width(0x1F600));
    }
}
