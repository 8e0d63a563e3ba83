//! Case transformations.
//!
//! Every mapping here is a simple, one-to-one codepoint mapping: a string
//! keeps its number of characters, and metadata attached to spans of an
//! [`AnnotatedString`] stays on the characters it covered.

use crate::{
    annotated::AnnotatedString,
    category::category_with,
    codepoint::Codepoint,
    grapheme::{BreakState, GraphemeBreaker},
    ucd::{CaseKind, Tables},
    UnicodeData,
};
use std::fmt;

/// Per-codepoint case mapping on top of a [`UnicodeData`] service.
#[derive(Copy, Clone, Debug, Default)]
pub struct Casing<D = Tables> {
    data: D,
}

impl Casing<Tables> {
    /// Case mapping with the built-in tables.
    pub const fn new() -> Self {
        Casing { data: Tables }
    }
}

impl<D: UnicodeData> Casing<D> {
    /// Case mapping with the given Unicode data.
    pub const fn with_data(data: D) -> Self {
        Casing { data }
    }

    /// Simple lowercase mapping of `c`.
    #[inline]
    pub fn lowercase(&self, c: char) -> char {
        if c.is_ascii() {
            c.to_ascii_lowercase()
        } else {
            self.data.case_map(c, CaseKind::Lower)
        }
    }

    /// Simple uppercase mapping of `c`.
    #[inline]
    pub fn uppercase(&self, c: char) -> char {
        if c.is_ascii() {
            c.to_ascii_uppercase()
        } else {
            self.data.case_map(c, CaseKind::Upper)
        }
    }

    /// Titlecase differs from uppercase only for digraphs such as `ǆ`.
    #[inline]
    pub fn titlecase(&self, c: char) -> char {
        if c.is_ascii() {
            c.to_ascii_uppercase()
        } else {
            self.data.case_map(c, CaseKind::Title)
        }
    }

    /// Applies `kind` to a codepoint; invalid codepoints are returned as is.
    pub fn map_codepoint(&self, cp: Codepoint, kind: CaseKind) -> Codepoint {
        match cp.to_char() {
            Some(c) => Codepoint::from(self.map_char(c, kind)),
            None => cp,
        }
    }

    fn map_char(&self, c: char, kind: CaseKind) -> char {
        match kind {
            CaseKind::Lower => self.lowercase(c),
            CaseKind::Upper => self.uppercase(c),
            CaseKind::Title => self.titlecase(c),
            CaseKind::Fold if c.is_ascii() => c.to_ascii_lowercase(),
            CaseKind::Fold => self.data.case_map(c, CaseKind::Fold),
        }
    }

    /// Maps every character of `s` independently.
    pub fn map_str(&self, s: &str, kind: CaseKind) -> String {
        s.chars().map(|c| self.map_char(c, kind)).collect()
    }

    /// Maps every character of `s` independently, keeping annotations in place.
    pub fn map_annotated<T: Clone>(
        &self,
        s: &AnnotatedString<T>,
        kind: CaseKind,
    ) -> AnnotatedString<T> {
        s.map_chars(|c| self.map_char(c, kind))
    }
}

/// Lowercase of `c`.
pub fn lowercase(c: char) -> char {
    Casing::new().lowercase(c)
}

/// Uppercase of `c`.
pub fn uppercase(c: char) -> char {
    Casing::new().uppercase(c)
}

/// Titlecase of `c`.
pub fn titlecase(c: char) -> char {
    Casing::new().titlecase(c)
}

/// Lowercase of a possibly invalid codepoint.
pub fn lowercase_codepoint(cp: Codepoint) -> Codepoint {
    Casing::new().map_codepoint(cp, CaseKind::Lower)
}

/// Uppercase of a possibly invalid codepoint.
pub fn uppercase_codepoint(cp: Codepoint) -> Codepoint {
    Casing::new().map_codepoint(cp, CaseKind::Upper)
}

/// Titlecase of a possibly invalid codepoint.
pub fn titlecase_codepoint(cp: Codepoint) -> Codepoint {
    Casing::new().map_codepoint(cp, CaseKind::Title)
}

/// `s` with every character lowercased.
pub fn lowercase_str(s: &str) -> String {
    Casing::new().map_str(s, CaseKind::Lower)
}

/// `s` with every character uppercased.
pub fn uppercase_str(s: &str) -> String {
    Casing::new().map_str(s, CaseKind::Upper)
}

/// `s` with its first character uppercased.
///
/// ```
/// assert_eq!("Élan", runeops::uppercase_first("élan"));
/// ```
pub fn uppercase_first(s: &str) -> String {
    map_first(s, uppercase)
}

/// `s` with its first character lowercased.
pub fn lowercase_first(s: &str) -> String {
    map_first(s, lowercase)
}

fn map_first(s: &str, f: impl Fn(char) -> char) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(f(first));
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `s` lowercased, annotations kept on their characters.
pub fn lowercase_annotated<T: Clone>(s: &AnnotatedString<T>) -> AnnotatedString<T> {
    Casing::new().map_annotated(s, CaseKind::Lower)
}

/// `s` uppercased, annotations kept on their characters.
pub fn uppercase_annotated<T: Clone>(s: &AnnotatedString<T>) -> AnnotatedString<T> {
    Casing::new().map_annotated(s, CaseKind::Upper)
}

fn is_not_letter(c: char) -> bool {
    !category_with(&Tables, c.into()).is_letter()
}

/// Title-casing of whole strings.
///
/// A word starts after any separator character that also begins a new
/// grapheme cluster, so a separator never splits a cluster. The first
/// character of each word is titlecased; with `strict` (the default), the
/// rest are lowercased, otherwise left alone.
///
/// ```
/// use runeops::TitleCase;
///
/// let loose = TitleCase::new().strict(false);
/// assert_eq!("ISS - International Space Station", loose.apply("ISS - international space station"));
///
/// let by_space = TitleCase::new().separator(char::is_whitespace);
/// assert_eq!("A-a B-b", by_space.apply("a-a b-b"));
/// ```
#[derive(Clone, Copy)]
pub struct TitleCase<F = fn(char) -> bool, D = Tables> {
    separator: F,
    strict: bool,
    data: D,
}

impl TitleCase {
    /// Separators are non-letters; strict.
    pub fn new() -> Self {
        TitleCase {
            separator: is_not_letter,
            strict: true,
            data: Tables,
        }
    }
}

impl Default for TitleCase {
    fn default() -> Self {
        TitleCase::new()
    }
}

impl<F: Fn(char) -> bool, D: UnicodeData + Copy> TitleCase<F, D> {
    /// Replaces the word separator predicate.
    pub fn separator<G: Fn(char) -> bool>(self, separator: G) -> TitleCase<G, D> {
        TitleCase {
            separator,
            strict: self.strict,
            data: self.data,
        }
    }

    /// Whether characters inside a word are lowercased.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Uses the given Unicode data for boundaries and case mapping.
    pub fn with_data<E: UnicodeData + Copy>(self, data: E) -> TitleCase<F, E> {
        TitleCase {
            separator: self.separator,
            strict: self.strict,
            data,
        }
    }

    /// A stateful per-character mapper; feed it one string left to right.
    fn mapper(&self) -> impl FnMut(char) -> char + '_ {
        let breaker = GraphemeBreaker::with_data(self.data);
        let casing = Casing::with_data(self.data);
        let mut state = BreakState::new();
        let mut prev = '\0';
        let mut start_of_word = true;
        move |c| {
            let is_break = breaker.is_break_stateful(&mut state, prev.into(), c.into());
            prev = c;
            if is_break && (self.separator)(c) {
                start_of_word = true;
                c
            } else if start_of_word {
                start_of_word = false;
                casing.titlecase(c)
            } else if self.strict {
                casing.lowercase(c)
            } else {
                c
            }
        }
    }

    /// Title-cases `text`.
    pub fn apply(&self, text: &str) -> String {
        text.chars().map(self.mapper()).collect()
    }

    /// Title-cases `text`, keeping annotations in place.
    pub fn apply_annotated<T: Clone>(&self, text: &AnnotatedString<T>) -> AnnotatedString<T> {
        text.map_chars(self.mapper())
    }
}

impl<F, D: fmt::Debug> fmt::Debug for TitleCase<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleCase")
            .field("strict", &self.strict)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Title-cases `text` with the default separators, strictly.
///
/// ```
/// assert_eq!(
///     "The Julia Programming Language",
///     runeops::titlecase_str("the julia programming language")
/// );
/// ```
pub fn titlecase_str(text: &str) -> String {
    TitleCase::new().apply(text)
}

/// Title-cases `text` with the default separators, annotations kept in place.
pub fn titlecase_annotated<T: Clone>(text: &AnnotatedString<T>) -> AnnotatedString<T> {
    TitleCase::new().apply_annotated(text)
}
