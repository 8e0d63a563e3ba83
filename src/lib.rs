#![deny(unsafe_op_in_unsafe_fn)]
#![deny(warnings, missing_docs, missing_debug_implementations)]
//! Unicode text primitives: normalization, case mapping and grapheme
//! cluster segmentation.
//!
//! All per-codepoint Unicode knowledge comes from a [`UnicodeData`]
//! service. The built-in [`Tables`] service is backed by the ICU4X
//! compiled data; every algorithm in this crate also has a `with_data`
//! form taking a custom service.
//!
//! # Codepoints
//!
//! Text scanned from raw bytes may not be valid UTF-8. A [`Codepoint`]
//! records whether it was decoded from an overlong sequence or from
//! bytes that are not a codepoint at all. Such codepoints are never valid,
//! always form grapheme clusters of their own, and are passed through
//! unchanged by case mapping.
//!
//! # Normalization
//!
//! [`normalize`] takes a [`NormalizeConfig`] of independent switches on
//! top of the four standard forms: newline conversion, control and
//! ignorable stripping, case folding, mark stripping, punctuation lumping
//! and an arbitrary per-character transform applied before decomposition.
//!
//! # Grapheme clusters
//!
//! Boundaries follow the extended grapheme cluster rules of UAX #29.
//! [`graphemes`] iterates the clusters of a `&str` or a `&[u8]`;
//! [`GraphemePosition`] lets a scan be suspended and resumed.
//!
//! # Case mapping
//!
//! Lower, upper and titlecase mappings are simple (one character to one
//! character). [`TitleCase`] capitalizes words, using grapheme boundaries
//! and a configurable separator predicate to find where words start.

pub(crate) mod annotated;

pub(crate) mod case;

pub(crate) mod category;

pub(crate) mod codepoint;

pub(crate) mod confusable;

pub(crate) mod error;

pub(crate) mod grapheme;

pub(crate) mod normalize;

pub(crate) mod ucd;

pub mod utf8;

pub(crate) mod width;

pub use annotated::{AnnotatedString, Annotation};

pub use case::{
    lowercase, lowercase_annotated, lowercase_codepoint, lowercase_first, lowercase_str,
    titlecase, titlecase_annotated, titlecase_codepoint, titlecase_str, uppercase,
    uppercase_annotated, uppercase_codepoint, uppercase_first, uppercase_str, Casing, TitleCase,
};

pub use category::{
    category, is_cased, is_control, is_digit, is_graphic, is_hex_digit, is_letter, is_lowercase,
    is_numeric, is_print, is_punctuation, is_space, is_uppercase, Category,
};

pub use codepoint::{is_valid, Codepoint, MAX_SCALAR};

pub use confusable::{confusable_remap, normalize_identifier};

pub use error::{Error, Result, UcdError};

pub use grapheme::{
    graphemes, is_grapheme_break, is_grapheme_break_stateful, BreakState, GraphemeBreaker,
    GraphemeClusters, GraphemePosition, Graphemes, TextSource,
};

pub use normalize::{
    normalize, normalize_form, normalize_named, NewlineMode, NormalizationForm, NormalizeConfig,
    NormalizeOptions, Normalizer,
};

pub use ucd::{CaseKind, Tables, UnicodeData};

pub use width::{char_width, text_width, text_width_with};

/// Number of grapheme clusters in `text`.
///
/// ```
/// assert_eq!(3, runeops::length("e\u{0301}\r\n\u{1F1EB}\u{1F1F7}"));
/// ```
pub fn length(text: &str) -> usize {
    graphemes(text).count_clusters()
}
