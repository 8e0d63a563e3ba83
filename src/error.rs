//! Error types for normalization and the Unicode data service.

use thiserror::Error;

/// Status reported by a [`UnicodeData`](crate::UnicodeData) service.
///
/// The messages follow the diagnostics of the classic C Unicode
/// processing libraries so they can be surfaced to users verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UcdError {
    /// Scratch memory could not be allocated.
    #[error("Memory for processing UTF-8 data could not be allocated.")]
    NoMemory,

    /// The decomposed text would not fit in addressable memory.
    #[error("UTF-8 string is too long to be processed.")]
    Overflow,

    /// The input contained something that is not a scalar value.
    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    /// An unassigned codepoint was found while unassigned codepoints are rejected.
    #[error("Unassigned Unicode code point found in UTF-8 string.")]
    NotAssigned,

    /// The service was handed an option set it cannot honour.
    #[error("Invalid options for UTF-8 processing chosen.")]
    InvalidOptions,
}

/// Main error type of this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid or contradictory normalization options.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The Unicode data service failed while decomposing or re-encoding.
    #[error("Normalization error: {0}")]
    Normalization(String),
}

impl From<UcdError> for Error {
    fn from(err: UcdError) -> Self {
        Error::Normalization(err.to_string())
    }
}

/// Result type alias for fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_is_carried() {
        let err = Error::from(UcdError::NotAssigned);
        assert_eq!(
            Error::Normalization("Unassigned Unicode code point found in UTF-8 string.".into()),
            err
        );
        assert!(err.to_string().starts_with("Normalization error: "));
    }
}
