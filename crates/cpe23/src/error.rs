//! Error types for CPE 2.3 validation

use crate::parse::Attribute;
use thiserror::Error;

/// Result type alias using the crate Error
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures. All are terminal: the first failure aborts the
/// whole parse and no partial result is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("CPE string must not contain whitespace")]
    WhitespaceNotAllowed,

    #[error("expected 'cpe:2.3:' followed by exactly 11 non-empty colon-separated fields")]
    FieldCountOrPrefixMismatch,

    #[error("invalid syntax in '{attribute}' component: {value:?}")]
    InvalidComponentSyntax { attribute: Attribute, value: String },

    #[error("invalid language tag: {value:?}")]
    InvalidLanguageTag { value: String },
}

impl Error {
    /// Get an error code for logging/metrics
    pub fn code(&self) -> &'static str {
        match self {
            Error::WhitespaceNotAllowed => "WHITESPACE",
            Error::FieldCountOrPrefixMismatch => "STRUCTURE_MISMATCH",
            Error::InvalidComponentSyntax { .. } => "INVALID_COMPONENT",
            Error::InvalidLanguageTag { .. } => "INVALID_LANGUAGE_TAG",
        }
    }
}
