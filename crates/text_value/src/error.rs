//! Error types for text value operations

use thiserror::Error;

/// Errors that can occur in text value operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// An argument was not a string or text value
    #[error("expected a str or text value, got {value:?} of type {type_name}")]
    ExpectedStringLike {
        value: String,
        type_name: &'static str,
    },

    /// A separator was given but is empty
    #[error("empty separator")]
    EmptySeparator,

    /// `index`/`rindex` did not find the substring
    #[error("substring not found")]
    SubstringNotFound,

    /// Slice step of zero
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// Malformed format template or missing argument
    #[error("Format error: {0}")]
    Format(String),

    /// Invalid translation table arguments
    #[error("Translation table error: {0}")]
    TranslationTable(String),

    /// A separator matcher could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(String),
}

impl TextError {
    /// Create a type error for a value that is not text-like
    pub fn expected_string_like(value: impl Into<String>, type_name: &'static str) -> Self {
        Self::ExpectedStringLike {
            value: value.into(),
            type_name,
        }
    }
}

/// Result type for text value operations
pub type Result<T> = std::result::Result<T, TextError>;
