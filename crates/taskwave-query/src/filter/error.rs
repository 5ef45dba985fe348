//! Error types for building filter criteria.

use thiserror::Error;

/// A specialized Result type for filter criteria operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building filter criteria from user input.
///
/// Applying criteria never fails; these errors only come from parsing
/// selector strings, dates and preset ids.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A criteria field was given a value outside its domain.
    #[error("invalid {field}: '{value}'")]
    InvalidValue {
        /// The criteria field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A date bound could not be parsed.
    #[error("invalid date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The rejected date string.
        value: String,
    },

    /// No preset exists with the given id.
    #[error("unknown preset: {id}")]
    UnknownPreset {
        /// The requested preset id.
        id: String,
    },
}

impl FilterError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        FilterError::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            value: value.into(),
        }
    }

    /// Creates an unknown preset error.
    pub fn unknown_preset(id: impl Into<String>) -> Self {
        FilterError::UnknownPreset { id: id.into() }
    }
}
