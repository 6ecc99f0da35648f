//! FILENAME: numfmt/src/error.rs
//! PURPOSE: Typed error channels for the number engine.
//! CONTEXT: Configuration problems, expected parse failures, and format
//! failures are deliberately separate enums so callers can distinguish a
//! misconfigured mask or pattern (caught at construction) from an input
//! string that simply failed validation or numeric conversion.

use thiserror::Error;

/// Construction-time configuration errors. Fatal to the options instance
/// being built; never raised during a parse or format call on validated
/// options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("mask {0:?} must contain at least one '0' or '#' placeholder")]
    MaskWithoutPlaceholders(String),

    #[error("pattern {pattern:?} must contain exactly one capture group, found {found}")]
    PatternCaptureCount { pattern: String, found: usize },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Expected parse failures. Validation variants only occur in strict mode;
/// `NotANumber` means the fully transformed string did not convert to a
/// finite numeric value.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("input has {0} decimal points, expected at most one")]
    MultipleDecimalPoints(usize),

    #[error("input has {count} disallowed characters: {input:?}")]
    DisallowedChars { count: usize, input: String },

    #[error("value {0:?} is not a number")]
    NotANumber(String),
}

/// Format-call failures.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("cannot format non-finite value {0}")]
    NonFinite(f64),

    #[error("mask {mask:?} is shorter than digit string {digits:?}")]
    MaskTooShort { mask: String, digits: String },
}
