//! FILENAME: numfmt/src/lib.rs
//! PURPOSE: Main library entry point for the number parsing/formatting engine.
//! CONTEXT: Re-exports public types and the two engine entry points.
//!
//! Parsing turns free-form numeric text (grouped, signed, percent,
//! locale-punctuated) into `f64` through an ordered pipeline of string
//! stages. Formatting turns `f64` into display text through compiled
//! digit masks. Both sides are configured through builders validated at
//! build time, so a parse or format call never trips over a bad mask or
//! pattern.

pub mod error;
pub mod format;
pub mod mask;
pub mod options;
pub mod parse;
pub mod pattern;
pub mod pipeline;
pub mod rounding;

// Re-export commonly used types at the crate root
pub use error::{ConfigError, FormatError, ParseError};
pub use format::{format_number, presets};
pub use mask::CompiledMask;
pub use options::{
    FormatOptions, FormatOptionsBuilder, ParseOptions, ParseOptionsBuilder,
    DEFAULT_NEGATIVE_PATTERN, DEFAULT_PERCENT_PATTERN,
};
pub use parse::parse_number;
pub use pattern::CapturePattern;
pub use pipeline::{ParseContext, PipelineStage};
pub use rounding::{round, RoundingMode};
