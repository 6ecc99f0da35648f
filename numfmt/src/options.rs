//! FILENAME: numfmt/src/options.rs
//! PURPOSE: Parse and format configuration, validated at construction.
//! CONTEXT: Configuration is two-stage: a plain builder struct (raw
//! strings, deserializable from JSON) and an immutable compiled options
//! struct produced by `build()`. All validation — mask placeholders,
//! pattern capture groups — happens in `build()`, so a parse or format
//! call never hits a lazily-discovered configuration error.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mask::CompiledMask;
use crate::pattern::CapturePattern;
use crate::pipeline::{BadChars, FormattedNumber, NegativeNumber, Percentage, PipelineStage, Trim};
use crate::rounding::RoundingMode;

/// Default negative matcher: a leading minus sign wrapping the numeric text.
pub const DEFAULT_NEGATIVE_PATTERN: &str = "^-(.+)$";

/// Default percent matcher: a trailing percent sign.
pub const DEFAULT_PERCENT_PATTERN: &str = "^(.+)%$";

// ============================================================================
// PARSE OPTIONS
// ============================================================================

/// Raw parse configuration. Build with [`ParseOptionsBuilder::build`] to
/// validate patterns and assemble the stage list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptionsBuilder {
    decimal_separator: String,
    group_separator: String,
    strict: bool,
    trim: bool,
    remove_invalid_chars: bool,
    /// `None` disables negative-number handling entirely.
    negative_pattern: Option<String>,
    percent_enabled: bool,
    /// `None` falls back to [`DEFAULT_PERCENT_PATTERN`]; percent handling
    /// is gated by `percent_enabled`, not by this field.
    percent_pattern: Option<String>,
    /// `None` leaves the parsed value unrounded.
    rounding_decimal_places: Option<u32>,
    rounding_mode: RoundingMode,
    #[serde(skip)]
    extra_stages: Vec<Box<dyn PipelineStage>>,
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        ParseOptionsBuilder {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            strict: false,
            trim: true,
            remove_invalid_chars: false,
            negative_pattern: Some(DEFAULT_NEGATIVE_PATTERN.to_string()),
            percent_enabled: false,
            percent_pattern: None,
            rounding_decimal_places: None,
            rounding_mode: RoundingMode::HalfUp,
            extra_stages: Vec::new(),
        }
    }
}

impl ParseOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_remove_invalid_chars(mut self, remove: bool) -> Self {
        self.remove_invalid_chars = remove;
        self
    }

    pub fn with_negative_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.negative_pattern = Some(pattern.into());
        self
    }

    /// Disable negative-number handling; a leading minus will fail strict
    /// validation or numeric conversion instead of being recognized.
    pub fn without_negative_pattern(mut self) -> Self {
        self.negative_pattern = None;
        self
    }

    pub fn with_percent(mut self, enabled: bool) -> Self {
        self.percent_enabled = enabled;
        self
    }

    pub fn with_percent_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.percent_pattern = Some(pattern.into());
        self
    }

    pub fn with_rounding_decimal_places(mut self, places: u32) -> Self {
        self.rounding_decimal_places = Some(places);
        self
    }

    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    /// Append a caller-supplied stage after the built-in five. Extra
    /// stages run in both passes, in the order they were added.
    pub fn with_extra_stage(mut self, stage: Box<dyn PipelineStage>) -> Self {
        self.extra_stages.push(stage);
        self
    }

    /// Validate the configuration and compile the stage list.
    pub fn build(self) -> Result<ParseOptions, ConfigError> {
        let negative_pattern = self
            .negative_pattern
            .as_deref()
            .map(CapturePattern::new)
            .transpose()?;
        let percent_pattern = CapturePattern::new(
            self.percent_pattern.as_deref().unwrap_or(DEFAULT_PERCENT_PATTERN),
        )?;

        // fixed stage order: Trim -> NegativeNumber -> FormattedNumber ->
        // Percentage -> BadChars, each present only when enabled
        let mut stages: Vec<Box<dyn PipelineStage>> = Vec::new();
        if self.trim {
            stages.push(Box::new(Trim));
        }
        if negative_pattern.is_some() {
            stages.push(Box::new(NegativeNumber));
        }
        stages.push(Box::new(FormattedNumber));
        if self.percent_enabled {
            stages.push(Box::new(Percentage));
        }
        if self.remove_invalid_chars {
            stages.push(Box::new(BadChars));
        }
        stages.extend(self.extra_stages);

        Ok(ParseOptions {
            decimal_separator: self.decimal_separator,
            group_separator: self.group_separator,
            strict: self.strict,
            trim: self.trim,
            remove_invalid_chars: self.remove_invalid_chars,
            negative_pattern,
            percent_pattern,
            rounding_decimal_places: self.rounding_decimal_places,
            rounding_mode: self.rounding_mode,
            stages,
        })
    }
}

/// Immutable, validated parse configuration with its compiled stage list.
/// Safe to reuse across repeated parse calls.
#[derive(Debug)]
pub struct ParseOptions {
    decimal_separator: String,
    group_separator: String,
    strict: bool,
    trim: bool,
    remove_invalid_chars: bool,
    negative_pattern: Option<CapturePattern>,
    percent_pattern: CapturePattern,
    rounding_decimal_places: Option<u32>,
    rounding_mode: RoundingMode,
    stages: Vec<Box<dyn PipelineStage>>,
}

impl ParseOptions {
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }

    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    pub fn group_separator(&self) -> &str {
        &self.group_separator
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn trim(&self) -> bool {
        self.trim
    }

    pub fn remove_invalid_chars(&self) -> bool {
        self.remove_invalid_chars
    }

    pub fn negative_pattern(&self) -> Option<&CapturePattern> {
        self.negative_pattern.as_ref()
    }

    pub fn percent_pattern(&self) -> &CapturePattern {
        &self.percent_pattern
    }

    pub fn rounding_decimal_places(&self) -> Option<u32> {
        self.rounding_decimal_places
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn stages(&self) -> &[Box<dyn PipelineStage>] {
        &self.stages
    }
}

// ============================================================================
// FORMAT OPTIONS
// ============================================================================

/// Raw format configuration. Build with [`FormatOptionsBuilder::build`]
/// to validate and compile the masks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptionsBuilder {
    group_mask: String,
    decimal_mask: String,
    decimal_separator: String,
    /// Carried as configuration only; the format engine never emits a
    /// sign (see the crate docs on the parse/format sign asymmetry).
    negative_mask: String,
    prefix: Option<String>,
    postfix: Option<String>,
    rounding_mode: RoundingMode,
}

impl Default for FormatOptionsBuilder {
    fn default() -> Self {
        FormatOptionsBuilder {
            group_mask: ",###".to_string(),
            decimal_mask: "##".to_string(),
            decimal_separator: ".".to_string(),
            negative_mask: "-(.+)".to_string(),
            prefix: None,
            postfix: None,
            rounding_mode: RoundingMode::HalfUp,
        }
    }
}

impl FormatOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_mask(mut self, mask: impl Into<String>) -> Self {
        self.group_mask = mask.into();
        self
    }

    pub fn with_decimal_mask(mut self, mask: impl Into<String>) -> Self {
        self.decimal_mask = mask.into();
        self
    }

    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    pub fn with_negative_mask(mut self, mask: impl Into<String>) -> Self {
        self.negative_mask = mask.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    /// Validate the configuration and compile both masks. Fails when
    /// either mask lacks a `0`/`#` placeholder.
    pub fn build(self) -> Result<FormatOptions, ConfigError> {
        let group_mask = CompiledMask::grouping(&self.group_mask)?;
        let decimal_mask = CompiledMask::forward(&self.decimal_mask)?;

        Ok(FormatOptions {
            group_mask,
            decimal_mask,
            decimal_separator: self.decimal_separator,
            negative_mask: self.negative_mask,
            prefix: self.prefix,
            postfix: self.postfix,
            rounding_mode: self.rounding_mode,
        })
    }
}

/// Immutable, validated format configuration with its compiled masks.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    group_mask: CompiledMask,
    decimal_mask: CompiledMask,
    decimal_separator: String,
    negative_mask: String,
    prefix: Option<String>,
    postfix: Option<String>,
    rounding_mode: RoundingMode,
}

impl FormatOptions {
    pub fn builder() -> FormatOptionsBuilder {
        FormatOptionsBuilder::new()
    }

    pub fn group_mask(&self) -> &CompiledMask {
        &self.group_mask
    }

    pub fn decimal_mask(&self) -> &CompiledMask {
        &self.decimal_mask
    }

    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    pub fn negative_mask(&self) -> &str {
        &self.negative_mask
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn postfix(&self) -> Option<&str> {
        self.postfix.as_deref()
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }
}
