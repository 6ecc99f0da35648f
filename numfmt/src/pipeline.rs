//! FILENAME: numfmt/src/pipeline.rs
//! PURPOSE: The ordered string-transformation stages behind parsing.
//! CONTEXT: Parsing runs an ordered list of stateless stages twice over
//! the input: a pre-pass reducing the raw string to pure digits plus a
//! decimal point, and a post-pass (same stage order) re-applying sign and
//! percent semantics. Per-call state lives in ParseContext; the stages
//! themselves hold nothing. The list is assembled once, at options build
//! time, from the enabled features:
//!
//!   Trim -> NegativeNumber -> FormattedNumber -> Percentage -> BadChars

use log::trace;

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::rounding::round;

/// Transient per-call parse state. Created at the start of a parse call
/// and discarded at the end; never shared across calls.
#[derive(Debug)]
pub struct ParseContext<'a> {
    pub options: &'a ParseOptions,
    /// Set by the NegativeNumber pre-pass when the negative pattern matched.
    pub is_negative: bool,
    /// Set by the Percentage pre-pass when the percent pattern matched.
    pub is_percent: bool,
    /// False during the pre-pass, true during the post-pass.
    pub is_post_phase: bool,
}

impl<'a> ParseContext<'a> {
    pub fn new(options: &'a ParseOptions) -> Self {
        ParseContext {
            options,
            is_negative: false,
            is_percent: false,
            is_post_phase: false,
        }
    }
}

/// A stateless transformation stage run in a fixed order during both
/// passes of a parse call. `raw` is always the original input string;
/// `current` is the string as transformed by the stages so far.
pub trait PipelineStage: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn pre_pass(
        &self,
        raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError>;

    fn post_pass(
        &self,
        _raw: &str,
        current: String,
        _ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        Ok(current)
    }
}

// ============================================================================
// BUILT-IN STAGES
// ============================================================================

/// Strips leading and trailing whitespace. Identity on the post-pass.
#[derive(Debug)]
pub(crate) struct Trim;

impl PipelineStage for Trim {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn pre_pass(
        &self,
        _raw: &str,
        current: String,
        _ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        Ok(current.trim().to_string())
    }
}

/// Captures the inner text of the configured negative pattern on the
/// pre-pass; restores exactly one leading minus sign on the post-pass.
#[derive(Debug)]
pub(crate) struct NegativeNumber;

impl PipelineStage for NegativeNumber {
    fn name(&self) -> &'static str {
        "negative-number"
    }

    fn pre_pass(
        &self,
        _raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        if let Some(pattern) = ctx.options.negative_pattern() {
            if let Some(inner) = pattern.capture(&current) {
                ctx.is_negative = true;
                trace!("negative match, inner text {inner:?}");
                return Ok(inner.to_string());
            }
        }
        Ok(current)
    }

    fn post_pass(
        &self,
        _raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        if ctx.is_negative {
            Ok(format!("-{current}"))
        } else {
            Ok(current)
        }
    }
}

/// Strips group separators and canonicalizes the decimal separator to a
/// decimal point. In strict mode, rejects inputs with more than one
/// decimal point and (unless invalid-character removal is enabled) any
/// character outside `[0-9.]`. No post-pass effect.
#[derive(Debug)]
pub(crate) struct FormattedNumber;

impl PipelineStage for FormattedNumber {
    fn name(&self) -> &'static str {
        "formatted-number"
    }

    fn pre_pass(
        &self,
        _raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        let options = ctx.options;

        let mut value = if options.group_separator().is_empty() {
            current
        } else {
            current.replace(options.group_separator(), "")
        };
        if options.decimal_separator() != "." {
            value = value.replace(options.decimal_separator(), ".");
        }

        if options.strict() {
            let points = value.matches('.').count();
            if points > 1 {
                return Err(ParseError::MultipleDecimalPoints(points));
            }
            if !options.remove_invalid_chars() {
                let count = value
                    .chars()
                    .filter(|c| !c.is_ascii_digit() && *c != '.')
                    .count();
                if count > 0 {
                    return Err(ParseError::DisallowedChars { count, input: value });
                }
            }
        }

        Ok(value)
    }
}

/// Captures the inner text of the percent pattern on the pre-pass. On the
/// post-pass, divides the value by 100 and re-rounds to the fractional
/// digit count originally present plus two, preserving percent precision.
#[derive(Debug)]
pub(crate) struct Percentage;

impl PipelineStage for Percentage {
    fn name(&self) -> &'static str {
        "percentage"
    }

    fn pre_pass(
        &self,
        _raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        if let Some(inner) = ctx.options.percent_pattern().capture(&current) {
            ctx.is_percent = true;
            trace!("percent match, inner text {inner:?}");
            return Ok(inner.to_string());
        }
        Ok(current)
    }

    fn post_pass(
        &self,
        _raw: &str,
        current: String,
        ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        if !ctx.is_percent {
            return Ok(current);
        }

        // the decimal separator is canonical by this point
        let places = match current.find('.') {
            Some(idx) => (current.len() - idx - 1) as u32 + 2,
            None => 2,
        };

        let value: f64 = current
            .parse()
            .map_err(|_| ParseError::NotANumber(current.clone()))?;
        let scaled = round(
            value / 100.0,
            places,
            ctx.is_negative,
            ctx.options.rounding_mode(),
        );
        trace!("percent value {value} scaled to {scaled}");
        Ok(scaled.to_string())
    }
}

/// Strips every character outside `[0-9.]`. No post-pass effect.
#[derive(Debug)]
pub(crate) struct BadChars;

impl PipelineStage for BadChars {
    fn name(&self) -> &'static str {
        "bad-chars"
    }

    fn pre_pass(
        &self,
        _raw: &str,
        current: String,
        _ctx: &mut ParseContext,
    ) -> Result<String, ParseError> {
        Ok(current
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect())
    }
}
