//! FILENAME: numfmt/src/parse.rs
//! PURPOSE: The parse engine: free-form numeric text to f64.
//! CONTEXT: Runs the configured stage list twice over the input (pre-pass
//! then post-pass), converts the surviving string to f64, and applies the
//! optional final rounding step. The stage list itself is fixed at options
//! build time; this module only drives it.

use log::{debug, trace};

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::pipeline::ParseContext;
use crate::rounding::round;

/// Parse a textual number under the given options.
///
/// The pre-pass reduces the input to digits and at most one decimal
/// point; the post-pass re-applies sign and percent semantics; the
/// result is converted to `f64` and, when `rounding_decimal_places` is
/// configured, rounded as a final step.
pub fn parse_number(input: &str, options: &ParseOptions) -> Result<f64, ParseError> {
    debug!("parsing {input:?}");
    let mut ctx = ParseContext::new(options);

    let mut current = input.to_string();
    for stage in options.stages() {
        current = stage.pre_pass(input, current, &mut ctx)?;
        trace!("after {} pre-pass: {current:?}", stage.name());
    }

    ctx.is_post_phase = true;
    for stage in options.stages() {
        current = stage.post_pass(input, current, &mut ctx)?;
        trace!("after {} post-pass: {current:?}", stage.name());
    }

    let value: f64 = current
        .parse()
        .map_err(|_| ParseError::NotANumber(current.clone()))?;
    if !value.is_finite() {
        return Err(ParseError::NotANumber(current));
    }

    // sign comes from the parsed value itself: negative input can reach
    // this point without the NegativeNumber stage (e.g. a bare leading
    // minus with negative handling disabled)
    let value = match options.rounding_decimal_places() {
        Some(places) => round(value, places, value < 0.0, options.rounding_mode()),
        None => value,
    };

    debug!("parsed {input:?} as {value}");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptionsBuilder;
    use crate::rounding::RoundingMode;

    fn default_options() -> ParseOptions {
        ParseOptionsBuilder::new().build().unwrap()
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_number("42", &default_options()).unwrap(), 42.0);
    }

    #[test]
    fn test_grouped_negative_decimal() {
        assert_eq!(
            parse_number("-1,234.50", &default_options()).unwrap(),
            -1234.5
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(parse_number("  1,234  ", &default_options()).unwrap(), 1234.0);
    }

    #[test]
    fn test_trim_disabled_keeps_whitespace_visible() {
        let options = ParseOptionsBuilder::new().with_trim(false).build().unwrap();
        assert!(matches!(
            parse_number(" 42", &options),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_european_punctuation() {
        let options = ParseOptionsBuilder::new()
            .with_decimal_separator(",")
            .with_group_separator(".")
            .build()
            .unwrap();
        assert_eq!(parse_number("1.234,56", &options).unwrap(), 1234.56);
    }

    #[test]
    fn test_percent_scales_by_one_hundred() {
        let options = ParseOptionsBuilder::new().with_percent(true).build().unwrap();
        assert_eq!(parse_number("12.5%", &options).unwrap(), 0.125);
        assert_eq!(parse_number("100%", &options).unwrap(), 1.0);
    }

    #[test]
    fn test_negative_percent() {
        let options = ParseOptionsBuilder::new().with_percent(true).build().unwrap();
        assert_eq!(parse_number("-50%", &options).unwrap(), -0.5);
    }

    #[test]
    fn test_percent_disabled_leaves_percent_sign_behind() {
        assert!(matches!(
            parse_number("12.5%", &default_options()),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_strict_rejects_double_decimal_point() {
        let options = ParseOptionsBuilder::new().with_strict(true).build().unwrap();
        assert!(matches!(
            parse_number("12.3.4", &options),
            Err(ParseError::MultipleDecimalPoints(2))
        ));
    }

    #[test]
    fn test_strict_rejects_stray_characters() {
        let options = ParseOptionsBuilder::new().with_strict(true).build().unwrap();
        assert!(matches!(
            parse_number("12a4", &options),
            Err(ParseError::DisallowedChars { count: 1, .. })
        ));
    }

    #[test]
    fn test_bad_chars_removal_salvages_currency_text() {
        let options = ParseOptionsBuilder::new()
            .with_remove_invalid_chars(true)
            .build()
            .unwrap();
        assert_eq!(parse_number("$1,234.56", &options).unwrap(), 1234.56);
    }

    #[test]
    fn test_non_numeric_leftovers_fail() {
        assert!(matches!(
            parse_number("hello", &default_options()),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            parse_number("", &default_options()),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_final_rounding_step() {
        let options = ParseOptionsBuilder::new()
            .with_rounding_decimal_places(2)
            .build()
            .unwrap();
        assert_eq!(parse_number("1.005", &options).unwrap(), 1.01);
        assert_eq!(parse_number("1.004", &options).unwrap(), 1.0);
    }

    #[test]
    fn test_final_rounding_respects_mode() {
        let options = ParseOptionsBuilder::new()
            .with_rounding_decimal_places(0)
            .with_rounding_mode(RoundingMode::TowardsZero)
            .build()
            .unwrap();
        assert_eq!(parse_number("2.9", &options).unwrap(), 2.0);
        assert_eq!(parse_number("-2.9", &options).unwrap(), -2.0);
    }

    #[test]
    fn test_final_rounding_sign_survives_disabled_negative_handling() {
        // a bare leading minus still parses numerically when the
        // NegativeNumber stage is absent; directional rounding must
        // follow the value's own sign, not the stage flag
        let options = ParseOptionsBuilder::new()
            .without_negative_pattern()
            .with_rounding_decimal_places(0)
            .with_rounding_mode(RoundingMode::AwayFromZero)
            .build()
            .unwrap();
        assert_eq!(parse_number("-2.1", &options).unwrap(), -3.0);
        assert_eq!(parse_number("2.1", &options).unwrap(), 3.0);
    }

    #[test]
    fn test_custom_negative_pattern_accounting_style() {
        let options = ParseOptionsBuilder::new()
            .with_negative_pattern(r"^\((.+)\)$")
            .build()
            .unwrap();
        assert_eq!(parse_number("(1,234.56)", &options).unwrap(), -1234.56);
        // a plain minus no longer matches anything
        assert!(parse_number("-5", &options).is_err());
    }

    #[test]
    fn test_negative_handling_disabled() {
        let options = ParseOptionsBuilder::new()
            .without_negative_pattern()
            .with_strict(true)
            .build()
            .unwrap();
        assert!(matches!(
            parse_number("-5", &options),
            Err(ParseError::DisallowedChars { .. })
        ));
    }
}
