//! FILENAME: numfmt/src/format.rs
//! PURPOSE: The format engine: f64 to mask-shaped display text.
//! CONTEXT: Rounds the value to the decimal mask's placeholder count,
//! splits its decimal representation into integer and fractional digit
//! strings, and applies the compiled group and decimal masks. The engine
//! formats the magnitude only and never emits a sign; sign presentation
//! is the caller's concern (the negative mask travels in the options as
//! configuration for that caller).

use log::debug;

use crate::error::FormatError;
use crate::options::FormatOptions;
use crate::rounding::round;

/// Format a value under the given options.
///
/// Non-finite values are rejected. The value is rounded first when it
/// carries more fractional digits than the decimal mask has placeholder
/// slots, using the configured rounding mode.
pub fn format_number(value: f64, options: &FormatOptions) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite(value));
    }
    debug!("formatting {value}");

    let slots = options.decimal_mask().digit_slots();
    let rounded = if fraction_len(value) > slots {
        round(value, slots as u32, value < 0.0, options.rounding_mode())
    } else {
        value
    };

    let repr = rounded.abs().to_string();
    let (int_digits, frac_digits) = match repr.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (repr.as_str(), ""),
    };

    let int_text = options.group_mask().apply(int_digits)?;
    let frac_text = options.decimal_mask().apply(frac_digits)?;

    let mut result = String::new();
    if let Some(prefix) = options.prefix() {
        result.push_str(prefix);
    }
    result.push_str(&int_text);
    if !frac_text.is_empty() {
        result.push_str(options.decimal_separator());
        result.push_str(&frac_text);
    }
    if let Some(postfix) = options.postfix() {
        result.push_str(postfix);
    }

    debug!("formatted {value} as {result:?}");
    Ok(result)
}

fn fraction_len(value: f64) -> usize {
    let repr = value.to_string();
    match repr.split_once('.') {
        Some((_, frac)) => frac.len(),
        None => 0,
    }
}

// ============================================================================
// PRESETS
// ============================================================================

/// Ready-made format configurations for common shapes. Each returns a
/// builder so callers can adjust it further before building.
pub mod presets {
    use crate::options::FormatOptionsBuilder;

    fn decimal_mask_for(places: u32) -> String {
        if places == 0 {
            "#".to_string()
        } else {
            "0".repeat(places as usize)
        }
    }

    /// Ungrouped digits with a fixed number of decimal places.
    pub fn plain(places: u32) -> FormatOptionsBuilder {
        FormatOptionsBuilder::new()
            .with_group_mask("##0")
            .with_decimal_mask(decimal_mask_for(places))
    }

    /// Comma-grouped thousands with a fixed number of decimal places.
    pub fn grouped(places: u32) -> FormatOptionsBuilder {
        FormatOptionsBuilder::new()
            .with_group_mask(",##0")
            .with_decimal_mask(decimal_mask_for(places))
    }

    /// A trailing percent sign. The value is formatted as given; callers
    /// scale a ratio by 100 before formatting (0.125 formats as "12.5%"
    /// only when passed as 12.5).
    pub fn percent(places: u32) -> FormatOptionsBuilder {
        grouped(places).with_postfix("%")
    }

    /// Comma-grouped thousands behind a fixed prefix, e.g. a currency
    /// symbol.
    pub fn prefixed(prefix: &str, places: u32) -> FormatOptionsBuilder {
        grouped(places).with_prefix(prefix)
    }
}
