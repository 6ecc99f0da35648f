//! FILENAME: numfmt/src/mask.rs
//! PURPOSE: Mask compilation and application for digit strings.
//! CONTEXT: A mask is a template over the alphabet {`0`, `#`, literal}.
//! `0` is a mandatory digit position (zero-padded when no digit remains),
//! `#` is an optional digit position (terminates the walk when no digit
//! remains), and any other character passes through verbatim. The group
//! mask is applied repeating and reversed (thousands grouping); the
//! decimal mask is applied once, left to right.

use log::trace;

use crate::error::{ConfigError, FormatError};

/// An immutable compiled mask descriptor.
///
/// Construction is the validation point: a mask with no digit placeholder
/// is rejected, and the repeating flag can only be combined with the
/// reversed flag (via [`CompiledMask::grouping`]) — a repeating forward
/// mask has no supported meaning and cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMask {
    mask: String,
    digit_slots: usize,
    repeating: bool,
    reversed: bool,
}

impl CompiledMask {
    /// Compile a non-repeating mask applied left to right (decimal part).
    pub fn forward(mask: &str) -> Result<Self, ConfigError> {
        Self::compile(mask, false, false)
    }

    /// Compile a non-repeating mask applied right to left (right-aligned
    /// masks).
    pub fn reversed(mask: &str) -> Result<Self, ConfigError> {
        Self::compile(mask, false, true)
    }

    /// Compile a repeating, reversed mask (integer-part grouping). The
    /// placeholder count becomes the repeating group size.
    pub fn grouping(mask: &str) -> Result<Self, ConfigError> {
        Self::compile(mask, true, true)
    }

    fn compile(mask: &str, repeating: bool, reversed: bool) -> Result<Self, ConfigError> {
        let digit_slots = mask.chars().filter(|c| matches!(c, '0' | '#')).count();
        if digit_slots == 0 {
            return Err(ConfigError::MaskWithoutPlaceholders(mask.to_string()));
        }
        Ok(CompiledMask {
            mask: mask.to_string(),
            digit_slots,
            repeating,
            reversed,
        })
    }

    /// Number of digit placeholders in the mask.
    pub fn digit_slots(&self) -> usize {
        self.digit_slots
    }

    /// Apply the mask to a pure-digit string.
    pub fn apply(&self, digits: &str) -> Result<String, FormatError> {
        trace!(
            "applying mask {:?} (repeating={}, reversed={}) to {digits:?}",
            self.mask,
            self.repeating,
            self.reversed
        );
        if self.repeating {
            self.apply_grouping(digits)
        } else if self.reversed {
            self.apply_reversed(digits, false)
        } else {
            self.apply_forward(digits)
        }
    }

    /// Forward walk: digits take priority position-for-position against
    /// placeholders; literal characters inside the digit run pass through
    /// at their position. Once digits are exhausted, `0` zero-pads, `#`
    /// terminates the walk, and a literal is emitted once and terminates.
    fn apply_forward(&self, digits: &str) -> Result<String, FormatError> {
        let mask_chars: Vec<char> = self.mask.chars().collect();
        let digit_chars: Vec<char> = digits.chars().collect();
        self.check_length(&digit_chars, digits)?;

        let mut result = String::new();
        for (i, &mask_ch) in mask_chars.iter().enumerate() {
            if i < digit_chars.len() {
                // still digits to place
                if mask_ch == '0' || mask_ch == '#' {
                    result.push(digit_chars[i]);
                } else {
                    result.push(mask_ch);
                }
            } else {
                match mask_ch {
                    '0' => result.push('0'),
                    '#' => break,
                    literal => {
                        result.push(literal);
                        break;
                    }
                }
            }
        }

        Ok(self.collapse_optional_zero(result))
    }

    /// Reversed walk: mirror of the forward walk, scanning mask and digits
    /// from the right. Literal mask characters met while digits remain are
    /// held and flushed immediately before the next digit, preserving
    /// their relative position. When `are_more` is set (more significant
    /// chunks follow in a grouping application), leading held literals are
    /// retained so the separator lands between chunks.
    fn apply_reversed(&self, digits: &str, are_more: bool) -> Result<String, FormatError> {
        let mask_chars: Vec<char> = self.mask.chars().collect();
        let digit_chars: Vec<char> = digits.chars().collect();
        self.check_length(&digit_chars, digits)?;

        let mut result = String::new();
        let mut held: Option<String> = None;
        let mut digit_pos = digit_chars.len();

        for &mask_ch in mask_chars.iter().rev() {
            if digit_pos > 0 {
                // still digits to place
                if mask_ch == '0' || mask_ch == '#' {
                    digit_pos -= 1;
                    if let Some(h) = held.take() {
                        result.insert_str(0, &h);
                    }
                    result.insert(0, digit_chars[digit_pos]);
                } else {
                    hold(&mut held, mask_ch);
                }
            } else {
                match mask_ch {
                    '0' => {
                        if let Some(h) = held.take() {
                            result.insert_str(0, &h);
                        }
                        result.insert(0, '0');
                    }
                    '#' => break,
                    literal => hold(&mut held, literal),
                }
            }
        }

        if are_more {
            if let Some(h) = held {
                result.insert_str(0, &h);
            }
        }

        Ok(self.collapse_optional_zero(result))
    }

    /// Grouping walk: partition the digit string from its right end into
    /// chunks of `digit_slots` characters (the leftmost chunk may be
    /// shorter) and apply the reversed walk to each. An empty chunk result
    /// halts the walk, which suppresses all-zero more-significant groups.
    fn apply_grouping(&self, digits: &str) -> Result<String, FormatError> {
        let digit_chars: Vec<char> = digits.chars().collect();
        let mut result = String::new();
        let mut pos = digit_chars.len();

        loop {
            let bottom = pos.saturating_sub(self.digit_slots);
            let chunk: String = digit_chars[bottom..pos].iter().collect();
            let piece = self.apply_reversed(&chunk, bottom > 0)?;
            if piece.is_empty() {
                break;
            }
            result.insert_str(0, &piece);
            if bottom == 0 {
                break;
            }
            pos = bottom;
        }

        Ok(result)
    }

    fn check_length(&self, digit_chars: &[char], digits: &str) -> Result<(), FormatError> {
        if self.mask.chars().count() < digit_chars.len() {
            return Err(FormatError::MaskTooShort {
                mask: self.mask.clone(),
                digits: digits.to_string(),
            });
        }
        Ok(())
    }

    /// A result of a single `'0'` under a mask whose last character is `#`
    /// collapses to the empty string: the trailing position was fully
    /// optional, so a bare padding zero is suppressed.
    fn collapse_optional_zero(&self, result: String) -> String {
        if result == "0" && self.mask.ends_with('#') {
            String::new()
        } else {
            result
        }
    }
}

fn hold(held: &mut Option<String>, ch: char) {
    match held {
        Some(h) => h.insert(0, ch),
        None => *held = Some(ch.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_counts_placeholders() {
        let mask = CompiledMask::grouping(",###").unwrap();
        assert_eq!(mask.digit_slots(), 3);

        let mask = CompiledMask::forward("0#0").unwrap();
        assert_eq!(mask.digit_slots(), 3);
    }

    #[test]
    fn test_compile_rejects_placeholder_free_mask() {
        assert!(matches!(
            CompiledMask::grouping("---"),
            Err(ConfigError::MaskWithoutPlaceholders(_))
        ));
        assert!(matches!(
            CompiledMask::forward(""),
            Err(ConfigError::MaskWithoutPlaceholders(_))
        ));
    }

    #[test]
    fn test_forward_digits_win_over_placeholders() {
        let mask = CompiledMask::forward("##").unwrap();
        assert_eq!(mask.apply("5").unwrap(), "5");
        assert_eq!(mask.apply("57").unwrap(), "57");
    }

    #[test]
    fn test_forward_zero_pads() {
        let mask = CompiledMask::forward("00").unwrap();
        assert_eq!(mask.apply("").unwrap(), "00");
        assert_eq!(mask.apply("5").unwrap(), "50");
    }

    #[test]
    fn test_forward_hash_terminates_without_padding() {
        let mask = CompiledMask::forward("0#").unwrap();
        assert_eq!(mask.apply("").unwrap(), "0");
        let mask = CompiledMask::forward("##").unwrap();
        assert_eq!(mask.apply("").unwrap(), "");
    }

    #[test]
    fn test_forward_literal_emitted_once_then_stops() {
        let mask = CompiledMask::forward("00 #").unwrap();
        // digits exhausted at the literal: emit it, then stop
        assert_eq!(mask.apply("5").unwrap(), "50 ");
    }

    #[test]
    fn test_forward_collapses_fully_optional_zero() {
        // a lone padded zero under a trailing-# mask disappears
        let mask = CompiledMask::forward("0#").unwrap();
        assert_eq!(mask.apply("0").unwrap(), "");
    }

    #[test]
    fn test_forward_rejects_more_digits_than_mask() {
        let mask = CompiledMask::forward("##").unwrap();
        assert!(matches!(
            mask.apply("123"),
            Err(FormatError::MaskTooShort { .. })
        ));
    }

    #[test]
    fn test_reversed_holds_literals_until_next_digit() {
        let mask = CompiledMask::reversed("#-##").unwrap();
        assert_eq!(mask.apply("123").unwrap(), "1-23");
        // literal is dropped when no digit follows to justify it
        assert_eq!(mask.apply("12").unwrap(), "12");
    }

    #[test]
    fn test_reversed_zero_pads_from_the_right() {
        let mask = CompiledMask::reversed("000").unwrap();
        assert_eq!(mask.apply("7").unwrap(), "007");
    }

    #[test]
    fn test_grouping_inserts_separators() {
        let mask = CompiledMask::grouping(",###").unwrap();
        assert_eq!(mask.apply("1234567").unwrap(), "1,234,567");
        assert_eq!(mask.apply("123").unwrap(), "123");
        assert_eq!(mask.apply("1234").unwrap(), "1,234");
    }

    #[test]
    fn test_grouping_exact_multiple_of_group_size() {
        let mask = CompiledMask::grouping(",###").unwrap();
        assert_eq!(mask.apply("123456").unwrap(), "123,456");
    }

    #[test]
    fn test_grouping_zero_collapses_under_optional_mask() {
        let mask = CompiledMask::grouping(",###").unwrap();
        assert_eq!(mask.apply("0").unwrap(), "");

        let mask = CompiledMask::grouping(",##0").unwrap();
        assert_eq!(mask.apply("0").unwrap(), "0");
    }

    #[test]
    fn test_grouping_halts_on_empty_chunk() {
        // the leftmost chunk "0" collapses, halting before it is emitted;
        // the separator held by the chunk below it stays attached
        let mask = CompiledMask::grouping(",###").unwrap();
        assert_eq!(mask.apply("0234567").unwrap(), ",234,567");
    }

    #[test]
    fn test_grouping_mandatory_mask_keeps_zero_group() {
        let mask = CompiledMask::grouping(",##0").unwrap();
        assert_eq!(mask.apply("0234567").unwrap(), "0,234,567");
    }
}
