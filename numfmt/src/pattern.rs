//! FILENAME: numfmt/src/pattern.rs
//! PURPOSE: Compiled match patterns with a single-capture-group contract.
//! CONTEXT: The negative and percent matchers are configured as regular
//! expressions whose one capture group extracts the inner numeric text
//! (e.g. `^-(.+)$` or `^\((.+)\)$` for accounting negatives). The group
//! count is checked at construction so a bad pattern fails the options
//! build instead of the first parse call.

use regex::Regex;

use crate::error::ConfigError;

/// A compiled pattern carrying exactly one capture group.
#[derive(Debug, Clone)]
pub struct CapturePattern {
    regex: Regex,
}

impl CapturePattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)?;
        // captures_len() includes the implicit whole-match group 0
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(ConfigError::PatternCaptureCount {
                pattern: pattern.to_string(),
                found,
            });
        }
        Ok(CapturePattern { regex })
    }

    /// Returns the captured inner text when the pattern matches.
    pub fn capture<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.regex
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
