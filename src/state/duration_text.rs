//! Keypad-edited duration text
//!
//! The text is read as `MMSS` once it is longer than two characters (the last
//! two digits are seconds, everything before them is minutes) and as plain
//! seconds otherwise. So `"130"` is one minute thirty, and `"199"` is one
//! minute ninety-nine seconds.

use std::fmt;

use crate::error::EngineError;

/// Longest text the keypad accepts
pub const MAX_DIGITS: usize = 8;

const ZERO: &str = "0";

/// Non-empty string of decimal digits, canonical empty value `"0"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationText {
    text: String,
}

impl DurationText {
    pub fn new() -> Self {
        Self {
            text: ZERO.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_zero(&self) -> bool {
        self.text == ZERO
    }

    /// Append a keypad digit, replacing the canonical zero.
    ///
    /// Digits past [`MAX_DIGITS`] are dropped. Returns whether the text changed.
    pub fn append_digit(&mut self, digit: i64) -> Result<bool, EngineError> {
        let ch = u32::try_from(digit)
            .ok()
            .and_then(|d| char::from_digit(d, 10))
            .ok_or(EngineError::InvalidArgument { digit })?;

        if self.is_zero() {
            self.text.clear();
        } else if self.text.len() >= MAX_DIGITS {
            return Ok(false);
        }
        self.text.push(ch);
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.text = ZERO.to_string();
    }

    /// Drop the last digit, falling back to `"0"`
    pub fn backspace(&mut self) {
        if self.text.len() > 1 {
            self.text.pop();
        } else {
            self.clear();
        }
    }

    pub fn parsed_seconds(&self) -> u64 {
        if self.text.len() > 2 {
            let (minutes, seconds) = self.text.split_at(self.text.len() - 2);
            digits_value(minutes) * 60 + digits_value(seconds)
        } else {
            digits_value(&self.text)
        }
    }

    pub fn parsed_millis(&self) -> i64 {
        // MAX_DIGITS keeps this far below i64::MAX
        self.parsed_seconds() as i64 * 1000
    }
}

impl Default for DurationText {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DurationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// The editor only ever stores ASCII digits.
fn digits_value(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}
