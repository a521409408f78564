//! E.164 phone-number normalization
//!
//! The verification endpoint only accepts numbers in international
//! E.164 form: a leading `+`, the country calling code, then the
//! subscriber number, 15 digits at most and no separators.
//!
//! Normalization here is deliberately definitional for the screen:
//! a phone input is considered valid for a selected country exactly
//! when [`E164::normalize`] produces a value for that pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// E.164 numbers are at most 15 digits (ITU-T E.164 §6.1)
const MAX_DIGITS: usize = 15;

/// Shortest assigned international numbers in practice
const MIN_DIGITS: usize = 8;

/// A phone number normalized to E.164 form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct E164(String);

impl E164 {
    /// Normalize a raw user-entered number against a selected dial code
    ///
    /// The dial code is the `+`-prefixed calling code of the selected
    /// country (e.g. `"+1"`). Returns `None` when the input cannot be
    /// normalized:
    ///
    /// - characters other than digits and common separators
    ///   (spaces, dashes, dots, parentheses)
    /// - no digits at all
    /// - no usable prefix: the input carries neither `+` nor `00` and
    ///   the dial code is missing or malformed
    /// - fewer than 8 or more than 15 digits after prefix resolution
    pub fn normalize(raw: &str, dial_code: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (explicit_prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return None,
            }
        }
        if digits.is_empty() {
            return None;
        }

        let number = if explicit_prefix {
            digits
        } else if let Some(idd_stripped) = digits.strip_prefix("00") {
            // "00" international dialing prefix stands in for "+"
            idd_stripped.to_string()
        } else {
            let code = dial_code.strip_prefix('+')?;
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            // National numbers are commonly written with a leading
            // trunk "0"; drop it before prepending the country code.
            let national = digits.strip_prefix('0').unwrap_or(&digits);
            if national.is_empty() {
                return None;
            }
            format!("{}{}", code, national)
        };

        if number.len() < MIN_DIGITS || number.len() > MAX_DIGITS {
            return None;
        }

        Some(Self(format!("+{}", number)))
    }

    /// The normalized number, including the leading `+`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the normalized string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for E164 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_with_dial_code() {
        let number = E164::normalize("415 555 2671", "+1").unwrap();
        assert_eq!(number.as_str(), "+14155552671");
    }

    #[test]
    fn test_normalize_strips_trunk_zero() {
        let number = E164::normalize("0171 2345678", "+49").unwrap();
        assert_eq!(number.as_str(), "+491712345678");
    }

    #[test]
    fn test_normalize_explicit_plus_ignores_dial_code() {
        let number = E164::normalize("+44 20 7946 0958", "+1").unwrap();
        assert_eq!(number.as_str(), "+442079460958");
    }

    #[test]
    fn test_normalize_idd_prefix() {
        let number = E164::normalize("0044 20 7946 0958", "+1").unwrap();
        assert_eq!(number.as_str(), "+442079460958");
    }

    #[test]
    fn test_normalize_separators() {
        let number = E164::normalize("(415) 555-2671", "+1").unwrap();
        assert_eq!(number.as_str(), "+14155552671");
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(E164::normalize("", "+1").is_none());
        assert!(E164::normalize("   ", "+1").is_none());
        assert!(E164::normalize("- ()", "+1").is_none());
    }

    #[test]
    fn test_normalize_rejects_letters() {
        assert!(E164::normalize("415 CALL ME", "+1").is_none());
    }

    #[test]
    fn test_normalize_rejects_missing_dial_code() {
        assert!(E164::normalize("4155552671", "").is_none());
        assert!(E164::normalize("4155552671", "1").is_none());
        assert!(E164::normalize("4155552671", "+").is_none());
    }

    #[test]
    fn test_normalize_rejects_bad_lengths() {
        // 16 digits total
        assert!(E164::normalize("+1234567890123456", "+1").is_none());
        // far too short
        assert!(E164::normalize("+12345", "+1").is_none());
    }

    #[test]
    fn test_serde_transparent() {
        let number = E164::normalize("+14155552671", "+1").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, r#""+14155552671""#);

        let back: E164 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }
}
