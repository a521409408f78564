//! Verification request outcomes
//!
//! The cloud service answers a verification-code request with a numeric
//! result code. This module maps those codes onto the outcome taxonomy
//! the verification screen reacts to.

use serde::{Deserialize, Serialize};

/// Outcome of a send-verification-code request
///
/// Every variant except [`VerificationOutcome::Delivered`] represents a
/// failure the screen recovers from locally by decorating fields; none
/// are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum VerificationOutcome {
    /// The SMS was accepted for delivery
    Delivered,
    /// Too many attempts; the user must wait before retrying
    RateLimited,
    /// The account already has a verified phone number
    AccessDenied,
    /// The service rejected the phone number itself
    BadArguments,
    /// The phone number is already registered to an account
    AlreadyRegistered,
    /// Any other service failure
    Other { code: i32, message: String },
}

impl VerificationOutcome {
    /// Map a service result code onto an outcome
    ///
    /// Codes follow the cloud service's convention: `0` is success and
    /// failures are negative. Unrecognized codes become
    /// [`VerificationOutcome::Other`] carrying the original code and
    /// description.
    pub fn from_code(code: i32, message: impl Into<String>) -> Self {
        match code {
            0 => Self::Delivered,
            -18 => Self::RateLimited,
            -11 => Self::AccessDenied,
            -2 => Self::BadArguments,
            -12 => Self::AlreadyRegistered,
            _ => Self::Other {
                code,
                message: message.into(),
            },
        }
    }

    /// Whether the request succeeded
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Short description for logging
    pub fn description(&self) -> &'static str {
        match self {
            Self::Delivered => "sms accepted for delivery",
            Self::RateLimited => "attempt limit reached",
            Self::AccessDenied => "phone number already verified",
            Self::BadArguments => "invalid phone number",
            Self::AlreadyRegistered => "phone number already registered",
            Self::Other { .. } => "request failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_known() {
        assert_eq!(
            VerificationOutcome::from_code(0, ""),
            VerificationOutcome::Delivered
        );
        assert_eq!(
            VerificationOutcome::from_code(-18, ""),
            VerificationOutcome::RateLimited
        );
        assert_eq!(
            VerificationOutcome::from_code(-11, ""),
            VerificationOutcome::AccessDenied
        );
        assert_eq!(
            VerificationOutcome::from_code(-2, ""),
            VerificationOutcome::BadArguments
        );
        assert_eq!(
            VerificationOutcome::from_code(-12, ""),
            VerificationOutcome::AlreadyRegistered
        );
    }

    #[test]
    fn test_from_code_other() {
        let outcome = VerificationOutcome::from_code(-9, "not found");
        assert_eq!(
            outcome,
            VerificationOutcome::Other {
                code: -9,
                message: "not found".to_string(),
            }
        );
        assert!(!outcome.is_delivered());
    }

    #[test]
    fn test_serialization_tag() {
        let json = serde_json::to_value(&VerificationOutcome::RateLimited).unwrap();
        assert_eq!(json["outcome"], "rateLimited");

        let json = serde_json::to_value(&VerificationOutcome::Other {
            code: -9,
            message: "not found".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "other");
        assert_eq!(json["code"], -9);
    }
}
