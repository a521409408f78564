//! Verification flow state model
//!
//! The whole screen is a projection of this state. Validation results
//! are explicit enumerated fields here rather than implied by widget
//! visibility, and the in-flight submission guard lives in
//! [`FlowPhase`] plus the pending request id.

use serde::{Deserialize, Serialize};
use stratus_gateway::{CountryCallingCodes, CountrySelection, E164};
use uuid::Uuid;

/// Fixed keys under which the country selection survives restarts
pub const KEY_COUNTRY_CODE: &str = "COUNTRY_CODE";
pub const KEY_COUNTRY_NAME: &str = "COUNTRY_NAME";
pub const KEY_DIAL_CODE: &str = "DIAL_CODE";

/// Phase of the verification flow
///
/// `Idle → Submitting → {AwaitingCode, Idle(with error)} → Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Collecting input; submit is available
    Idle,
    /// A verification request is in flight; submits are ignored
    Submitting,
    /// SMS accepted; the code-entry screen is active
    AwaitingCode,
    /// Code entry succeeded; the flow is done
    Completed,
}

/// Helper text shown above the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperText {
    /// Account is locked; verification is mandatory
    Locked,
    /// Unlocked account with achievements enabled
    AchievementUser,
    /// Unlocked account without achievements
    StandardUser,
}

/// Enumerated phone-field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFieldError {
    /// The number could not be normalized or was rejected
    InvalidNumber,
    /// The account already has a verified number
    AlreadyVerified,
    /// The number belongs to another account
    AlreadyRegistered,
    /// Too many attempts; message only, the field stays valid
    ReachedLimit,
}

impl PhoneFieldError {
    /// Whether this error decorates the field as invalid
    pub fn marks_invalid(&self) -> bool {
        !matches!(self, Self::ReachedLimit)
    }

    /// Default English text; hosts localize by matching the variant
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidNumber => "Invalid phone number. Please check and try again.",
            Self::AlreadyVerified => "Your account is already verified with a phone number.",
            Self::AlreadyRegistered => "This phone number is already registered.",
            Self::ReachedLimit => "You have reached your verification attempt limit.",
        }
    }
}

/// Snapshot of the country selection, persisted across transient
/// process death under the fixed string keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySnapshot {
    #[serde(rename = "COUNTRY_CODE")]
    pub country_code: String,
    #[serde(rename = "COUNTRY_NAME")]
    pub country_name: String,
    #[serde(rename = "DIAL_CODE")]
    pub dial_code: String,
}

impl From<&CountrySelection> for CountrySnapshot {
    fn from(selection: &CountrySelection) -> Self {
        Self {
            country_code: selection.country_code.clone(),
            country_name: selection.country_name.clone(),
            dial_code: selection.dial_code.clone(),
        }
    }
}

impl From<CountrySnapshot> for CountrySelection {
    fn from(snapshot: CountrySnapshot) -> Self {
        CountrySelection::new(
            snapshot.country_code,
            snapshot.country_name,
            snapshot.dial_code,
        )
    }
}

/// State owned by the verification flow controller
#[derive(Debug)]
pub struct PhoneVerificationState {
    /// Fixed at creation; locked flows cannot be dismissed
    pub user_locked: bool,
    /// Selects between the two unlocked helper texts
    pub achievements_enabled: bool,
    /// Device-inferred region key, if any
    pub inferred_region: Option<String>,

    /// The three country fields, set together or not at all
    pub country: Option<CountrySelection>,
    /// Raw entered phone number
    pub phone_input: String,

    /// Calling-code table once loaded
    pub country_codes: Option<CountryCallingCodes>,
    /// Picker launch deferred until the table loads
    pub pending_country_picker: bool,

    /// Recomputed on every validation pass
    pub country_valid: bool,
    pub phone_valid: bool,

    /// Explicit error decorations
    pub country_error: bool,
    pub phone_error: Option<PhoneFieldError>,

    pub phase: FlowPhase,
    /// Id of the outstanding verification request, if any
    pub in_flight: Option<Uuid>,
}

impl PhoneVerificationState {
    pub fn new(
        user_locked: bool,
        achievements_enabled: bool,
        inferred_region: Option<String>,
    ) -> Self {
        Self {
            user_locked,
            achievements_enabled,
            inferred_region,
            country: None,
            phone_input: String::new(),
            country_codes: None,
            pending_country_picker: false,
            country_valid: false,
            phone_valid: false,
            country_error: false,
            phone_error: None,
            phase: FlowPhase::Idle,
            in_flight: None,
        }
    }

    pub fn helper_text(&self) -> HelperText {
        if self.user_locked {
            HelperText::Locked
        } else if self.achievements_enabled {
            HelperText::AchievementUser
        } else {
            HelperText::StandardUser
        }
    }

    /// Recompute both validity flags
    ///
    /// The phone number is valid iff it normalizes to E.164 against
    /// the selected dial code; the country is valid iff a dial code is
    /// set with length ≥ 3 (the `+` plus at least two digits).
    pub fn validate(&mut self) {
        let dial_code = self
            .country
            .as_ref()
            .map(|c| c.dial_code.as_str())
            .unwrap_or("");
        self.phone_valid = E164::normalize(&self.phone_input, dial_code).is_some();
        self.country_valid = dial_code.len() >= 3;
    }

    /// The normalized number for the current input, when valid
    pub fn normalized_number(&self) -> Option<E164> {
        let dial_code = self
            .country
            .as_ref()
            .map(|c| c.dial_code.as_str())
            .unwrap_or("");
        E164::normalize(&self.phone_input, dial_code)
    }

    /// Clear every error decoration
    pub fn clear_errors(&mut self) {
        self.country_error = false;
        self.phone_error = None;
    }

    /// Snapshot the country fields for save-instance persistence
    pub fn snapshot(&self) -> Option<CountrySnapshot> {
        self.country.as_ref().map(CountrySnapshot::from)
    }

    /// Restore a snapshot taken before transient destruction
    pub fn restore(&mut self, snapshot: CountrySnapshot) {
        self.country = Some(snapshot.into());
        self.country_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_text_selection() {
        assert_eq!(
            PhoneVerificationState::new(true, true, None).helper_text(),
            HelperText::Locked
        );
        assert_eq!(
            PhoneVerificationState::new(false, true, None).helper_text(),
            HelperText::AchievementUser
        );
        assert_eq!(
            PhoneVerificationState::new(false, false, None).helper_text(),
            HelperText::StandardUser
        );
    }

    #[test]
    fn test_validate_requires_country() {
        let mut state = PhoneVerificationState::new(false, false, None);
        state.phone_input = "415 555 2671".to_string();
        state.validate();
        assert!(!state.phone_valid);
        assert!(!state.country_valid);

        state.country = Some(CountrySelection::new("US", "United States", "+1"));
        state.validate();
        assert!(state.phone_valid);
        assert!(state.country_valid);
    }

    #[test]
    fn test_dial_code_length_rule() {
        let mut state = PhoneVerificationState::new(false, false, None);
        // "+1" is two characters; the rule wants at least three
        state.country = Some(CountrySelection::new("X", "X", "+1"));
        state.validate();
        assert!(!state.country_valid);

        state.country = Some(CountrySelection::new("GB", "United Kingdom", "+44"));
        state.validate();
        assert!(state.country_valid);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = PhoneVerificationState::new(false, false, None);
        state.country = Some(CountrySelection::new("GB", "United Kingdom", "+44"));

        let snapshot = state.snapshot().unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json[KEY_COUNTRY_CODE], "GB");
        assert_eq!(json[KEY_COUNTRY_NAME], "United Kingdom");
        assert_eq!(json[KEY_DIAL_CODE], "+44");

        let mut restored = PhoneVerificationState::new(false, false, None);
        restored.restore(serde_json::from_value(json).unwrap());
        assert_eq!(restored.country, state.country);
    }

    #[test]
    fn test_reached_limit_does_not_mark_invalid() {
        assert!(!PhoneFieldError::ReachedLimit.marks_invalid());
        assert!(PhoneFieldError::InvalidNumber.marks_invalid());
        assert!(PhoneFieldError::AlreadyVerified.marks_invalid());
        assert!(PhoneFieldError::AlreadyRegistered.marks_invalid());
    }
}
