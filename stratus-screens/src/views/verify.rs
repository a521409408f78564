//! Verification screen projection
//!
//! A renderer consumes [`VerifyScreen`] and nothing else. The
//! projection is recomputed from controller state on demand; no view
//! flag lives anywhere but here.

use crate::state::{FlowPhase, HelperText, PhoneFieldError};
use crate::verify::VerifyController;

/// Title decoration of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTitle {
    /// Hidden or resting title
    Inactive,
    /// Highlighted title (field has content or a selection)
    Active,
    /// Error-colored title
    Error,
}

/// Country selector row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryField {
    /// `Name (+dial)` once a selection exists
    pub label: Option<String>,
    pub title: FieldTitle,
    /// Show the invalid-country error line
    pub error: bool,
}

/// Phone number input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneField {
    pub text: String,
    pub title: FieldTitle,
    /// Error line under the field, if any
    pub error: Option<PhoneFieldError>,
    /// Decorate the field itself as invalid
    pub invalid: bool,
}

/// Everything the verification screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyScreen {
    pub helper_text: HelperText,
    pub country: CountryField,
    pub phone: PhoneField,
    /// The "not now" affordance only exists for unlocked accounts
    pub not_now_visible: bool,
    /// Disabled while a request is in flight
    pub next_enabled: bool,
}

impl VerifyController {
    /// Project the current state for rendering
    pub fn screen(&self) -> VerifyScreen {
        let state = self.state();

        let country_title = if state.country_error {
            FieldTitle::Error
        } else if state.country.is_some() {
            FieldTitle::Active
        } else {
            FieldTitle::Inactive
        };

        let phone_invalid = state
            .phone_error
            .map(|e| e.marks_invalid())
            .unwrap_or(false);
        let phone_title = if phone_invalid {
            FieldTitle::Error
        } else if state.phone_input.is_empty() {
            FieldTitle::Inactive
        } else {
            FieldTitle::Active
        };

        VerifyScreen {
            helper_text: state.helper_text(),
            country: CountryField {
                label: state.country.as_ref().map(|c| c.label()),
                title: country_title,
                error: state.country_error,
            },
            phone: PhoneField {
                text: state.phone_input.clone(),
                title: phone_title,
                error: state.phone_error,
                invalid: phone_invalid,
            },
            not_now_visible: !state.user_locked,
            next_enabled: state.phase != FlowPhase::Submitting,
        }
    }
}
