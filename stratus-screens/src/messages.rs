//! Controller inputs and host-facing actions
//!
//! Inputs are everything the verification screen can react to: user
//! interaction, gateway completions, and results coming back from the
//! screens it navigated to. Actions are the obligations the host must
//! perform in response (navigation, notices, closing the screen).

use stratus_gateway::GatewayEvent;

/// Inputs driving the verification flow controller
#[derive(Debug, Clone)]
pub enum VerifyInput {
    /// The phone-number field text changed
    PhoneInputChanged(String),
    /// The country selector row was tapped
    CountrySelectorPressed,
    /// The country picker returned a choice
    CountryPicked {
        country_code: String,
        country_name: String,
        dial_code: String,
    },
    /// The next/submit button (or keyboard done action) was pressed
    SubmitPressed,
    /// The "not now" exit affordance was pressed
    NotNowPressed,
    /// The platform back action fired
    BackPressed,
    /// A gateway completion arrived on the UI context
    Gateway(GatewayEvent),
    /// The code-entry screen finished
    CodeEntryFinished { success: bool },
}

/// Obligations the host performs for the verification flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyAction {
    /// Open the country picker with encoded `KEY:code1,code2,` entries
    OpenCountryPicker { entries: Vec<String> },
    /// Open the code-entry screen
    OpenCodeEntry {
        /// Selected dial code, e.g. `"+1"`
        dial_code: String,
        /// The raw entered number, exactly as typed
        phone_number: String,
        /// Locked flows propagate into code entry
        user_locked: bool,
    },
    /// Surface a transient, non-blocking notice
    ShowNotice(Notice),
    /// Close the screen, reporting the flow result upward
    Close { verified: bool },
}

/// Transient notices surfaced by the verification screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The country calling-code table could not be loaded
    CountryCodesUnavailable,
}

impl Notice {
    /// Default English text; hosts localize by matching the variant
    pub fn message(&self) -> &'static str {
        match self {
            Self::CountryCodesUnavailable => {
                "Couldn't load country calling codes. Please try again."
            }
        }
    }
}

/// Obligations the host performs for the completed-transfers screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransfersAction {
    /// The action menu depends on list emptiness; rebuild it
    RefreshActionMenu,
}
