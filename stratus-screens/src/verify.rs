//! Phone verification flow controller
//!
//! Collects a phone number and calling code, validates, submits the
//! SMS verification-code request, and reacts to the outcome. The
//! controller is driven entirely through [`VerifyInput`] values on a
//! single-threaded context; gateway completions arrive as inputs too,
//! so there is no callback reentrancy.
//!
//! Submission is guarded: while a request is in flight, further
//! submits are ignored, and a completion is only honored if it carries
//! the id of the request this controller issued.

use crate::messages::{Notice, VerifyAction, VerifyInput};
use crate::state::{CountrySnapshot, FlowPhase, PhoneFieldError, PhoneVerificationState};
use stratus_gateway::{CountrySelection, GatewayClient, GatewayEvent, VerificationOutcome};
use tracing::{debug, info, warn};

/// Construction options for the verification flow
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Locked accounts must verify; the screen cannot be dismissed
    pub user_locked: bool,
    /// Switches the unlocked helper text variant
    pub achievements_enabled: bool,
    /// Device-inferred region key used for auto-selection
    pub inferred_region: Option<String>,
}

/// The verification screen controller
pub struct VerifyController {
    state: PhoneVerificationState,
    client: GatewayClient,
}

impl VerifyController {
    pub fn new(client: GatewayClient, options: VerifyOptions) -> Self {
        debug!(user_locked = options.user_locked, "Verification flow created");
        Self {
            state: PhoneVerificationState::new(
                options.user_locked,
                options.achievements_enabled,
                options.inferred_region,
            ),
            client,
        }
    }

    /// Begin the flow: issue the country calling-code fetch
    pub fn start(&mut self) {
        self.client.fetch_country_calling_codes();
    }

    /// Read access for projections and tests
    pub fn state(&self) -> &PhoneVerificationState {
        &self.state
    }

    /// Snapshot the country selection for save-instance persistence
    pub fn snapshot(&self) -> Option<CountrySnapshot> {
        self.state.snapshot()
    }

    /// Restore a snapshot taken before transient destruction
    pub fn restore(&mut self, snapshot: CountrySnapshot) {
        self.state.restore(snapshot);
    }

    /// Advance the flow on one input
    pub fn handle(&mut self, input: VerifyInput) -> Vec<VerifyAction> {
        match input {
            VerifyInput::PhoneInputChanged(text) => {
                self.state.phone_input = text;
                self.state.phone_error = None;
                Vec::new()
            }
            VerifyInput::CountrySelectorPressed => self.on_country_selector(),
            VerifyInput::CountryPicked {
                country_code,
                country_name,
                dial_code,
            } => {
                self.state.country =
                    Some(CountrySelection::new(country_code, country_name, dial_code));
                self.state.country_error = false;
                Vec::new()
            }
            VerifyInput::SubmitPressed => self.on_submit(),
            VerifyInput::NotNowPressed | VerifyInput::BackPressed => self.on_dismiss(),
            VerifyInput::Gateway(event) => self.on_gateway(event),
            VerifyInput::CodeEntryFinished { success } => self.on_code_entry(success),
        }
    }

    fn on_country_selector(&mut self) -> Vec<VerifyAction> {
        match &self.state.country_codes {
            Some(codes) => vec![VerifyAction::OpenCountryPicker {
                entries: codes.picker_entries(),
            }],
            None => {
                debug!("Country table not loaded yet, deferring picker");
                self.state.pending_country_picker = true;
                self.client.fetch_country_calling_codes();
                Vec::new()
            }
        }
    }

    fn on_submit(&mut self) -> Vec<VerifyAction> {
        if self.state.phase == FlowPhase::Submitting {
            debug!("Submit ignored, request already in flight");
            return Vec::new();
        }

        self.state.clear_errors();
        self.state.validate();

        if self.state.phone_valid && self.state.country_valid {
            // validate() just proved this normalizes
            let Some(number) = self.state.normalized_number() else {
                return Vec::new();
            };
            info!("Submitting verification-code request");
            self.state.phase = FlowPhase::Submitting;
            self.state.in_flight = Some(self.client.send_verification_code(number));
        } else {
            debug!(
                country_valid = self.state.country_valid,
                phone_valid = self.state.phone_valid,
                "Validation failed"
            );
            self.state.country_error = !self.state.country_valid;
            if !self.state.phone_valid {
                self.state.phone_error = Some(PhoneFieldError::InvalidNumber);
            }
        }
        Vec::new()
    }

    fn on_dismiss(&mut self) -> Vec<VerifyAction> {
        if self.state.user_locked {
            debug!("Dismiss ignored for locked account");
            return Vec::new();
        }
        vec![VerifyAction::Close { verified: false }]
    }

    fn on_gateway(&mut self, event: GatewayEvent) -> Vec<VerifyAction> {
        match event {
            GatewayEvent::CountryCodesLoaded { codes } => {
                if let Some(region) = self.state.inferred_region.clone() {
                    if let Some(selection) = codes.match_region(&region) {
                        info!("Auto-selected country {}", selection.country_code);
                        self.state.country = Some(selection);
                        self.state.country_error = false;
                    }
                }
                self.state.country_codes = Some(codes);

                if self.state.pending_country_picker {
                    self.state.pending_country_picker = false;
                    return self.on_country_selector();
                }
                Vec::new()
            }
            GatewayEvent::CountryCodesUnavailable { message } => {
                warn!("Country calling codes unavailable: {}", message);
                vec![VerifyAction::ShowNotice(Notice::CountryCodesUnavailable)]
            }
            GatewayEvent::VerificationFinished {
                request_id,
                outcome,
            } => {
                if self.state.in_flight != Some(request_id) {
                    debug!(%request_id, "Ignoring stale verification completion");
                    return Vec::new();
                }
                self.state.in_flight = None;
                self.on_outcome(outcome)
            }
        }
    }

    fn on_outcome(&mut self, outcome: VerificationOutcome) -> Vec<VerifyAction> {
        info!("Verification request finished: {}", outcome.description());
        match outcome {
            VerificationOutcome::Delivered => {
                self.state.phase = FlowPhase::AwaitingCode;
                let dial_code = self
                    .state
                    .country
                    .as_ref()
                    .map(|c| c.dial_code.clone())
                    .unwrap_or_default();
                vec![VerifyAction::OpenCodeEntry {
                    dial_code,
                    phone_number: self.state.phone_input.clone(),
                    user_locked: self.state.user_locked,
                }]
            }
            VerificationOutcome::RateLimited => {
                self.state.phase = FlowPhase::Idle;
                self.state.phone_error = Some(PhoneFieldError::ReachedLimit);
                Vec::new()
            }
            VerificationOutcome::AccessDenied => self.fail_phone(PhoneFieldError::AlreadyVerified),
            VerificationOutcome::BadArguments => self.fail_phone(PhoneFieldError::InvalidNumber),
            VerificationOutcome::AlreadyRegistered => {
                self.fail_phone(PhoneFieldError::AlreadyRegistered)
            }
            VerificationOutcome::Other { code, message } => {
                warn!("Verification failed with code {}: {}", code, message);
                self.fail_phone(PhoneFieldError::InvalidNumber)
            }
        }
    }

    fn fail_phone(&mut self, error: PhoneFieldError) -> Vec<VerifyAction> {
        self.state.phase = FlowPhase::Idle;
        self.state.phone_valid = false;
        self.state.phone_error = Some(error);
        Vec::new()
    }

    fn on_code_entry(&mut self, success: bool) -> Vec<VerifyAction> {
        if success && self.state.phase == FlowPhase::AwaitingCode {
            info!("Code entry succeeded, verification flow complete");
            self.state.phase = FlowPhase::Completed;
            return vec![VerifyAction::Close { verified: true }];
        }
        debug!("Code entry did not succeed, returning to input");
        self.state.phase = FlowPhase::Idle;
        Vec::new()
    }
}
