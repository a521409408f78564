//! Cloud service request gateway
//!
//! Screens never await the service. They hand a request to a
//! [`GatewayClient`], which runs it on a background task and delivers
//! the completion as a [`GatewayEvent`] over an unbounded channel.
//! The host drains that channel on its single-threaded UI context, so
//! controller state is only ever touched from one place.
//!
//! Verification requests are keyed by a generated request id; a
//! completion always carries the id of the request that produced it,
//! letting controllers discard stale results.

use crate::{CountryCallingCodes, E164, Result, VerificationOutcome};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Requests the screens can issue against the cloud service
///
/// Implemented by the SDK binding in production and by mocks in tests.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Fetch the region-to-dial-codes table
    async fn fetch_country_calling_codes(&self) -> Result<BTreeMap<String, Vec<String>>>;

    /// Ask the service to text a verification code to `number`
    async fn send_verification_code(&self, number: &E164) -> Result<VerificationOutcome>;
}

/// Completions delivered back to the UI context
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// The country calling-code table arrived
    CountryCodesLoaded {
        /// Parsed table
        codes: CountryCallingCodes,
    },

    /// The country calling-code fetch failed
    ///
    /// Transient and non-blocking; the user retries by reopening the
    /// country selector.
    CountryCodesUnavailable {
        /// Failure description for the notice
        message: String,
    },

    /// A send-verification-code request resolved
    VerificationFinished {
        /// Id of the originating request
        request_id: Uuid,
        /// Service outcome
        outcome: VerificationOutcome,
    },
}

/// Fire-and-forget dispatcher in front of a [`RequestGateway`]
///
/// Cheap to clone; all clones feed the same event channel.
#[derive(Clone)]
pub struct GatewayClient {
    gateway: Arc<dyn RequestGateway>,
    events: mpsc::UnboundedSender<GatewayEvent>,
}

impl GatewayClient {
    /// Wrap a gateway, returning the client and the completion channel
    pub fn new(
        gateway: Arc<dyn RequestGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<GatewayEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { gateway, events }, receiver)
    }

    /// Request the country calling-code table
    pub fn fetch_country_calling_codes(&self) {
        debug!("Dispatching country calling-code fetch");
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match gateway.fetch_country_calling_codes().await {
                Ok(map) => GatewayEvent::CountryCodesLoaded {
                    codes: CountryCallingCodes::from_map(map),
                },
                Err(e) => {
                    warn!("Country calling-code fetch failed: {}", e);
                    GatewayEvent::CountryCodesUnavailable {
                        message: e.user_message(),
                    }
                }
            };
            let _ = events.send(event);
        });
    }

    /// Request an SMS verification code, returning the request id
    ///
    /// A transport-level failure still resolves the request: it is
    /// folded into [`VerificationOutcome::Other`] so the screen's
    /// in-flight guard always clears.
    pub fn send_verification_code(&self, number: E164) -> Uuid {
        let request_id = Uuid::new_v4();
        debug!(%request_id, "Dispatching verification-code request");
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = match gateway.send_verification_code(&number).await {
                Ok(outcome) => outcome,
                Err(crate::GatewayError::Api { code, message }) => {
                    VerificationOutcome::from_code(code, message)
                }
                Err(e) => {
                    warn!(%request_id, "Verification request failed: {}", e);
                    VerificationOutcome::Other {
                        code: -1,
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(GatewayEvent::VerificationFinished {
                request_id,
                outcome,
            });
        });
        request_id
    }
}
