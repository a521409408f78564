//! Stratus Companion Screens
//!
//! Headless controllers for the two account screens of the Stratus
//! cloud-storage companion: SMS phone verification and the completed
//! transfers list.
//!
//! Controllers are plain state machines driven from a single-threaded
//! context: inputs go in through `handle`/operation methods, host
//! obligations come back as action values, and everything a renderer
//! needs is read through a `screen()` projection of the controller
//! state. Nothing here touches a widget toolkit.

pub mod config;
pub mod messages;
pub mod state;
pub mod transfers;
pub mod verify;
pub mod views;

pub use config::AppConfig;
pub use messages::{Notice, TransfersAction, VerifyAction, VerifyInput};
pub use transfers::CompletedTransfersController;
pub use verify::{VerifyController, VerifyOptions};
