mod transfers;
mod verify;

pub use transfers::CompletedTransferList;
pub use verify::{
    CountrySnapshot, FlowPhase, HelperText, PhoneFieldError, PhoneVerificationState,
    KEY_COUNTRY_CODE, KEY_COUNTRY_NAME, KEY_DIAL_CODE,
};
