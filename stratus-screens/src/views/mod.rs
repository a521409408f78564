mod transfers;
mod verify;

pub use transfers::{TransferRow, TransfersScreen};
pub use verify::{CountryField, FieldTitle, PhoneField, VerifyScreen};
