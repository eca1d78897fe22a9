//! Billing module containing delivery note management, invoice issuance,
//! and payment intake

pub mod core;
pub mod delivery;
pub mod invoice;
pub mod payment;

pub use self::core::*;
pub use delivery::*;
pub use invoice::*;
pub use payment::*;
