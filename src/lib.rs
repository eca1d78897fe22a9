//! # Receivables Core
//!
//! A small accounts-receivable library covering the invoice-to-cash
//! workflow: delivery notes, invoice issuance, receivable tracking, and
//! reconciliation of incoming bank payments.
//!
//! ## Features
//!
//! - **Delivery notes and invoicing**: invoices aggregate delivery notes
//!   of a single company and derive a receivable on issuance
//! - **Payment reconciliation**: match bank payments to receivables with
//!   atomic pair persistence and lost-update protection
//! - **Overdue tracking**: idempotent full-collection overdue sweeps
//! - **Aggregate statistics**: outstanding, overdue, and unmatched totals
//! - **Storage abstraction**: backend-agnostic design with a trait-based
//!   storage boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use receivables_core::{MemoryStorage, ReceivablesLedger};
//!
//! // The ledger works against any ReceivablesStorage implementation;
//! // MemoryStorage is provided for tests and development.
//! let storage = MemoryStorage::new();
//! let mut ledger = ReceivablesLedger::new(storage);
//! ```

pub mod billing;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use billing::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;
