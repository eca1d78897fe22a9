//! Reconciliation of incoming payments against outstanding receivables
//!
//! The engine owns the read-modify-write of receivable balances: it links
//! bank payments to receivables, keeps `paid_amount`/`remaining_amount`/
//! `status` consistent, sweeps for overdue balances, and derives aggregate
//! health statistics.

pub mod engine;
pub mod stats;

pub use engine::*;
pub use stats::*;
