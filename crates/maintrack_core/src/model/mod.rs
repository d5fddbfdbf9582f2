//! Domain model for the monthly payment ledger.
//!
//! # Responsibility
//! - Define the per-flat record shape shared by storage and renderers.
//! - Define period keys and the roster of managed flats.
//!
//! # Invariants
//! - Payment status is always one of `Unset | Paid | Unpaid`.
//! - In-memory receipt handles never reach the persisted shape.

pub mod period;
pub mod record;
pub mod roster;
pub mod status;
