//! Core domain logic for the apartment maintenance tracker.
//! This crate is the single source of truth for ledger invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{init_logging, logging_status};
pub use model::period::{PeriodError, PeriodKey};
pub use model::record::{ApartmentRecord, ReceiptHandle, StatusField, TextField};
pub use model::roster::{selectable_years, Roster, RosterError, MONTH_NAMES};
pub use model::status::PaymentStatus;
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::period_repo::{PeriodRepository, StoredPeriod};
pub use service::record_store::{RecordStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
