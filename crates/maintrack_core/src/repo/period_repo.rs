//! Period ledger repository.
//!
//! # Responsibility
//! - Encode a period's records as a JSON array under its storage key.
//! - Decode stored arrays back into records one entry at a time.
//!
//! # Invariants
//! - Stored payloads never contain receipt handles.
//! - Only a payload that is not a JSON array fails the load. Entries that
//!   cannot form a record (no `flatNumber`, wrong field types) are skipped
//!   and counted; every other entry is returned as-is.
//! - No roster reconciliation happens here.

use crate::model::period::PeriodKey;
use crate::model::record::ApartmentRecord;
use crate::repo::kv_store::{KeyValueStore, RepoResult};
use serde_json::Value;

/// Records decoded from one stored period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPeriod {
    pub records: Vec<ApartmentRecord>,
    /// Array entries that could not be decoded into a record.
    pub skipped: usize,
}

/// Reads and writes whole-period ledgers through a key-value store.
pub struct PeriodRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PeriodRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored ledger for `period`.
    ///
    /// Returns `Ok(None)` when nothing was ever saved for the period.
    ///
    /// # Errors
    /// - Store read failures are passed through.
    /// - `Serialization` when the payload is not JSON or not an array.
    pub fn load_period(&self, period: &PeriodKey) -> RepoResult<Option<StoredPeriod>> {
        let Some(payload) = self.store.get_item(&period.storage_key())? else {
            return Ok(None);
        };
        let entries = serde_json::from_str::<Vec<Value>>(&payload)?;

        let total = entries.len();
        let records: Vec<ApartmentRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        Ok(Some(StoredPeriod {
            skipped: total - records.len(),
            records,
        }))
    }

    /// Replaces the stored ledger for `period` with `records`.
    pub fn save_period(&self, period: &PeriodKey, records: &[ApartmentRecord]) -> RepoResult<()> {
        let payload = serde_json::to_string(records)?;
        self.store.set_item(&period.storage_key(), &payload)
    }
}
