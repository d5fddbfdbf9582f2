//! Record store for the selected period's ledger.
//!
//! # Responsibility
//! - Own the authoritative in-memory records of the active period.
//! - Load or materialize records on period selection.
//! - Write the full ledger through to storage after every mutation.
//!
//! # Invariants
//! - Every roster flat has a record once a period is selected.
//! - Storage read/write failures are logged and never surfaced to callers.
//! - Only caller mistakes (bad month, bad index, no period) return errors.

use crate::model::period::{PeriodError, PeriodKey};
use crate::model::record::{ApartmentRecord, ReceiptHandle, StatusField, TextField};
use crate::model::roster::Roster;
use crate::model::status::PaymentStatus;
use crate::repo::kv_store::KeyValueStore;
use crate::repo::period_repo::PeriodRepository;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-facing error for record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Period(PeriodError),
    NoActivePeriod,
    RecordIndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Period(err) => write!(f, "{err}"),
            Self::NoActivePeriod => write!(f, "no period selected"),
            Self::RecordIndexOutOfRange { index, len } => {
                write!(f, "record index {index} out of range for {len} records")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Period(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PeriodError> for StoreError {
    fn from(value: PeriodError) -> Self {
        Self::Period(value)
    }
}

/// Single-writer store of apartment records for one period at a time.
pub struct RecordStore<S: KeyValueStore> {
    repo: PeriodRepository<S>,
    roster: Roster,
    period: Option<PeriodKey>,
    records: Vec<ApartmentRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Creates a store with no period selected and no records.
    pub fn new(store: S, roster: Roster) -> Self {
        Self {
            repo: PeriodRepository::new(store),
            roster,
            period: None,
            records: Vec::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn period(&self) -> Option<PeriodKey> {
        self.period
    }

    pub fn records(&self) -> &[ApartmentRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&ApartmentRecord> {
        self.records.get(index)
    }

    pub fn repository(&self) -> &PeriodRepository<S> {
        &self.repo
    }

    /// Makes `(year, month)` the active period and loads its records.
    ///
    /// Stored records are used as-is, with missing roster flats appended as
    /// blank records. Unknown status values read as `Unset` and missing text
    /// reads as empty, so one odd entry never discards its neighbours. A
    /// missing or unreadable payload, or one that is not a JSON array,
    /// yields a fresh roster ledger.
    ///
    /// # Errors
    /// - `Period` when `month` is outside `0..=11`. The active period is left
    ///   unchanged in that case.
    pub fn select_period(&mut self, year: i32, month: u32) -> StoreResult<()> {
        let period = PeriodKey::new(year, month)?;

        let records = match self.repo.load_period(&period) {
            Ok(Some(stored)) => {
                if stored.skipped > 0 {
                    warn!(
                        "event=period_select module=record_store status=partial period={} skipped={}",
                        period.storage_key(),
                        stored.skipped
                    );
                }
                let stored_len = stored.records.len();
                let merged = merge_missing_flats(stored.records, &self.roster);
                info!(
                    "event=period_select module=record_store status=ok source=stored period={} stored={} added={}",
                    period.storage_key(),
                    stored_len,
                    merged.len() - stored_len
                );
                merged
            }
            Ok(None) => {
                info!(
                    "event=period_select module=record_store status=ok source=fresh period={} records={}",
                    period.storage_key(),
                    self.roster.flats().len()
                );
                fresh_records(&self.roster)
            }
            Err(err) => {
                warn!(
                    "event=period_select module=record_store status=fallback source=fresh period={} error_code=load_failed error={}",
                    period.storage_key(),
                    err
                );
                fresh_records(&self.roster)
            }
        };

        self.period = Some(period);
        self.records = records;
        Ok(())
    }

    /// Advances one status column of a record through
    /// `Unset -> Paid -> Unpaid -> Unset`, then persists.
    pub fn toggle_status(&mut self, index: usize, field: StatusField) -> StoreResult<PaymentStatus> {
        let status = self.record_mut(index)?.toggle_status(field);
        debug!(
            "event=status_toggle module=record_store status=ok index={index} field={} value={}",
            field.as_str(),
            status.label()
        );
        self.persist();
        Ok(status)
    }

    /// Replaces a free-text field verbatim, then persists.
    pub fn set_text(
        &mut self,
        index: usize,
        field: TextField,
        value: impl Into<String>,
    ) -> StoreResult<()> {
        self.record_mut(index)?.set_text(field, value);
        debug!(
            "event=text_set module=record_store status=ok index={index} field={}",
            field.as_str()
        );
        self.persist();
        Ok(())
    }

    /// Attaches an uploaded receipt, then persists its display name.
    pub fn attach_receipt(&mut self, index: usize, handle: ReceiptHandle) -> StoreResult<()> {
        self.record_mut(index)?.attach_receipt(handle);
        debug!("event=receipt_attach module=record_store status=ok index={index}");
        self.persist();
        Ok(())
    }

    fn record_mut(&mut self, index: usize) -> StoreResult<&mut ApartmentRecord> {
        if self.period.is_none() {
            return Err(StoreError::NoActivePeriod);
        }
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(StoreError::RecordIndexOutOfRange { index, len })
    }

    fn persist(&self) {
        let Some(period) = self.period else {
            return;
        };
        if self.records.is_empty() {
            return;
        }

        match self.repo.save_period(&period, &self.records) {
            Ok(()) => debug!(
                "event=period_persist module=record_store status=ok period={} records={}",
                period.storage_key(),
                self.records.len()
            ),
            Err(err) => error!(
                "event=period_persist module=record_store status=error period={} error_code=save_failed error={}",
                period.storage_key(),
                err
            ),
        }
    }
}

fn fresh_records(roster: &Roster) -> Vec<ApartmentRecord> {
    roster.flats().iter().map(ApartmentRecord::blank).collect()
}

/// Appends blank records for roster flats absent from `stored`.
///
/// Stored order, duplicates and flats no longer on the roster are kept.
fn merge_missing_flats(mut stored: Vec<ApartmentRecord>, roster: &Roster) -> Vec<ApartmentRecord> {
    let present: HashSet<String> = stored
        .iter()
        .map(|record| record.flat_number.clone())
        .collect();
    stored.extend(
        roster
            .flats()
            .iter()
            .filter(|flat| !present.contains(flat.as_str()))
            .map(ApartmentRecord::blank),
    );
    stored
}
