//! FFI use-case API for the ledger UI.
//!
//! # Responsibility
//! - Expose period loading and record mutations to Dart via FRB.
//! - Own the process-wide record store behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutation names its period; the store switches period first when
//!   the caller's period differs from the active one.
//! - Failures come back as envelopes with `ok == false`, never as panics.

use log::warn;
use maintrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    selectable_years as selectable_years_inner, ApartmentRecord, PeriodKey, ReceiptHandle,
    RecordStore, Roster, SqliteKvStore, StatusField, TextField, MONTH_NAMES,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const LEDGER_DB_FILE_NAME: &str = "maintrack_ledger.sqlite3";
const LEDGER_DB_PATH_ENV: &str = "MAINTRACK_DB_PATH";

static LEDGER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static LEDGER_STORE: OnceLock<Mutex<Option<RecordStore<SqliteKvStore>>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Month names for the period picker, index = zero-based month.
#[flutter_rust_bridge::frb(sync)]
pub fn month_names() -> Vec<String> {
    MONTH_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Years for the period picker, centered on the current year.
#[flutter_rust_bridge::frb(sync)]
pub fn selectable_years() -> Vec<i32> {
    selectable_years_inner(PeriodKey::current().year())
}

/// Period selected on start-up: today's year and zero-based month.
#[flutter_rust_bridge::frb(sync)]
pub fn current_period() -> (i32, u32) {
    let current = PeriodKey::current();
    (current.year(), current.month())
}

/// One table row as shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub flat_number: String,
    /// Emphasized flats on the building roster.
    pub highlighted: bool,
    /// `N/A`, `PAID` or `UNPAID`.
    pub maintenance_status: String,
    /// `N/A`, `PAID` or `UNPAID`.
    pub water_bill_status: String,
    pub resident_name: String,
    pub comments: String,
    /// Live upload name, else the persisted receipt name.
    pub receipt_name: Option<String>,
}

/// Full ledger for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodView {
    pub ok: bool,
    pub year: i32,
    pub month: u32,
    pub records: Vec<RecordView>,
    pub message: String,
}

/// Result of one record mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordActionResponse {
    pub ok: bool,
    /// Updated row on success.
    pub record: Option<RecordView>,
    pub message: String,
}

impl RecordActionResponse {
    fn success(message: impl Into<String>, record: RecordView) -> Self {
        Self {
            ok: true,
            record: Some(record),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record: None,
            message: message.into(),
        }
    }
}

/// Loads (or initializes) the ledger for `(year, month)`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn period_load(year: i32, month: u32) -> PeriodView {
    let result = with_period_store(year, month, |store| {
        Ok(store
            .records()
            .iter()
            .map(|record| to_record_view(record, store.roster()))
            .collect::<Vec<_>>())
    });

    match result {
        Ok(records) => PeriodView {
            ok: true,
            year,
            month,
            message: format!("Loaded {} record(s).", records.len()),
            records,
        },
        Err(err) => PeriodView {
            ok: false,
            year,
            month,
            records: Vec::new(),
            message: format!("period_load failed: {err}"),
        },
    }
}

/// Advances a status column (`maintenance` or `waterBill`) of one row.
#[flutter_rust_bridge::frb(sync)]
pub fn record_toggle_status(
    year: i32,
    month: u32,
    index: u32,
    field: String,
) -> RecordActionResponse {
    let Some(field) = StatusField::parse(field.trim()) else {
        return RecordActionResponse::failure(format!(
            "record_toggle_status failed: unknown status field `{field}`"
        ));
    };
    mutate_record(year, month, index, "record_toggle_status", |store, index| {
        store.toggle_status(index, field).map(|_| "Status updated.")
    })
}

/// Replaces a text column (`name` or `comments`) of one row verbatim.
#[flutter_rust_bridge::frb(sync)]
pub fn record_set_text(
    year: i32,
    month: u32,
    index: u32,
    field: String,
    value: String,
) -> RecordActionResponse {
    let Some(field) = TextField::parse(field.trim()) else {
        return RecordActionResponse::failure(format!(
            "record_set_text failed: unknown text field `{field}`"
        ));
    };
    mutate_record(year, month, index, "record_set_text", |store, index| {
        store.set_text(index, field, value).map(|()| "Text updated.")
    })
}

/// Attaches a receipt picked by the UI's file chooser.
///
/// Only `display_name` survives a restart; `path` is kept for the session.
#[flutter_rust_bridge::frb(sync)]
pub fn record_attach_receipt(
    year: i32,
    month: u32,
    index: u32,
    display_name: String,
    path: String,
) -> RecordActionResponse {
    let handle = ReceiptHandle::new(display_name, path);
    mutate_record(year, month, index, "record_attach_receipt", |store, index| {
        store
            .attach_receipt(index, handle)
            .map(|()| "Receipt attached.")
    })
}

/// Runs one mutation against `(year, month)` and wraps the updated row.
///
/// `mutate` returns the success message shown to the user.
fn mutate_record(
    year: i32,
    month: u32,
    index: u32,
    operation: &str,
    mutate: impl FnOnce(
        &mut RecordStore<SqliteKvStore>,
        usize,
    ) -> maintrack_core::StoreResult<&'static str>,
) -> RecordActionResponse {
    let index = index as usize;
    let result = with_period_store(year, month, |store| {
        let message = mutate(store, index).map_err(|err| err.to_string())?;
        store
            .record(index)
            .map(|record| (message, to_record_view(record, store.roster())))
            .ok_or_else(|| format!("record index {index} vanished after update"))
    });

    match result {
        Ok((message, record)) => RecordActionResponse::success(message, record),
        Err(err) => RecordActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn with_period_store<T>(
    year: i32,
    month: u32,
    f: impl FnOnce(&mut RecordStore<SqliteKvStore>) -> Result<T, String>,
) -> Result<T, String> {
    let requested = PeriodKey::new(year, month).map_err(|err| err.to_string())?;
    let mut guard = LEDGER_STORE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if guard.is_none() {
        let kv = SqliteKvStore::open(resolve_ledger_db_path()).map_err(|err| {
            warn!("event=ffi_store_open module=ffi status=error error={err}");
            format!("ledger DB open failed: {err}")
        })?;
        *guard = Some(RecordStore::new(kv, Roster::default_building()));
    }
    let store = guard
        .as_mut()
        .ok_or_else(|| "ledger store unavailable".to_string())?;

    if store.period() != Some(requested) {
        store
            .select_period(requested.year(), requested.month())
            .map_err(|err| err.to_string())?;
    }
    f(store)
}

fn resolve_ledger_db_path() -> PathBuf {
    LEDGER_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(LEDGER_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(LEDGER_DB_FILE_NAME)
        })
        .clone()
}

fn to_record_view(record: &ApartmentRecord, roster: &Roster) -> RecordView {
    RecordView {
        flat_number: record.flat_number.clone(),
        highlighted: roster.is_highlighted(&record.flat_number),
        maintenance_status: record.maintenance_status.label().to_string(),
        water_bill_status: record.water_bill_status.label().to_string(),
        resident_name: record.resident_name.clone(),
        comments: record.comments.clone(),
        receipt_name: record.receipt_display_name().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, month_names, period_load, ping, record_attach_receipt,
        record_set_text, record_toggle_status, selectable_years,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Year far from real data so repeated runs against the shared temp DB
    /// never collide.
    fn unique_year(salt: i32) -> i32 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        10_000 + (nanos % 100_000_000) as i32 * 10 + salt
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn picker_lists_are_populated() {
        assert_eq!(month_names().len(), 12);
        assert_eq!(selectable_years().len(), 10);
    }

    #[test]
    fn period_load_returns_default_building_for_fresh_period() {
        let view = period_load(unique_year(1), 4);
        assert!(view.ok, "{}", view.message);
        assert_eq!(view.records.len(), 15);
        assert!(view.records.iter().all(|row| row.maintenance_status == "N/A"));
        assert!(view.records[0].highlighted);
    }

    #[test]
    fn period_load_rejects_invalid_month() {
        let view = period_load(2024, 12);
        assert!(!view.ok);
        assert!(view.message.contains("month"));
    }

    #[test]
    fn toggle_and_text_mutations_are_visible_on_reload() {
        let year = unique_year(2);
        let toggled = record_toggle_status(year, 0, 1, "waterBill".to_string());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(
            toggled.record.as_ref().map(|row| row.water_bill_status.as_str()),
            Some("PAID")
        );

        let named = record_set_text(year, 0, 1, "name".to_string(), "Dee".to_string());
        assert!(named.ok, "{}", named.message);

        let view = period_load(year, 0);
        assert_eq!(view.records[1].water_bill_status, "PAID");
        assert_eq!(view.records[1].resident_name, "Dee");
    }

    #[test]
    fn attach_receipt_reports_display_name() {
        let response = record_attach_receipt(
            unique_year(3),
            2,
            0,
            "march.pdf".to_string(),
            "/uploads/march.pdf".to_string(),
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(
            response.record.and_then(|row| row.receipt_name).as_deref(),
            Some("march.pdf")
        );
    }

    #[test]
    fn unknown_field_and_index_fail_without_panicking() {
        let year = unique_year(4);
        let bad_field = record_toggle_status(year, 0, 0, "rent".to_string());
        assert!(!bad_field.ok);
        assert!(bad_field.message.contains("rent"));

        let bad_index = record_set_text(year, 0, 99, "comments".to_string(), "x".to_string());
        assert!(!bad_index.ok);
        assert!(bad_index.message.contains("out of range"));
    }
}
