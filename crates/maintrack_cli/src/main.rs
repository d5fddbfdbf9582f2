//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `maintrack_core` linkage and storage wiring from a terminal.
//! - Print one period's ledger as a plain text table.
//!
//! Usage: `maintrack_cli [year month]` with a zero-based month. Defaults to
//! the current period. Reads the database at `MAINTRACK_DB_PATH`, or an
//! in-memory one when unset.

use maintrack_core::{
    ApartmentRecord, PeriodKey, RecordStore, Roster, SqliteKvStore, MONTH_NAMES,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("maintrack_core ping={}", maintrack_core::ping());
    println!("maintrack_core version={}", maintrack_core::core_version());

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let period = match args.as_slice() {
        [] => PeriodKey::current(),
        [year, month] => {
            let year = year
                .parse::<i32>()
                .map_err(|err| format!("invalid year `{year}`: {err}"))?;
            let month = month
                .parse::<u32>()
                .map_err(|err| format!("invalid month `{month}`: {err}"))?;
            PeriodKey::new(year, month).map_err(|err| err.to_string())?
        }
        _ => return Err("usage: maintrack_cli [year month]".to_string()),
    };

    let kv = match std::env::var("MAINTRACK_DB_PATH") {
        Ok(path) if !path.trim().is_empty() => SqliteKvStore::open(path.trim()),
        _ => SqliteKvStore::open_in_memory(),
    }
    .map_err(|err| format!("ledger DB open failed: {err}"))?;

    let mut store = RecordStore::new(kv, Roster::default_building());
    store
        .select_period(period.year(), period.month())
        .map_err(|err| err.to_string())?;

    let month_name = MONTH_NAMES
        .get(period.month() as usize)
        .copied()
        .unwrap_or("?");
    println!("\n{month_name} {}", period.year());
    println!(
        "{:<6} {:<11} {:<10} {:<20} {:<24} {}",
        "Flat", "Maintenance", "Water", "Name", "Comments", "Receipt"
    );
    for record in store.records() {
        println!("{}", format_row(record, store.roster()));
    }
    Ok(())
}

fn format_row(record: &ApartmentRecord, roster: &Roster) -> String {
    let marker = if roster.is_highlighted(&record.flat_number) {
        "*"
    } else {
        " "
    };
    format!(
        "{:<6} {:<11} {:<10} {:<20} {:<24} {}",
        format!("{}{marker}", record.flat_number),
        record.maintenance_status.label(),
        record.water_bill_status.label(),
        record.resident_name,
        record.comments.replace('\n', " "),
        record.receipt_display_name().unwrap_or("-")
    )
}
