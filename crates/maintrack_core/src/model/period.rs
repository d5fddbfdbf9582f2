//! Period keys partitioning persisted record sets.
//!
//! # Invariants
//! - `month` is zero-based and always within `0..=11`.
//! - Storage key format is `apartment-data-<year>-<month>`.

use chrono::{Datelike, Local};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STORAGE_KEY_PREFIX: &str = "apartment-data";
const MONTHS_PER_YEAR: u32 = 12;

/// Validation error for period construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    MonthOutOfRange(u32),
}

impl Display for PeriodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange(month) => {
                write!(f, "month must be within 0..=11, got {month}")
            }
        }
    }
}

impl Error for PeriodError {}

/// `(year, zero-based month)` identifying one independently stored ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if month >= MONTHS_PER_YEAR {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// Period containing today's local date.
    pub fn current() -> Self {
        let today = Local::now();
        Self {
            year: today.year(),
            month: today.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Key under which this period's records are stored.
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}-{}-{}", self.year, self.month)
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{PeriodError, PeriodKey};

    #[test]
    fn storage_key_uses_zero_based_month() {
        let key = PeriodKey::new(2024, 0).unwrap();
        assert_eq!(key.storage_key(), "apartment-data-2024-0");
        assert_eq!(PeriodKey::new(2023, 11).unwrap().storage_key(), "apartment-data-2023-11");
    }

    #[test]
    fn month_twelve_is_rejected() {
        assert_eq!(PeriodKey::new(2024, 12), Err(PeriodError::MonthOutOfRange(12)));
    }

    #[test]
    fn display_is_human_calendar_month() {
        assert_eq!(PeriodKey::new(2024, 2).unwrap().to_string(), "2024-03");
    }

    #[test]
    fn current_period_has_valid_month() {
        let current = PeriodKey::current();
        assert!(current.month() < 12);
        assert!(PeriodKey::new(current.year(), current.month()).is_ok());
    }
}
