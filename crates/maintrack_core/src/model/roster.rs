//! Roster of managed flats and calendar labels for period pickers.
//!
//! # Responsibility
//! - Provide the ordered flat numbers a ledger is materialized from.
//! - Provide month names and the selectable year window.
//!
//! # Invariants
//! - A roster is never empty and never lists the same flat twice.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Month names indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DEFAULT_FLOORS: u32 = 5;
const DEFAULT_FLATS_PER_FLOOR: u32 = 3;
const DEFAULT_HIGHLIGHTED: &[&str] = &["101", "203", "301", "302", "303", "502"];
const YEARS_BEFORE_CURRENT: i32 = 5;
const SELECTABLE_YEAR_COUNT: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Empty,
    DuplicateFlat(String),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "roster must list at least one flat"),
            Self::DuplicateFlat(flat) => write!(f, "flat `{flat}` appears more than once"),
        }
    }
}

impl Error for RosterError {}

/// Fixed, ordered list of flat numbers managed by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    flats: Vec<String>,
    highlighted: HashSet<String>,
}

impl Roster {
    /// Builds a roster from flat numbers in display order.
    ///
    /// # Errors
    /// - `Empty` when no flats are given.
    /// - `DuplicateFlat` when a flat number repeats.
    pub fn new<I, T>(flats: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let flats: Vec<String> = flats.into_iter().map(Into::into).collect();
        if flats.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen = HashSet::with_capacity(flats.len());
        for flat in &flats {
            if !seen.insert(flat.as_str()) {
                return Err(RosterError::DuplicateFlat(flat.clone()));
            }
        }

        Ok(Self {
            flats,
            highlighted: HashSet::new(),
        })
    }

    /// Five floors, flats `x01` to `x03`, with the building's marked flats.
    pub fn default_building() -> Self {
        let flats = (1..=DEFAULT_FLOORS)
            .flat_map(|floor| {
                (1..=DEFAULT_FLATS_PER_FLOOR).map(move |flat| format!("{floor}{flat:02}"))
            })
            .collect();
        Self {
            flats,
            highlighted: DEFAULT_HIGHLIGHTED.iter().map(|flat| flat.to_string()).collect(),
        }
    }

    /// Marks flats for emphasis in renderers. Unknown flats are ignored.
    pub fn with_highlighted<I, T>(mut self, flats: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.highlighted = flats
            .into_iter()
            .map(Into::into)
            .filter(|flat| self.contains(flat))
            .collect();
        self
    }

    pub fn flats(&self) -> &[String] {
        &self.flats
    }

    pub fn contains(&self, flat_number: &str) -> bool {
        self.flats.iter().any(|flat| flat == flat_number)
    }

    pub fn is_highlighted(&self, flat_number: &str) -> bool {
        self.highlighted.contains(flat_number)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::default_building()
    }
}

/// Years offered by period pickers: five before `current` through four after.
pub fn selectable_years(current: i32) -> Vec<i32> {
    let first = current - YEARS_BEFORE_CURRENT;
    (first..first + SELECTABLE_YEAR_COUNT).collect()
}

#[cfg(test)]
mod tests {
    use super::{selectable_years, Roster, RosterError, MONTH_NAMES};

    #[test]
    fn default_building_lists_fifteen_flats_in_floor_order() {
        let roster = Roster::default_building();
        assert_eq!(roster.flats().len(), 15);
        assert_eq!(roster.flats()[0], "101");
        assert_eq!(roster.flats()[2], "103");
        assert_eq!(roster.flats()[14], "503");
        assert!(roster.is_highlighted("502"));
        assert!(!roster.is_highlighted("102"));
    }

    #[test]
    fn new_rejects_empty_and_duplicate_rosters() {
        assert_eq!(Roster::new(Vec::<String>::new()), Err(RosterError::Empty));
        assert_eq!(
            Roster::new(["101", "102", "101"]),
            Err(RosterError::DuplicateFlat("101".to_string()))
        );
    }

    #[test]
    fn highlighted_ignores_unknown_flats() {
        let roster = Roster::new(["101", "102"])
            .unwrap()
            .with_highlighted(["102", "999"]);
        assert!(roster.is_highlighted("102"));
        assert!(!roster.is_highlighted("999"));
    }

    #[test]
    fn selectable_years_spans_ten_years_around_current() {
        let years = selectable_years(2024);
        assert_eq!(years.len(), 10);
        assert_eq!(years.first(), Some(&2019));
        assert_eq!(years.last(), Some(&2028));
    }

    #[test]
    fn month_names_are_zero_indexed() {
        assert_eq!(MONTH_NAMES[0], "January");
        assert_eq!(MONTH_NAMES[11], "December");
    }
}
