//! Temporal aggregation keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// A `(year, month)` bucket. Serializes as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Bucket containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Number of months from `self` to `later`, both inclusive.
    ///
    /// Returns at least 1, also when `later` precedes `self`.
    pub fn span_to(self, later: YearMonth) -> u32 {
        let index = |ym: YearMonth| i64::from(ym.year) * 12 + i64::from(ym.month);
        let diff = index(later) - index(self);
        u32::try_from(diff.max(0) + 1).unwrap_or(u32::MAX)
    }

    /// Full month name and year, e.g. `January 2024`.
    pub fn long_name(self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month '{}'. Expected format: YYYY-MM", s);
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self::new(year, month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Dense hour-of-day histogram: every hour 0-23 is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct HourlyActivity([usize; 24]);

impl HourlyActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one message in `hour`. Hours above 23 are ignored.
    pub fn record(&mut self, hour: u32) {
        if let Some(slot) = self.0.get_mut(hour as usize) {
            *slot += 1;
        }
    }

    /// Message count for `hour` (0 for hours above 23).
    pub fn get(&self, hour: u32) -> usize {
        self.0.get(hour as usize).copied().unwrap_or(0)
    }

    /// `(hour, count)` pairs for all 24 hours, in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        (0u32..).zip(self.0.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Busiest hour; the earliest wins ties. `None` if all hours are zero.
    pub fn peak(&self) -> Option<(u32, usize)> {
        self.iter()
            .filter(|&(_, count)| count > 0)
            .fold(None, |best, (hour, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((hour, count)),
            })
    }

    pub fn as_array(&self) -> &[usize; 24] {
        &self.0
    }
}
