//! Month key model.
//!
//! A [`MonthKey`] identifies one calendar month in strict `YYYY-MM` form. It
//! is both the validated input of the earnings and payroll endpoints and the
//! filter applied to dated ledger rows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated calendar month.
///
/// # Example
///
/// ```
/// use reconciliation_engine::models::MonthKey;
/// use chrono::NaiveDate;
///
/// let month: MonthKey = "2024-02".parse().unwrap();
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(month.contains(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()));
/// assert!("2024-13".parse::<MonthKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    first_day: NaiveDate,
}

impl MonthKey {
    /// Parses a strict `YYYY-MM` key: four year digits, a dash, two month
    /// digits in `01..=12`, nothing else.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonthKey {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let digits_ok = bytes[..4]
            .iter()
            .chain(&bytes[5..])
            .all(|b| b.is_ascii_digit());
        if !digits_ok {
            return Err(invalid());
        }

        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..].parse().map_err(|_| invalid())?;
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

        Ok(Self { first_day })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The calendar month, 1-based.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The date in this month with the given day, clamped to the month length.
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let last = self.last_day();
        let day = day.clamp(1, last.day());
        self.first_day.with_day(day).unwrap_or(last)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}
