//! Vacation entries.
//!
//! The day count of a [`VacationEntry`] is fixed when the entry is created.
//! Later edits of the dates leave it as it was unless a new count is supplied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lifecycle of a vacation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    /// Scheduled, not yet started.
    #[default]
    Planned,
    /// In progress.
    Active,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
}

/// A stored vacation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationEntry {
    /// Unique identifier.
    pub id: u64,
    /// The employee on vacation.
    pub employee_id: u64,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Days taken, as recorded at creation or last explicitly supplied.
    pub day_count: u32,
    /// Whether the vacation is paid.
    #[serde(default)]
    pub is_paid: bool,
    /// Amount paid for the vacation; only meaningful when `is_paid`.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Lifecycle status.
    #[serde(default)]
    pub status: VacationStatus,
}

impl VacationEntry {
    /// The paid amount, or zero for unpaid vacations.
    pub fn effective_paid_amount(&self) -> Decimal {
        if self.is_paid {
            self.paid_amount
        } else {
            Decimal::ZERO
        }
    }

    /// Applies a partial edit. The day count only changes when the patch carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::models::{VacationEntry, VacationPatch, VacationStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut vacation = VacationEntry {
    ///     id: 1,
    ///     employee_id: 1,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
    ///     day_count: 3,
    ///     is_paid: false,
    ///     paid_amount: Decimal::ZERO,
    ///     status: VacationStatus::Planned,
    /// };
    /// vacation.apply(VacationPatch {
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 17),
    ///     ..Default::default()
    /// }).unwrap();
    /// assert_eq!(vacation.day_count, 3);
    /// ```
    pub fn apply(&mut self, patch: VacationPatch) -> EngineResult<()> {
        let start = patch.start_date.unwrap_or(self.start_date);
        let end = patch.end_date.unwrap_or(self.end_date);
        check_span(start, end)?;

        self.start_date = start;
        self.end_date = end;
        if let Some(day_count) = patch.day_count {
            self.day_count = day_count;
        }
        if let Some(is_paid) = patch.is_paid {
            self.is_paid = is_paid;
        }
        if let Some(paid_amount) = patch.paid_amount {
            self.paid_amount = paid_amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }
}

/// The fields needed to record a new vacation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVacation {
    /// The employee on vacation.
    pub employee_id: u64,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Explicit day count; derived from the inclusive span when absent.
    #[serde(default)]
    pub day_count: Option<u32>,
    /// Whether the vacation is paid.
    #[serde(default)]
    pub is_paid: bool,
    /// Amount paid for the vacation.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Lifecycle status.
    #[serde(default)]
    pub status: VacationStatus,
}

impl NewVacation {
    /// Validates the request and materializes the stored row.
    pub fn into_entry(self, id: u64) -> EngineResult<VacationEntry> {
        if self.employee_id == 0 {
            return Err(EngineError::invalid_field(
                "employee_id",
                "an employee identifier is required",
            ));
        }
        check_span(self.start_date, self.end_date)?;

        let day_count = match self.day_count {
            Some(days) => days,
            None => inclusive_days(self.start_date, self.end_date),
        };

        Ok(VacationEntry {
            id,
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            day_count,
            is_paid: self.is_paid,
            paid_amount: self.paid_amount,
            status: self.status,
        })
    }
}

/// A partial edit of a vacation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacationPatch {
    /// New first day off.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// New last day off.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// New day count.
    #[serde(default)]
    pub day_count: Option<u32>,
    /// New paid flag.
    #[serde(default)]
    pub is_paid: Option<bool>,
    /// New paid amount.
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    /// New status.
    #[serde(default)]
    pub status: Option<VacationStatus>,
}

/// Number of calendar days from `start` to `end`, both included.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days() + 1;
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

fn check_span(start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    if end < start {
        return Err(EngineError::invalid_field(
            "end_date",
            format!("{} is before start date {}", end, start),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_vacation(day_count: Option<u32>) -> NewVacation {
        NewVacation {
            employee_id: 1,
            start_date: date(2024, 3, 4),
            end_date: date(2024, 3, 8),
            day_count,
            is_paid: false,
            paid_amount: Decimal::ZERO,
            status: VacationStatus::Planned,
        }
    }

    #[test]
    fn test_day_count_derived_from_inclusive_span() {
        let entry = new_vacation(None).into_entry(1).unwrap();
        assert_eq!(entry.day_count, 5);
    }

    #[test]
    fn test_explicit_day_count_is_kept() {
        let entry = new_vacation(Some(3)).into_entry(1).unwrap();
        assert_eq!(entry.day_count, 3);
    }

    #[test]
    fn test_single_day_vacation() {
        assert_eq!(inclusive_days(date(2024, 1, 1), date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut new = new_vacation(None);
        new.end_date = date(2024, 3, 1);
        assert!(matches!(
            new.into_entry(1),
            Err(EngineError::InvalidField { ref field, .. }) if field == "end_date"
        ));
    }

    #[test]
    fn test_missing_employee_rejected() {
        let mut new = new_vacation(None);
        new.employee_id = 0;
        assert!(new.into_entry(1).is_err());
    }

    #[test]
    fn test_editing_dates_leaves_day_count_stale() {
        let mut entry = new_vacation(None).into_entry(1).unwrap();
        entry
            .apply(VacationPatch {
                start_date: Some(date(2024, 3, 1)),
                end_date: Some(date(2024, 3, 20)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(entry.start_date, date(2024, 3, 1));
        assert_eq!(entry.end_date, date(2024, 3, 20));
        assert_eq!(entry.day_count, 5);
    }

    #[test]
    fn test_patch_with_day_count_replaces_it() {
        let mut entry = new_vacation(None).into_entry(1).unwrap();
        entry
            .apply(VacationPatch {
                day_count: Some(2),
                status: Some(VacationStatus::Completed),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(entry.day_count, 2);
        assert_eq!(entry.status, VacationStatus::Completed);
    }

    #[test]
    fn test_patch_rejects_inverted_span() {
        let mut entry = new_vacation(None).into_entry(1).unwrap();
        let result = entry.apply(VacationPatch {
            end_date: Some(date(2024, 2, 1)),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(entry.end_date, date(2024, 3, 8));
    }

    #[test]
    fn test_unpaid_vacation_has_no_paid_amount() {
        let mut entry = new_vacation(None).into_entry(1).unwrap();
        entry.paid_amount = Decimal::from(999);
        assert_eq!(entry.effective_paid_amount(), Decimal::ZERO);

        entry.is_paid = true;
        assert_eq!(entry.effective_paid_amount(), Decimal::from(999));
    }
}
