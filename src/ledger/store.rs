//! The ledger storage interface.
//!
//! [`LedgerStore`] is the row-fetch and row-write boundary between the engine
//! and whatever holds the ledger. Every method is individually atomic; the
//! engine never holds a transaction across calls.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::EngineResult;
use crate::models::{
    BonusEntry, Employee, ExpenseCategory, ExpenseRecord, MonthKey, NewBonus, NewObligation,
    NewVacation, ObligationPatch, ObligationRow, RecurringRule, Retirement, VacationEntry,
    VacationPatch,
};

/// An inclusive date window; an open side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The days of one month.
    pub fn month(month: MonthKey) -> Self {
        Self {
            start: Some(month.first_day()),
            end: Some(month.last_day()),
        }
    }

    /// A window from `start` to an optional `end`.
    pub fn from(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    /// Returns true if `date` lies in the window.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::ledger::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let hire = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let range = DateRange::from(hire, None);
    /// assert!(range.contains(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    /// assert!(!range.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Row access to the ledger.
///
/// Not-found identifiers on update and delete are reported as
/// [`EngineError::RecordNotFound`](crate::error::EngineError::RecordNotFound).
pub trait LedgerStore: Send + Sync {
    /// Fetches one employee.
    fn employee(&self, id: u64) -> EngineResult<Option<Employee>>;

    /// Fetches every employee, active or not.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Bonus entries of one employee dated inside `range`.
    fn bonuses_for_employee(&self, employee_id: u64, range: DateRange)
    -> EngineResult<Vec<BonusEntry>>;

    /// Bonus entries of all employees dated inside `range`.
    fn bonuses_in(&self, range: DateRange) -> EngineResult<Vec<BonusEntry>>;

    /// Every vacation of one employee.
    fn vacations_for_employee(&self, employee_id: u64) -> EngineResult<Vec<VacationEntry>>;

    /// Every expense category.
    fn expense_categories(&self) -> EngineResult<Vec<ExpenseCategory>>;

    /// Expense records with the active flag set.
    fn active_expenses(&self) -> EngineResult<Vec<ExpenseRecord>>;

    /// Records a bonus or penalty.
    fn insert_bonus(&self, new: NewBonus) -> EngineResult<BonusEntry>;

    /// Deletes a bonus or penalty.
    fn delete_bonus(&self, id: u64) -> EngineResult<()>;

    /// Records a vacation.
    fn insert_vacation(&self, new: NewVacation) -> EngineResult<VacationEntry>;

    /// Edits a vacation.
    fn update_vacation(&self, id: u64, patch: VacationPatch) -> EngineResult<VacationEntry>;

    /// Deletes a vacation.
    fn delete_vacation(&self, id: u64) -> EngineResult<()>;

    /// Deletes a category and detaches the expenses referencing it.
    ///
    /// Returns the number of detached expense records.
    fn delete_expense_category(&self, id: u64) -> EngineResult<usize>;

    /// Deletes a frequency type and detaches the expenses referencing it.
    ///
    /// Returns the number of detached expense records.
    fn delete_frequency_type(&self, id: u64) -> EngineResult<usize>;

    /// Stores a new obligation.
    fn insert_obligation(&self, new: NewObligation, now: DateTime<Utc>)
    -> EngineResult<ObligationRow>;

    /// Stores a generated obligation unless any row, suppressed or not,
    /// already occupies its (rule, period) slot. Check and insert are atomic.
    fn insert_generated_obligation(
        &self,
        new: NewObligation,
        now: DateTime<Utc>,
    ) -> EngineResult<Option<ObligationRow>>;

    /// Fetches one obligation, including suppressed ones.
    fn obligation(&self, id: u64) -> EngineResult<Option<ObligationRow>>;

    /// Every obligation, including suppressed ones.
    fn obligations(&self) -> EngineResult<Vec<ObligationRow>>;

    /// Applies a partial edit. Suppressed rows count as not found.
    fn update_obligation(
        &self,
        id: u64,
        patch: ObligationPatch,
        now: DateTime<Utc>,
    ) -> EngineResult<ObligationRow>;

    /// Suppresses or removes an obligation as its rule reference dictates.
    /// The decision and the write are atomic.
    fn retire_obligation(&self, id: u64, now: DateTime<Utc>) -> EngineResult<Retirement>;

    /// Every recurring obligation rule.
    fn recurring_rules(&self) -> EngineResult<Vec<RecurringRule>>;
}
