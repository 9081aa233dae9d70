//! Core data models for the Financial Reconciliation Engine.
//!
//! This module contains the ledger row shapes the engine reads and writes,
//! the month key used to filter them, and the computed result types.

mod bonus;
mod earnings;
mod employee;
mod expense;
mod month_key;
mod obligation;
mod vacation;

pub use bonus::{BonusEntry, BonusKind, NewBonus};
pub use earnings::{EarningsReport, LifetimeEarnings, PayrollSummary};
pub use employee::{Employee, SalaryType};
pub use expense::{ExpenseCategory, ExpenseRecord, FrequencyType};
pub use month_key::MonthKey;
pub use obligation::{
    NewObligation, ObligationPatch, ObligationRow, ObligationStatus, RecurringRule, Retirement,
};
pub use vacation::{NewVacation, VacationEntry, VacationPatch, VacationStatus, inclusive_days};
