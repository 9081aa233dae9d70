//! Employee model and related types.
//!
//! This module defines the Employee struct and SalaryType enum for the
//! staff records the earnings calculations read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an employee's salary is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// A fixed monthly salary.
    #[default]
    Monthly,
    /// Any other arrangement (hourly, per piece); still stored as a monthly figure.
    Other,
}

/// Represents an employee record owned by the HR module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// The name shown in the back office.
    #[serde(default)]
    pub display_name: String,
    /// The monthly salary; never negative.
    #[serde(default)]
    pub salary: Decimal,
    /// How the salary is expressed.
    #[serde(default)]
    pub salary_type: SalaryType,
    /// The date the employee was hired; lifetime figures need it.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// The last day of employment, absent while still employed.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the employee counts toward the payroll.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub(crate) fn default_active() -> bool {
    true
}

impl Employee {
    /// A zero-salary stand-in for an identifier the ledger has no record of.
    ///
    /// Rows still referencing the identifier can be summed against it.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            display_name: String::new(),
            salary: Decimal::ZERO,
            salary_type: SalaryType::default(),
            hire_date: None,
            end_date: None,
            is_active: false,
        }
    }

    /// Returns true if the employee contributes a salary to the company payroll.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::models::{Employee, SalaryType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     display_name: "Anna".to_string(),
    ///     salary: Decimal::from(100_000),
    ///     salary_type: SalaryType::Monthly,
    ///     hire_date: None,
    ///     end_date: None,
    ///     is_active: true,
    /// };
    /// assert!(employee.is_on_payroll());
    /// ```
    pub fn is_on_payroll(&self) -> bool {
        self.is_active && self.salary > Decimal::ZERO
    }
}
