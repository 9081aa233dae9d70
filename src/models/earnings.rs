//! Result models for the earnings and payroll computations.
//!
//! These are the JSON shapes returned by the earnings and payroll-summary
//! endpoints. Every monetary figure is a [`Decimal`] rounded to two places.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MonthKey, SalaryType};

/// Cumulative figures from hire date to end date (or today).
///
/// All fields are zero when the employee has no hire date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeEarnings {
    /// Calendar months touched by the tenure, at least one.
    pub months_worked: u32,
    /// Current salary times months worked.
    pub salary: Decimal,
    /// Sum of bonuses over the tenure.
    pub bonuses: Decimal,
    /// Magnitude of penalties over the tenure.
    pub penalties: Decimal,
    /// Bonuses minus penalties.
    pub bonus_net: Decimal,
    /// Unpaid vacation days over the tenure.
    pub unpaid_days: u32,
    /// Salary withheld for unpaid vacation.
    pub unpaid_deduction: Decimal,
    /// Amounts paid for paid vacations.
    pub paid_vacation: Decimal,
    /// Salary minus deduction plus bonus net plus paid vacation.
    pub grand_total: Decimal,
}

/// One employee's earnings for one month, with the lifetime block nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsReport {
    /// The month computed.
    pub month: MonthKey,
    /// The employee computed.
    pub employee_id: u64,
    /// Display name; absent for an unknown employee.
    pub employee_name: Option<String>,
    /// Monthly salary.
    pub salary: Decimal,
    /// Salary type; absent for an unknown employee.
    pub salary_type: Option<SalaryType>,
    /// Hire date.
    pub hire_date: Option<NaiveDate>,
    /// End of employment.
    pub end_date: Option<NaiveDate>,
    /// Sum of bonuses in the month.
    pub bonuses: Decimal,
    /// Magnitude of penalties in the month.
    pub penalties: Decimal,
    /// Bonuses minus penalties.
    pub bonus_net: Decimal,
    /// Paid vacation days touching the month.
    pub paid_vacation_days: u32,
    /// Unpaid vacation days touching the month.
    pub unpaid_vacation_days: u32,
    /// Paid plus unpaid days.
    pub total_vacation_days: u32,
    /// Amount paid for paid vacations touching the month.
    pub vacation_paid_amount: Decimal,
    /// Salary withheld for unpaid days.
    pub unpaid_deduction: Decimal,
    /// Salary minus the unpaid deduction, floored at zero.
    pub salary_after_vacation: Decimal,
    /// Salary after vacation plus bonus net plus paid vacation.
    pub total_earnings: Decimal,
    /// Figures since hire.
    pub lifetime: LifetimeEarnings,
}

/// Company-wide payroll and expense totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The month computed.
    pub month: MonthKey,
    /// Sum of salaries of active, salaried employees.
    pub salaries: Decimal,
    /// Sum of bonuses dated in the month.
    pub bonuses: Decimal,
    /// Sum of penalties dated in the month, negative.
    pub fines: Decimal,
    /// Bonuses plus fines.
    pub bonus_net: Decimal,
    /// Salaries plus bonuses plus fines.
    pub payroll_expense: Decimal,
    /// Active expenses outside marketing categories.
    pub commercial_expenses: Decimal,
    /// Active expenses in marketing categories.
    pub marketing_expenses: Decimal,
    /// Payroll expense plus both expense rollups.
    pub total: Decimal,
}
