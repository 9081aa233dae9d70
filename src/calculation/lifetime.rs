//! Lifetime earnings accumulation.
//!
//! Aggregates an employee's compensation from the hire date through the end
//! of employment, or through "today" while still employed.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::ledger::DateRange;
use crate::models::{BonusEntry, Employee, LifetimeEarnings, VacationEntry};

use super::adjustments::{BonusTotals, VacationTotals};
use super::rounding::round_money;

/// Number of calendar months touched by the span `hire..=end`, at least one.
///
/// Partial months at either end count as whole months.
///
/// # Examples
///
/// ```
/// use reconciliation_engine::calculation::months_worked;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(months_worked(hire, today), 6);
/// assert_eq!(months_worked(today, hire), 1);
/// ```
pub fn months_worked(hire: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end.year() - hire.year()) * 12 + end.month() as i32 - hire.month() as i32 + 1;
    span.max(1).unsigned_abs()
}

/// Computes lifetime figures from already-fetched rows.
///
/// Returns all zeros when the employee has no hire date. Bonuses count when
/// dated between hire and end date (inclusive, open-ended while employed);
/// vacations count when their start date lies in that window.
///
/// Salary is the current monthly salary times [`months_worked`]; raises
/// during the tenure are not reconstructed.
pub fn compute_lifetime(
    employee: &Employee,
    bonuses: &[BonusEntry],
    vacations: &[VacationEntry],
    today: NaiveDate,
    policy: PayrollPolicy,
) -> LifetimeEarnings {
    let Some(hire) = employee.hire_date else {
        return LifetimeEarnings::default();
    };

    let tenure = DateRange::from(hire, employee.end_date);
    let months = months_worked(hire, employee.end_date.unwrap_or(today));

    let bonus = BonusTotals::from_entries(bonuses.iter().filter(|b| tenure.contains(b.date)));
    let vacation =
        VacationTotals::from_entries(vacations.iter().filter(|v| tenure.contains(v.start_date)));

    let salary = round_money(employee.salary * Decimal::from(months), policy.scale);
    let unpaid_deduction = round_money(
        policy.unpaid_deduction(employee.salary, vacation.unpaid_days),
        policy.scale,
    );
    let grand_total = round_money(
        salary - unpaid_deduction + bonus.net() + vacation.paid_amount,
        policy.scale,
    );

    LifetimeEarnings {
        months_worked: months,
        salary,
        bonuses: round_money(bonus.bonuses, policy.scale),
        penalties: round_money(bonus.penalties, policy.scale),
        bonus_net: round_money(bonus.net(), policy.scale),
        unpaid_days: vacation.unpaid_days,
        unpaid_deduction,
        paid_vacation: round_money(vacation.paid_amount, policy.scale),
        grand_total,
    }
}
