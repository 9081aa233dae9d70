//! Monthly earnings for one employee.
//!
//! The monthly figure starts from the flat salary, withholds a daily-rate
//! deduction for unpaid vacation days, then adds the month's bonus net and
//! the amount paid for paid vacations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::ledger::{DateRange, LedgerStore};
use crate::models::{BonusEntry, EarningsReport, Employee, MonthKey, VacationEntry};

use super::adjustments::{BonusTotals, VacationTotals};
use super::lifetime::compute_lifetime;
use super::rounding::round_money;

/// Computes one employee's earnings for `month` from already-fetched rows.
///
/// Bonuses count when dated in the month. Vacations count when either their
/// start or their end falls in the month, so a vacation spanning two months
/// is counted in full against both. Rows outside those windows are ignored.
///
/// The returned report carries a zeroed lifetime block; see
/// [`earnings_report`] for the full computation.
///
/// # Examples
///
/// ```
/// use reconciliation_engine::calculation::compute_monthly;
/// use reconciliation_engine::config::PayrollPolicy;
/// use reconciliation_engine::models::{Employee, MonthKey, SalaryType};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 1,
///     display_name: "Anna".to_string(),
///     salary: Decimal::from(300_000),
///     salary_type: SalaryType::Monthly,
///     hire_date: None,
///     end_date: None,
///     is_active: true,
/// };
/// let month = MonthKey::parse("2024-05").unwrap();
///
/// let report = compute_monthly(&employee, month, &[], &[], PayrollPolicy::default());
/// assert_eq!(report.total_earnings, Decimal::from(300_000));
/// ```
pub fn compute_monthly(
    employee: &Employee,
    month: MonthKey,
    bonuses: &[BonusEntry],
    vacations: &[VacationEntry],
    policy: PayrollPolicy,
) -> EarningsReport {
    let bonus = BonusTotals::from_entries(bonuses.iter().filter(|b| month.contains(b.date)));
    let vacation = VacationTotals::from_entries(
        vacations
            .iter()
            .filter(|v| month.contains(v.start_date) || month.contains(v.end_date)),
    );

    let salary = employee.salary;
    let unpaid_deduction = round_money(
        policy.unpaid_deduction(salary, vacation.unpaid_days),
        policy.scale,
    );
    let salary_after_vacation =
        round_money(salary - unpaid_deduction, policy.scale).max(Decimal::ZERO);
    let total_earnings = round_money(
        salary_after_vacation + bonus.net() + vacation.paid_amount,
        policy.scale,
    );

    EarningsReport {
        month,
        employee_id: employee.id,
        employee_name: Some(employee.display_name.clone()),
        salary,
        salary_type: Some(employee.salary_type),
        hire_date: employee.hire_date,
        end_date: employee.end_date,
        bonuses: round_money(bonus.bonuses, policy.scale),
        penalties: round_money(bonus.penalties, policy.scale),
        bonus_net: round_money(bonus.net(), policy.scale),
        paid_vacation_days: vacation.paid_days,
        unpaid_vacation_days: vacation.unpaid_days,
        total_vacation_days: vacation.total_days(),
        vacation_paid_amount: round_money(vacation.paid_amount, policy.scale),
        unpaid_deduction,
        salary_after_vacation,
        total_earnings,
        lifetime: Default::default(),
    }
}

/// Computes the full earnings report of one employee for `month`, lifetime
/// block included.
///
/// An employee id the ledger does not know is computed at zero salary: its
/// bonus and vacation rows still count, while name, salary type and the
/// lifetime block stay empty. A failed vacation lookup is logged and treated
/// as "no vacations"; any other store failure is returned.
///
/// `today` closes the lifetime window of employees without an end date.
pub fn earnings_report(
    store: &dyn LedgerStore,
    employee_id: u64,
    month: MonthKey,
    today: NaiveDate,
    policy: PayrollPolicy,
) -> EngineResult<EarningsReport> {
    let record = store.employee(employee_id)?;
    let known = record.is_some();
    if !known {
        debug!(employee_id, month = %month, "Unknown employee, counting rows at zero salary");
    }
    let employee = record.unwrap_or_else(|| Employee::placeholder(employee_id));

    let month_bonuses = store.bonuses_for_employee(employee_id, DateRange::month(month))?;
    let vacations = store
        .vacations_for_employee(employee_id)
        .unwrap_or_else(|e| {
            warn!(employee_id, error = %e, "Vacation lookup failed, counting none");
            Vec::new()
        });

    let mut report = compute_monthly(&employee, month, &month_bonuses, &vacations, policy);
    if !known {
        report.employee_name = None;
        report.salary_type = None;
    }

    if let Some(hire) = employee.hire_date {
        let tenure_bonuses =
            store.bonuses_for_employee(employee_id, DateRange::from(hire, employee.end_date))?;
        report.lifetime = compute_lifetime(&employee, &tenure_bonuses, &vacations, today, policy);
    }

    debug!(
        employee_id,
        month = %month,
        total = %report.total_earnings,
        "Computed monthly earnings"
    );
    Ok(report)
}
