//! Company-wide payroll and expense summary.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::ledger::{DateRange, LedgerStore};
use crate::models::{
    BonusEntry, Employee, ExpenseCategory, ExpenseRecord, MonthKey, PayrollSummary,
};

use super::adjustments::BonusTotals;
use super::rounding::round_money;

/// Aggregates payroll and expense totals for `month` from already-fetched rows.
///
/// - Salaries are the flat monthly salaries of active employees with a
///   positive salary; they are not prorated.
/// - Bonuses and fines come from entries dated in the month, across all
///   employees. Fines stay negative.
/// - The expense rollup covers every active expense record regardless of
///   month. Each amount is rounded first, then added to marketing when its
///   category is flagged so and to commercial otherwise (uncategorized
///   records and dangling category references included).
///
/// # Examples
///
/// ```
/// use reconciliation_engine::calculation::summarize_payroll;
/// use reconciliation_engine::config::PayrollPolicy;
/// use reconciliation_engine::models::MonthKey;
///
/// let month = MonthKey::parse("2024-05").unwrap();
/// let summary = summarize_payroll(month, &[], &[], &[], &[], PayrollPolicy::default());
/// assert!(summary.total.is_zero());
/// ```
pub fn summarize_payroll(
    month: MonthKey,
    employees: &[Employee],
    bonuses: &[BonusEntry],
    categories: &[ExpenseCategory],
    expenses: &[ExpenseRecord],
    policy: PayrollPolicy,
) -> PayrollSummary {
    let salaries: Decimal = employees
        .iter()
        .filter(|e| e.is_on_payroll())
        .map(|e| e.salary)
        .sum();

    let bonus = BonusTotals::from_entries(bonuses.iter().filter(|b| month.contains(b.date)));
    let payroll_expense = salaries + bonus.bonuses + bonus.fines();

    let marketing_categories: HashMap<u64, bool> = categories
        .iter()
        .map(|category| (category.id, category.is_marketing))
        .collect();

    let (marketing, commercial) = expenses.iter().filter(|e| e.is_active).fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(marketing, commercial), expense| {
            let amount = round_money(expense.amount, policy.scale);
            let is_marketing = expense
                .category_id
                .and_then(|id| marketing_categories.get(&id).copied())
                .unwrap_or(false);
            if is_marketing {
                (marketing + amount, commercial)
            } else {
                (marketing, commercial + amount)
            }
        },
    );

    PayrollSummary {
        month,
        salaries: round_money(salaries, policy.scale),
        bonuses: round_money(bonus.bonuses, policy.scale),
        fines: round_money(bonus.fines(), policy.scale),
        bonus_net: round_money(bonus.net(), policy.scale),
        payroll_expense: round_money(payroll_expense, policy.scale),
        commercial_expenses: commercial,
        marketing_expenses: marketing,
        total: round_money(payroll_expense + commercial + marketing, policy.scale),
    }
}

/// Reads the ledger and aggregates the payroll summary for `month`.
///
/// Any store failure is returned; no partial summary is produced.
pub fn payroll_summary(
    store: &dyn LedgerStore,
    month: MonthKey,
    policy: PayrollPolicy,
) -> EngineResult<PayrollSummary> {
    let employees = store.employees()?;
    let bonuses = store.bonuses_in(DateRange::month(month))?;
    let categories = store.expense_categories()?;
    let expenses = store.active_expenses()?;

    let summary = summarize_payroll(month, &employees, &bonuses, &categories, &expenses, policy);
    debug!(
        month = %month,
        employees = employees.len(),
        expenses = expenses.len(),
        total = %summary.total,
        "Computed payroll summary"
    );
    Ok(summary)
}
