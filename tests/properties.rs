//! Property-based tests for the earnings and payroll arithmetic.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use reconciliation_engine::calculation::{
    compute_lifetime, compute_monthly, round_money, summarize_payroll,
};
use reconciliation_engine::config::PayrollPolicy;
use reconciliation_engine::models::{
    BonusEntry, Employee, MonthKey, SalaryType, VacationEntry, VacationStatus,
};

fn may() -> MonthKey {
    MonthKey::parse("2024-05").unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn employee(id: u64, salary: Decimal) -> Employee {
    Employee {
        id,
        display_name: format!("Employee {}", id),
        salary,
        salary_type: SalaryType::Monthly,
        hire_date: None,
        end_date: None,
        is_active: true,
    }
}

fn unpaid(days: u32) -> VacationEntry {
    VacationEntry {
        id: 1,
        employee_id: 1,
        start_date: day(6),
        end_date: day(10),
        day_count: days,
        is_paid: false,
        paid_amount: Decimal::ZERO,
        status: VacationStatus::Completed,
    }
}

prop_compose! {
    fn arb_salary()(cents in 0i64..1_000_000_000) -> Decimal {
        Decimal::new(cents, 2)
    }
}

prop_compose! {
    fn arb_bonus()(
        id in 1u64..10_000,
        employee_id in 1u64..5,
        cents in -5_000_000i64..5_000_000,
        d in 1u32..=31,
    ) -> BonusEntry {
        BonusEntry {
            id,
            employee_id,
            amount: Decimal::new(cents, 2),
            kind: None,
            date: day(d),
            comment: None,
        }
    }
}

proptest! {
    #[test]
    fn deduction_is_rounded_day_share(salary in arb_salary(), days in 0u32..400) {
        let policy = PayrollPolicy::default();
        let report = compute_monthly(&employee(1, salary), may(), &[], &[unpaid(days)], policy);

        let expected = round_money(salary * Decimal::from(days) / Decimal::from(22), 2);
        prop_assert_eq!(report.unpaid_deduction, expected);

        let expected_after = round_money(salary - expected, 2).max(Decimal::ZERO);
        prop_assert_eq!(report.salary_after_vacation, expected_after);
    }

    #[test]
    fn lifetime_deduction_is_rounded_day_share(salary in arb_salary(), days in 0u32..400) {
        let mut staff = employee(1, salary);
        staff.hire_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let lifetime = compute_lifetime(&staff, &[], &[unpaid(days)], today, PayrollPolicy::default());

        let expected = round_money(salary * Decimal::from(days) / Decimal::from(22), 2);
        prop_assert_eq!(lifetime.unpaid_days, days);
        prop_assert_eq!(lifetime.unpaid_deduction, expected);
        prop_assert_eq!(
            lifetime.grand_total,
            round_money(lifetime.salary - expected, 2)
        );
    }

    #[test]
    fn more_unpaid_days_never_raise_total(salary in arb_salary(), days in 0u32..40) {
        let policy = PayrollPolicy::default();
        let staff = employee(1, salary);
        let fewer = compute_monthly(&staff, may(), &[], &[unpaid(days)], policy);
        let more = compute_monthly(&staff, may(), &[], &[unpaid(days + 1)], policy);

        prop_assert!(more.total_earnings <= fewer.total_earnings);
    }

    #[test]
    fn empty_month_pays_salary(salary in arb_salary()) {
        let report = compute_monthly(&employee(1, salary), may(), &[], &[], PayrollPolicy::default());

        prop_assert_eq!(report.total_earnings, salary);
        prop_assert!(report.unpaid_deduction.is_zero());
        prop_assert!(report.bonus_net.is_zero());
    }

    #[test]
    fn summary_total_is_sum_of_parts(
        salaries in prop::collection::vec(arb_salary(), 0..6),
        bonuses in prop::collection::vec(arb_bonus(), 0..12),
    ) {
        let employees: Vec<Employee> = salaries
            .into_iter()
            .enumerate()
            .map(|(i, salary)| employee(i as u64 + 1, salary))
            .collect();
        let summary = summarize_payroll(may(), &employees, &bonuses, &[], &[], PayrollPolicy::default());

        prop_assert!(summary.bonuses >= Decimal::ZERO);
        prop_assert!(summary.fines <= Decimal::ZERO);
        prop_assert_eq!(summary.bonus_net, summary.bonuses + summary.fines);
        prop_assert_eq!(
            summary.total,
            summary.payroll_expense + summary.commercial_expenses + summary.marketing_expenses
        );
    }
}
