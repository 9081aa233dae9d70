//! Performance benchmarks for the reconciliation engine.
//!
//! This benchmark suite covers:
//! - Monthly earnings for one employee with a growing number of ledger rows
//! - Payroll summary across a growing staff
//! - Obligation regeneration over many recurring rules
//! - The earnings endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use reconciliation_engine::api::{AppState, create_router};
use reconciliation_engine::calculation::{compute_monthly, summarize_payroll};
use reconciliation_engine::config::{ConfigLoader, PayrollPolicy};
use reconciliation_engine::ledger::{InMemoryLedger, LedgerSnapshot, ObligationLedger};
use reconciliation_engine::models::{
    BonusEntry, Employee, ExpenseCategory, ExpenseRecord, MonthKey, RecurringRule, SalaryType,
    VacationEntry, VacationStatus,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn may() -> MonthKey {
    MonthKey::parse("2024-05").expect("valid month")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
}

fn employee(id: u64) -> Employee {
    Employee {
        id,
        display_name: format!("Employee {}", id),
        salary: Decimal::from(150_000 + (id as i64 % 7) * 10_000),
        salary_type: SalaryType::Monthly,
        hire_date: NaiveDate::from_ymd_opt(2022, 1, 1),
        end_date: None,
        is_active: true,
    }
}

/// Creates `count` bonus rows spread over the month, every fourth a penalty.
fn bonuses(employee_id: u64, count: usize) -> Vec<BonusEntry> {
    (0..count)
        .map(|i| BonusEntry {
            id: i as u64 + 1,
            employee_id,
            amount: if i % 4 == 0 {
                Decimal::new(-50_000, 2)
            } else {
                Decimal::new(125_050, 2)
            },
            kind: None,
            date: day((i % 28) as u32 + 1),
            comment: None,
        })
        .collect()
}

fn vacations(employee_id: u64, count: usize) -> Vec<VacationEntry> {
    (0..count)
        .map(|i| VacationEntry {
            id: i as u64 + 1,
            employee_id,
            start_date: day((i % 28) as u32 + 1),
            end_date: day((i % 28) as u32 + 1),
            day_count: 1,
            is_paid: i % 2 == 0,
            paid_amount: Decimal::from(5_000),
            status: VacationStatus::Completed,
        })
        .collect()
}

/// Benchmark: Monthly earnings with a growing number of rows.
fn bench_monthly_earnings(c: &mut Criterion) {
    let staff = employee(1);
    let policy = PayrollPolicy::default();

    let mut group = c.benchmark_group("monthly_earnings");

    for rows in [1usize, 10, 100, 1000] {
        let bonus_rows = bonuses(1, rows);
        let vacation_rows = vacations(1, rows);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, _| {
            b.iter(|| {
                black_box(compute_monthly(
                    &staff,
                    may(),
                    &bonus_rows,
                    &vacation_rows,
                    policy,
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark: Payroll summary across a growing staff.
fn bench_payroll_summary(c: &mut Criterion) {
    let policy = PayrollPolicy::default();
    let categories = vec![
        ExpenseCategory {
            id: 1,
            name: "Advertising".to_string(),
            is_marketing: true,
        },
        ExpenseCategory {
            id: 2,
            name: "Rent".to_string(),
            is_marketing: false,
        },
    ];
    let expenses: Vec<ExpenseRecord> = (0..200)
        .map(|i| ExpenseRecord {
            id: i + 10,
            name: format!("Expense {}", i),
            amount: Decimal::new(1_999_99, 2),
            category_id: Some(i % 3),
            frequency_id: None,
            is_active: true,
            effective_from: None,
            effective_to: None,
        })
        .collect();

    let mut group = c.benchmark_group("payroll_summary");

    for staff_count in [10u64, 100, 1000] {
        let employees: Vec<Employee> = (1..=staff_count).map(employee).collect();
        let bonus_rows: Vec<BonusEntry> = (1..=staff_count)
            .flat_map(|id| bonuses(id, 3))
            .collect();

        group.throughput(Throughput::Elements(staff_count));
        group.bench_with_input(
            BenchmarkId::new("employees", staff_count),
            &staff_count,
            |b, _| {
                b.iter(|| {
                    black_box(summarize_payroll(
                        may(),
                        &employees,
                        &bonus_rows,
                        &categories,
                        &expenses,
                        policy,
                    ))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: Regenerating a period that is already fully occupied.
///
/// After the first pass every rule's slot is taken, so each iteration
/// measures the occupancy scan alone.
fn bench_regenerate(c: &mut Criterion) {
    let rules: Vec<RecurringRule> = (1..=100)
        .map(|id| RecurringRule {
            id,
            obligation_type: "tax".to_string(),
            name: format!("Rule {}", id),
            amount: Decimal::from(1_000),
            rate: None,
            base_amount: None,
            due_day: (id % 28) as u32 + 1,
            is_active: true,
        })
        .collect();
    let store = Arc::new(InMemoryLedger::from_snapshot(LedgerSnapshot {
        recurring_rules: rules,
        ..Default::default()
    }));
    let ledger = ObligationLedger::new(store);
    ledger.regenerate(may()).expect("first regeneration");

    c.bench_function("regenerate_100_rules", |b| {
        b.iter(|| black_box(ledger.regenerate(may()).expect("regeneration")))
    });
}

/// Benchmark: GET /employees/:id/earnings through the router.
fn bench_earnings_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = Arc::new(InMemoryLedger::from_snapshot(LedgerSnapshot {
        employees: vec![employee(1)],
        bonuses: bonuses(1, 20),
        vacations: vacations(1, 4),
        ..Default::default()
    }));
    let router = create_router(AppState::new(config, store));

    c.bench_function("earnings_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/employees/1/earnings?month=2024-05")
                        .header("x-principal-id", "bench")
                        .header("x-principal-role", "viewer")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_monthly_earnings,
    bench_payroll_summary,
    bench_regenerate,
    bench_earnings_endpoint,
);
criterion_main!(benches);
