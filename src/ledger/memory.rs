//! In-process ledger store.
//!
//! [`InMemoryLedger`] keeps every table in one [`RwLock`]. Each trait method
//! takes the lock once, which makes every call atomic while letting reads run
//! in parallel.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::{DateRange, LedgerStore};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BonusEntry, Employee, ExpenseCategory, ExpenseRecord, FrequencyType, NewBonus, NewObligation,
    NewVacation, ObligationPatch, ObligationRow, RecurringRule, Retirement, VacationEntry,
    VacationPatch,
};

/// A full copy of the ledger, as loaded from a seed file.
///
/// # Example
///
/// ```
/// use reconciliation_engine::ledger::LedgerSnapshot;
///
/// let yaml = r#"
/// employees:
///   - id: 1
///     display_name: Anna
///     salary: 100000
///     hire_date: 2024-01-01
/// "#;
/// let snapshot: LedgerSnapshot = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(snapshot.employees.len(), 1);
/// assert!(snapshot.obligations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Employee records.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Bonus and penalty entries.
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    /// Vacation entries.
    #[serde(default)]
    pub vacations: Vec<VacationEntry>,
    /// Expense categories.
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    /// Expense frequency types.
    #[serde(default)]
    pub frequency_types: Vec<FrequencyType>,
    /// Expense records.
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    /// Obligation rows.
    #[serde(default)]
    pub obligations: Vec<ObligationRow>,
    /// Recurring obligation rules.
    #[serde(default)]
    pub recurring_rules: Vec<RecurringRule>,
}

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<u64, Employee>,
    bonuses: BTreeMap<u64, BonusEntry>,
    vacations: BTreeMap<u64, VacationEntry>,
    expense_categories: BTreeMap<u64, ExpenseCategory>,
    frequency_types: BTreeMap<u64, FrequencyType>,
    expenses: BTreeMap<u64, ExpenseRecord>,
    obligations: BTreeMap<u64, ObligationRow>,
    recurring_rules: BTreeMap<u64, RecurringRule>,
    next_id: u64,
}

impl Tables {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn detach_expenses(&mut self, detach: impl Fn(&mut ExpenseRecord) -> bool) -> usize {
        self.expenses
            .values_mut()
            .map(|expense| detach(expense))
            .filter(|changed| *changed)
            .count()
    }
}

fn index<T>(rows: Vec<T>, id: impl Fn(&T) -> u64) -> BTreeMap<u64, T> {
    rows.into_iter().map(|row| (id(&row), row)).collect()
}

/// A [`LedgerStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    tables: RwLock<Tables>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::from_snapshot(LedgerSnapshot::default())
    }

    /// Creates a ledger holding the rows of `snapshot`.
    ///
    /// Identifiers allocated later continue after the largest seeded one.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut tables = Tables {
            employees: index(snapshot.employees, |r| r.id),
            bonuses: index(snapshot.bonuses, |r| r.id),
            vacations: index(snapshot.vacations, |r| r.id),
            expense_categories: index(snapshot.expense_categories, |r| r.id),
            frequency_types: index(snapshot.frequency_types, |r| r.id),
            expenses: index(snapshot.expenses, |r| r.id),
            obligations: index(snapshot.obligations, |r| r.id),
            recurring_rules: index(snapshot.recurring_rules, |r| r.id),
            next_id: 1,
        };

        let max_id = [
            tables.employees.keys().next_back(),
            tables.bonuses.keys().next_back(),
            tables.vacations.keys().next_back(),
            tables.expense_categories.keys().next_back(),
            tables.frequency_types.keys().next_back(),
            tables.expenses.keys().next_back(),
            tables.obligations.keys().next_back(),
            tables.recurring_rules.keys().next_back(),
        ]
        .into_iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);
        tables.next_id = max_id + 1;

        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Copies the current contents out.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let tables = self.tables.read();
        LedgerSnapshot {
            employees: tables.employees.values().cloned().collect(),
            bonuses: tables.bonuses.values().cloned().collect(),
            vacations: tables.vacations.values().cloned().collect(),
            expense_categories: tables.expense_categories.values().cloned().collect(),
            frequency_types: tables.frequency_types.values().cloned().collect(),
            expenses: tables.expenses.values().cloned().collect(),
            obligations: tables.obligations.values().cloned().collect(),
            recurring_rules: tables.recurring_rules.values().cloned().collect(),
        }
    }
}

impl LedgerStore for InMemoryLedger {
    fn employee(&self, id: u64) -> EngineResult<Option<Employee>> {
        Ok(self.tables.read().employees.get(&id).cloned())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.tables.read().employees.values().cloned().collect())
    }

    fn bonuses_for_employee(
        &self,
        employee_id: u64,
        range: DateRange,
    ) -> EngineResult<Vec<BonusEntry>> {
        Ok(self
            .tables
            .read()
            .bonuses
            .values()
            .filter(|b| b.employee_id == employee_id && range.contains(b.date))
            .cloned()
            .collect())
    }

    fn bonuses_in(&self, range: DateRange) -> EngineResult<Vec<BonusEntry>> {
        Ok(self
            .tables
            .read()
            .bonuses
            .values()
            .filter(|b| range.contains(b.date))
            .cloned()
            .collect())
    }

    fn vacations_for_employee(&self, employee_id: u64) -> EngineResult<Vec<VacationEntry>> {
        Ok(self
            .tables
            .read()
            .vacations
            .values()
            .filter(|v| v.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn expense_categories(&self) -> EngineResult<Vec<ExpenseCategory>> {
        Ok(self
            .tables
            .read()
            .expense_categories
            .values()
            .cloned()
            .collect())
    }

    fn active_expenses(&self) -> EngineResult<Vec<ExpenseRecord>> {
        Ok(self
            .tables
            .read()
            .expenses
            .values()
            .filter(|e| e.is_active)
            .cloned()
            .collect())
    }

    fn insert_bonus(&self, new: NewBonus) -> EngineResult<BonusEntry> {
        new.validate()?;
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(&new.employee_id) {
            return Err(EngineError::invalid_field(
                "employee_id",
                format!("unknown employee {}", new.employee_id),
            ));
        }
        let entry = new.into_entry(tables.allocate_id());
        tables.bonuses.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn delete_bonus(&self, id: u64) -> EngineResult<()> {
        self.tables
            .write()
            .bonuses
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::RecordNotFound { entity: "bonus", id })
    }

    fn insert_vacation(&self, new: NewVacation) -> EngineResult<VacationEntry> {
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(&new.employee_id) {
            return Err(EngineError::invalid_field(
                "employee_id",
                format!("unknown employee {}", new.employee_id),
            ));
        }
        let id = tables.allocate_id();
        let entry = new.into_entry(id)?;
        tables.vacations.insert(id, entry.clone());
        Ok(entry)
    }

    fn update_vacation(&self, id: u64, patch: VacationPatch) -> EngineResult<VacationEntry> {
        let mut tables = self.tables.write();
        let entry = tables.vacations.get_mut(&id).ok_or(EngineError::RecordNotFound {
            entity: "vacation",
            id,
        })?;
        entry.apply(patch)?;
        Ok(entry.clone())
    }

    fn delete_vacation(&self, id: u64) -> EngineResult<()> {
        self.tables
            .write()
            .vacations
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::RecordNotFound {
                entity: "vacation",
                id,
            })
    }

    fn delete_expense_category(&self, id: u64) -> EngineResult<usize> {
        let mut tables = self.tables.write();
        if tables.expense_categories.remove(&id).is_none() {
            return Err(EngineError::RecordNotFound {
                entity: "expense category",
                id,
            });
        }
        let detached = tables.detach_expenses(|expense| expense.detach_category(id));
        debug!(category_id = id, detached, "Expense category deleted");
        Ok(detached)
    }

    fn delete_frequency_type(&self, id: u64) -> EngineResult<usize> {
        let mut tables = self.tables.write();
        if tables.frequency_types.remove(&id).is_none() {
            return Err(EngineError::RecordNotFound {
                entity: "frequency type",
                id,
            });
        }
        let detached = tables.detach_expenses(|expense| expense.detach_frequency(id));
        debug!(frequency_id = id, detached, "Frequency type deleted");
        Ok(detached)
    }

    fn insert_obligation(
        &self,
        new: NewObligation,
        now: DateTime<Utc>,
    ) -> EngineResult<ObligationRow> {
        let mut tables = self.tables.write();
        let id = tables.allocate_id();
        let row = new.into_row(id, now)?;
        tables.obligations.insert(id, row.clone());
        Ok(row)
    }

    fn insert_generated_obligation(
        &self,
        new: NewObligation,
        now: DateTime<Utc>,
    ) -> EngineResult<Option<ObligationRow>> {
        let rule_id = new.rule_id.ok_or_else(|| {
            EngineError::invalid_field("rule_id", "generated obligations need a rule")
        })?;

        let mut tables = self.tables.write();
        let occupied = tables
            .obligations
            .values()
            .any(|row| row.occupies(rule_id, &new.period));
        if occupied {
            return Ok(None);
        }

        let id = tables.allocate_id();
        let row = new.into_row(id, now)?;
        tables.obligations.insert(id, row.clone());
        Ok(Some(row))
    }

    fn obligation(&self, id: u64) -> EngineResult<Option<ObligationRow>> {
        Ok(self.tables.read().obligations.get(&id).cloned())
    }

    fn obligations(&self) -> EngineResult<Vec<ObligationRow>> {
        Ok(self.tables.read().obligations.values().cloned().collect())
    }

    fn update_obligation(
        &self,
        id: u64,
        patch: ObligationPatch,
        now: DateTime<Utc>,
    ) -> EngineResult<ObligationRow> {
        let mut tables = self.tables.write();
        let row = tables
            .obligations
            .get_mut(&id)
            .filter(|row| !row.is_suppressed)
            .ok_or(EngineError::RecordNotFound {
                entity: "obligation",
                id,
            })?;
        row.apply(patch, now);
        Ok(row.clone())
    }

    fn retire_obligation(&self, id: u64, now: DateTime<Utc>) -> EngineResult<Retirement> {
        let mut tables = self.tables.write();
        let row = tables
            .obligations
            .get_mut(&id)
            .ok_or(EngineError::RecordNotFound {
                entity: "obligation",
                id,
            })?;

        let retirement = row.retirement();
        match retirement {
            Retirement::Suppressed => row.suppress(now),
            Retirement::Removed => {
                tables.obligations.remove(&id);
            }
        }
        Ok(retirement)
    }

    fn recurring_rules(&self) -> EngineResult<Vec<RecurringRule>> {
        Ok(self.tables.read().recurring_rules.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, ObligationStatus, VacationStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: u64) -> Employee {
        Employee {
            id,
            display_name: format!("Employee {}", id),
            salary: Decimal::from(100_000),
            salary_type: Default::default(),
            hire_date: Some(date(2024, 1, 1)),
            end_date: None,
            is_active: true,
        }
    }

    fn seeded() -> InMemoryLedger {
        InMemoryLedger::from_snapshot(LedgerSnapshot {
            employees: vec![employee(1), employee(2)],
            bonuses: vec![
                BonusEntry {
                    id: 10,
                    employee_id: 1,
                    amount: Decimal::from(500),
                    kind: None,
                    date: date(2024, 3, 5),
                    comment: None,
                },
                BonusEntry {
                    id: 11,
                    employee_id: 2,
                    amount: Decimal::from(-100),
                    kind: None,
                    date: date(2024, 4, 5),
                    comment: None,
                },
            ],
            expense_categories: vec![ExpenseCategory {
                id: 20,
                name: "Ads".to_string(),
                is_marketing: true,
            }],
            frequency_types: vec![FrequencyType {
                id: 30,
                name: "monthly".to_string(),
                monthly_multiplier: Decimal::ONE,
            }],
            expenses: vec![
                ExpenseRecord {
                    id: 40,
                    name: "Banner".to_string(),
                    amount: Decimal::from(300),
                    category_id: Some(20),
                    frequency_id: Some(30),
                    is_active: true,
                    effective_from: None,
                    effective_to: None,
                },
                ExpenseRecord {
                    id: 41,
                    name: "Old".to_string(),
                    amount: Decimal::from(1),
                    category_id: Some(20),
                    frequency_id: None,
                    is_active: false,
                    effective_from: None,
                    effective_to: None,
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_ids_continue_after_seed() {
        let ledger = seeded();
        let row = ledger
            .insert_obligation(
                NewObligation::new("vat", "VAT", Decimal::ONE, "2024-03"),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(row.id, 42);
    }

    #[test]
    fn test_bonus_filters() {
        let ledger = seeded();
        let march = DateRange::month(MonthKey::parse("2024-03").unwrap());
        assert_eq!(ledger.bonuses_for_employee(1, march).unwrap().len(), 1);
        assert_eq!(ledger.bonuses_for_employee(2, march).unwrap().len(), 0);
        assert_eq!(ledger.bonuses_in(DateRange::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_active_expenses_only() {
        let ledger = seeded();
        let expenses = ledger.active_expenses().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, 40);
    }

    #[test]
    fn test_insert_bonus_requires_known_employee() {
        let ledger = seeded();
        let result = ledger.insert_bonus(NewBonus {
            employee_id: 99,
            amount: Decimal::from(10),
            kind: None,
            date: date(2024, 3, 1),
            comment: None,
        });
        assert!(matches!(result, Err(EngineError::InvalidField { .. })));
    }

    #[test]
    fn test_delete_missing_bonus_is_not_found() {
        let ledger = seeded();
        assert!(matches!(
            ledger.delete_bonus(999),
            Err(EngineError::RecordNotFound { entity: "bonus", id: 999 })
        ));
        assert!(ledger.delete_bonus(10).is_ok());
        assert!(ledger.delete_bonus(10).is_err());
    }

    #[test]
    fn test_vacation_lifecycle() {
        let ledger = seeded();
        let entry = ledger
            .insert_vacation(NewVacation {
                employee_id: 1,
                start_date: date(2024, 3, 11),
                end_date: date(2024, 3, 13),
                day_count: None,
                is_paid: false,
                paid_amount: Decimal::ZERO,
                status: VacationStatus::Planned,
            })
            .unwrap();
        assert_eq!(entry.day_count, 3);

        let updated = ledger
            .update_vacation(
                entry.id,
                VacationPatch {
                    end_date: Some(date(2024, 3, 22)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.day_count, 3);

        assert_eq!(ledger.vacations_for_employee(1).unwrap().len(), 1);
        ledger.delete_vacation(entry.id).unwrap();
        assert!(ledger.vacations_for_employee(1).unwrap().is_empty());
        assert!(ledger.update_vacation(entry.id, VacationPatch::default()).is_err());
    }

    #[test]
    fn test_delete_category_detaches_expenses() {
        let ledger = seeded();
        assert_eq!(ledger.delete_expense_category(20).unwrap(), 2);
        let snapshot = ledger.snapshot();
        assert!(snapshot.expense_categories.is_empty());
        assert_eq!(snapshot.expenses.len(), 2);
        assert!(snapshot.expenses.iter().all(|e| e.category_id.is_none()));
        assert!(ledger.delete_expense_category(20).is_err());
    }

    #[test]
    fn test_delete_frequency_detaches_expenses() {
        let ledger = seeded();
        assert_eq!(ledger.delete_frequency_type(30).unwrap(), 1);
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.expenses[0].frequency_id, None);
        assert_eq!(snapshot.expenses[0].category_id, Some(20));
    }

    #[test]
    fn test_retire_manual_obligation_removes_row() {
        let ledger = seeded();
        let row = ledger
            .insert_obligation(
                NewObligation::new("vat", "VAT", Decimal::from(100), "2024-03"),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(
            ledger.retire_obligation(row.id, Utc::now()).unwrap(),
            Retirement::Removed
        );
        assert!(ledger.obligation(row.id).unwrap().is_none());
        assert!(ledger.retire_obligation(row.id, Utc::now()).is_err());
    }

    #[test]
    fn test_retire_auto_obligation_suppresses_row() {
        let ledger = seeded();
        let row = ledger
            .insert_obligation(
                NewObligation::new("vat", "VAT", Decimal::from(100), "2024-03").with_rule(5),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(
            ledger.retire_obligation(row.id, Utc::now()).unwrap(),
            Retirement::Suppressed
        );
        let stored = ledger.obligation(row.id).unwrap().unwrap();
        assert!(stored.is_suppressed);
        assert_eq!(stored.amount, Decimal::ZERO);
        assert_eq!(stored.status, ObligationStatus::Deleted);

        assert_eq!(
            ledger.retire_obligation(row.id, Utc::now()).unwrap(),
            Retirement::Suppressed
        );
        assert_eq!(ledger.obligation(row.id).unwrap().unwrap(), stored);
    }

    #[test]
    fn test_update_suppressed_obligation_is_not_found() {
        let ledger = seeded();
        let row = ledger
            .insert_obligation(
                NewObligation::new("vat", "VAT", Decimal::from(100), "2024-03").with_rule(5),
                Utc::now(),
            )
            .unwrap();
        ledger.retire_obligation(row.id, Utc::now()).unwrap();
        let result = ledger.update_obligation(
            row.id,
            ObligationPatch {
                amount: Some(Decimal::from(7)),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(matches!(result, Err(EngineError::RecordNotFound { .. })));
    }

    #[test]
    fn test_generated_obligation_respects_occupied_slot() {
        let ledger = seeded();
        let new = NewObligation::new("vat", "VAT", Decimal::from(100), "2024-03").with_rule(5);
        let first = ledger
            .insert_generated_obligation(new.clone(), Utc::now())
            .unwrap();
        assert!(first.is_some());
        assert!(
            ledger
                .insert_generated_obligation(new, Utc::now())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_generated_obligation_requires_rule() {
        let ledger = seeded();
        let result = ledger.insert_generated_obligation(
            NewObligation::new("vat", "VAT", Decimal::from(100), "2024-03"),
            Utc::now(),
        );
        assert!(result.is_err());
    }
}
