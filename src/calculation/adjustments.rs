//! Bonus and vacation totals.
//!
//! These accumulators are shared by the monthly, lifetime and payroll
//! computations; each caller decides which rows belong to its window before
//! folding them in.

use rust_decimal::Decimal;

use crate::models::{BonusEntry, BonusKind, VacationEntry, VacationStatus};

/// Bonus and penalty sums over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusTotals {
    /// Sum of bonus contributions.
    pub bonuses: Decimal,
    /// Sum of penalty magnitudes (non-negative).
    pub penalties: Decimal,
}

impl BonusTotals {
    /// Folds entries into totals, classifying each by its effective kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::calculation::BonusTotals;
    /// use reconciliation_engine::models::BonusEntry;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let entries = [
    ///     BonusEntry { id: 1, employee_id: 1, amount: Decimal::from(5000), kind: None, date: day, comment: None },
    ///     BonusEntry { id: 2, employee_id: 1, amount: Decimal::from(-2000), kind: None, date: day, comment: None },
    /// ];
    /// let totals = BonusTotals::from_entries(&entries);
    /// assert_eq!(totals.net(), Decimal::from(3000));
    /// ```
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a BonusEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut totals, entry| {
                let amount = entry.signed_amount();
                match entry.effective_kind() {
                    BonusKind::Bonus => totals.bonuses += amount,
                    BonusKind::Penalty => totals.penalties -= amount,
                }
                totals
            })
    }

    /// Bonuses minus penalties.
    pub fn net(&self) -> Decimal {
        self.bonuses - self.penalties
    }

    /// Penalties as a negative figure.
    pub fn fines(&self) -> Decimal {
        -self.penalties
    }
}

/// Vacation sums over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacationTotals {
    /// Days of paid vacation.
    pub paid_days: u32,
    /// Days of unpaid vacation.
    pub unpaid_days: u32,
    /// Amount paid for paid vacations.
    pub paid_amount: Decimal,
}

impl VacationTotals {
    /// Folds entries into totals. Cancelled vacations are skipped.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a VacationEntry>) -> Self {
        entries
            .into_iter()
            .filter(|entry| entry.status != VacationStatus::Cancelled)
            .fold(Self::default(), |mut totals, entry| {
                if entry.is_paid {
                    totals.paid_days = totals.paid_days.saturating_add(entry.day_count);
                    totals.paid_amount += entry.effective_paid_amount();
                } else {
                    totals.unpaid_days = totals.unpaid_days.saturating_add(entry.day_count);
                }
                totals
            })
    }

    /// Paid plus unpaid days.
    pub fn total_days(&self) -> u32 {
        self.paid_days.saturating_add(self.unpaid_days)
    }
}
