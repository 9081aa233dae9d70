//! The obligation ledger.
//!
//! Wraps a [`LedgerStore`] with the obligation lifecycle: create, partial
//! update, delete-as-suppression for rule-generated rows, the active list,
//! and regeneration of rows from recurring rules.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::store::LedgerStore;
use crate::error::EngineResult;
use crate::models::{MonthKey, NewObligation, ObligationPatch, ObligationRow, Retirement};

/// Obligation operations over a shared store.
#[derive(Clone)]
pub struct ObligationLedger {
    store: Arc<dyn LedgerStore>,
}

impl ObligationLedger {
    /// Creates a ledger over `store`.
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Stores a new obligation, active and unsuppressed.
    pub fn create(&self, new: NewObligation) -> EngineResult<ObligationRow> {
        let row = self.store.insert_obligation(new, Utc::now())?;
        info!(
            obligation_id = row.id,
            rule_id = ?row.rule_id,
            period = %row.period,
            "Obligation created"
        );
        Ok(row)
    }

    /// Applies a partial edit; the update timestamp is always refreshed.
    pub fn update(&self, id: u64, patch: ObligationPatch) -> EngineResult<ObligationRow> {
        let row = self.store.update_obligation(id, patch, Utc::now())?;
        info!(obligation_id = id, "Obligation updated");
        Ok(row)
    }

    /// Deletes an obligation.
    ///
    /// Rows carrying a rule reference are suppressed (kept with zero amount
    /// and `deleted` status) so regeneration cannot bring them back; manual
    /// rows are removed. Deleting a suppressed row again is a no-op.
    pub fn delete(&self, id: u64) -> EngineResult<Retirement> {
        let retirement = self.store.retire_obligation(id, Utc::now())?;
        info!(obligation_id = id, retirement = ?retirement, "Obligation deleted");
        Ok(retirement)
    }

    /// Every obligation that is not suppressed, newest payment date first,
    /// then highest identifier first. Rows without a payment date come last.
    pub fn list(&self) -> EngineResult<Vec<ObligationRow>> {
        let mut rows: Vec<ObligationRow> = self
            .store
            .obligations()?
            .into_iter()
            .filter(|row| !row.is_suppressed)
            .collect();
        rows.sort_by_key(|row| (Reverse(row.payment_date), Reverse(row.id)));
        Ok(rows)
    }

    /// Creates this period's row for every active recurring rule whose
    /// (rule, period) slot is still free. Suppressed rows keep their slot.
    ///
    /// Returns the rows created.
    pub fn regenerate(&self, period: MonthKey) -> EngineResult<Vec<ObligationRow>> {
        let now = Utc::now();
        let mut created = Vec::new();

        for rule in self.store.recurring_rules()? {
            if !rule.is_active {
                continue;
            }
            match self
                .store
                .insert_generated_obligation(rule.instantiate(period), now)?
            {
                Some(row) => created.push(row),
                None => debug!(rule_id = rule.id, period = %period, "Slot occupied, skipping"),
            }
        }

        info!(period = %period, created = created.len(), "Obligations regenerated");
        Ok(created)
    }
}
