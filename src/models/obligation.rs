//! Obligation rows and the recurring rules that generate them.
//!
//! An obligation row created from a [`RecurringRule`] carries the rule's
//! identifier. Deleting such a row suppresses it instead of removing it, so
//! the regenerator sees that the (rule, period) slot is taken and never
//! recreates it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthKey;
use super::employee::default_active;
use crate::error::{EngineError, EngineResult};

/// Settlement status of an obligation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    /// Not yet settled.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Past its due date and unsettled.
    Overdue,
    /// Logically deleted (suppressed auto row).
    Deleted,
}

/// What deleting a row amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retirement {
    /// The row is kept with zero amount and blocks regeneration.
    Suppressed,
    /// The row is removed from the store.
    Removed,
}

/// A stored obligation (tax payment or similar liability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationRow {
    /// Unique identifier.
    pub id: u64,
    /// Obligation type tag (e.g. "income_tax", "vat").
    #[serde(rename = "type")]
    pub obligation_type: String,
    /// Display name.
    pub name: String,
    /// Amount due.
    pub amount: Decimal,
    /// Opaque billing period key.
    pub period: String,
    /// When the obligation falls due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// When the obligation was (or is to be) settled.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Settlement status.
    #[serde(default)]
    pub status: ObligationStatus,
    /// Tax rate metadata.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Taxable base metadata.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Whether a recurring rule produced the row.
    #[serde(default)]
    pub is_auto: bool,
    /// The producing rule, if any.
    #[serde(default)]
    pub rule_id: Option<u64>,
    /// Set once an auto row has been deleted.
    #[serde(default)]
    pub is_suppressed: bool,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ObligationRow {
    /// Decides how a delete request applies to this row.
    pub fn retirement(&self) -> Retirement {
        if self.rule_id.is_some() {
            Retirement::Suppressed
        } else {
            Retirement::Removed
        }
    }

    /// Marks the row suppressed: zero amount, deleted status.
    ///
    /// Suppressing an already-suppressed row changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::models::{NewObligation, ObligationStatus};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    ///
    /// let mut row = NewObligation::new("vat", "VAT", Decimal::from(1200), "2024-05")
    ///     .with_rule(3)
    ///     .into_row(1, Utc::now())
    ///     .unwrap();
    /// row.suppress(Utc::now());
    /// assert!(row.is_suppressed);
    /// assert_eq!(row.amount, Decimal::ZERO);
    /// assert_eq!(row.status, ObligationStatus::Deleted);
    /// ```
    pub fn suppress(&mut self, now: DateTime<Utc>) {
        if self.is_suppressed {
            return;
        }
        self.is_suppressed = true;
        self.amount = Decimal::ZERO;
        self.status = ObligationStatus::Deleted;
        self.updated_at = now;
    }

    /// Applies a partial edit and refreshes the update timestamp.
    pub fn apply(&mut self, patch: ObligationPatch, now: DateTime<Utc>) {
        if let Some(obligation_type) = patch.obligation_type {
            self.obligation_type = obligation_type;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(payment_date) = patch.payment_date {
            self.payment_date = Some(payment_date);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(rate) = patch.rate {
            self.rate = Some(rate);
        }
        if let Some(base_amount) = patch.base_amount {
            self.base_amount = Some(base_amount);
        }
        self.updated_at = now;
    }

    /// Returns true if this row occupies the (rule, period) slot.
    pub fn occupies(&self, rule_id: u64, period: &str) -> bool {
        self.rule_id == Some(rule_id) && self.period == period
    }
}

/// The fields needed to create an obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObligation {
    /// Obligation type tag.
    #[serde(rename = "type")]
    pub obligation_type: String,
    /// Display name.
    pub name: String,
    /// Amount due.
    pub amount: Decimal,
    /// Opaque billing period key.
    pub period: String,
    /// When the obligation falls due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Settlement date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Initial status.
    #[serde(default)]
    pub status: ObligationStatus,
    /// Tax rate metadata.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Taxable base metadata.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Whether a recurring rule produced the row.
    #[serde(default)]
    pub is_auto: bool,
    /// The producing rule, if any.
    #[serde(default)]
    pub rule_id: Option<u64>,
}

impl NewObligation {
    /// A manual, pending obligation with no dates or metadata.
    pub fn new(
        obligation_type: impl Into<String>,
        name: impl Into<String>,
        amount: Decimal,
        period: impl Into<String>,
    ) -> Self {
        Self {
            obligation_type: obligation_type.into(),
            name: name.into(),
            amount,
            period: period.into(),
            due_date: None,
            payment_date: None,
            status: ObligationStatus::Pending,
            rate: None,
            base_amount: None,
            is_auto: false,
            rule_id: None,
        }
    }

    /// Marks the obligation as produced by the given rule.
    pub fn with_rule(mut self, rule_id: u64) -> Self {
        self.is_auto = true;
        self.rule_id = Some(rule_id);
        self
    }

    /// Sets the settlement date.
    pub fn with_payment_date(mut self, payment_date: NaiveDate) -> Self {
        self.payment_date = Some(payment_date);
        self
    }

    /// Validates the request and materializes the stored row, never suppressed.
    pub fn into_row(self, id: u64, now: DateTime<Utc>) -> EngineResult<ObligationRow> {
        if self.obligation_type.trim().is_empty() {
            return Err(EngineError::invalid_field("type", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_field("name", "must not be empty"));
        }
        if self.status == ObligationStatus::Deleted {
            return Err(EngineError::invalid_field(
                "status",
                "new obligations cannot start deleted",
            ));
        }

        Ok(ObligationRow {
            id,
            obligation_type: self.obligation_type,
            name: self.name,
            amount: self.amount,
            period: self.period,
            due_date: self.due_date,
            payment_date: self.payment_date,
            status: self.status,
            rate: self.rate,
            base_amount: self.base_amount,
            is_auto: self.is_auto,
            rule_id: self.rule_id,
            is_suppressed: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A partial edit of an obligation.
///
/// The auto flag, rule reference and suppression flag are fixed at creation
/// and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObligationPatch {
    /// New type tag.
    #[serde(default, rename = "type")]
    pub obligation_type: Option<String>,
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// New period key.
    #[serde(default)]
    pub period: Option<String>,
    /// New due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// New settlement date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// New status.
    #[serde(default)]
    pub status: Option<ObligationStatus>,
    /// New tax rate.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// New taxable base.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
}

/// A template the regenerator instantiates once per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    /// Unique identifier.
    pub id: u64,
    /// Type tag given to generated rows.
    #[serde(rename = "type")]
    pub obligation_type: String,
    /// Display name given to generated rows.
    pub name: String,
    /// Amount of each generated row.
    pub amount: Decimal,
    /// Tax rate metadata.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Taxable base metadata.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Day of the month the generated row falls due, clamped to the month length.
    pub due_day: u32,
    /// Inactive rules generate nothing.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl RecurringRule {
    /// The obligation this rule produces for `period`.
    pub fn instantiate(&self, period: MonthKey) -> NewObligation {
        NewObligation {
            obligation_type: self.obligation_type.clone(),
            name: self.name.clone(),
            amount: self.amount,
            period: period.to_string(),
            due_date: Some(period.day_clamped(self.due_day)),
            payment_date: None,
            status: ObligationStatus::Pending,
            rate: self.rate,
            base_amount: self.base_amount,
            is_auto: true,
            rule_id: Some(self.id),
        }
    }
}
