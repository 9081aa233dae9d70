//! Bonus and penalty entries.
//!
//! A [`BonusEntry`] is a one-off signed adjustment to an employee's pay. The
//! optional [`BonusKind`] tag decides the direction; untagged entries fall
//! back to the sign of the amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Whether an entry rewards or penalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Adds to pay.
    Bonus,
    /// Subtracts from pay.
    Penalty,
}

/// A stored bonus or penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    /// Unique identifier.
    pub id: u64,
    /// The employee the entry belongs to.
    pub employee_id: u64,
    /// The amount as entered; its sign only matters when `kind` is absent.
    pub amount: Decimal,
    /// Explicit direction, if the entry was tagged.
    #[serde(default)]
    pub kind: Option<BonusKind>,
    /// The day the entry applies to.
    pub date: NaiveDate,
    /// Free-form note.
    #[serde(default)]
    pub comment: Option<String>,
}

impl BonusEntry {
    /// The direction of the entry after applying the untagged fallback.
    pub fn effective_kind(&self) -> BonusKind {
        match self.kind {
            Some(kind) => kind,
            None if self.amount < Decimal::ZERO => BonusKind::Penalty,
            None => BonusKind::Bonus,
        }
    }

    /// The entry's contribution to pay: positive for bonuses, negative for penalties.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconciliation_engine::models::{BonusEntry, BonusKind};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = BonusEntry {
    ///     id: 1,
    ///     employee_id: 7,
    ///     amount: Decimal::from(5000),
    ///     kind: Some(BonusKind::Penalty),
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
    ///     comment: None,
    /// };
    /// assert_eq!(entry.signed_amount(), Decimal::from(-5000));
    /// ```
    pub fn signed_amount(&self) -> Decimal {
        match self.effective_kind() {
            BonusKind::Bonus => self.amount.abs(),
            BonusKind::Penalty => -self.amount.abs(),
        }
    }
}

/// The fields needed to record a new bonus or penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBonus {
    /// The employee the entry belongs to.
    pub employee_id: u64,
    /// Signed amount.
    pub amount: Decimal,
    /// Optional explicit direction.
    #[serde(default)]
    pub kind: Option<BonusKind>,
    /// The day the entry applies to.
    pub date: NaiveDate,
    /// Free-form note.
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewBonus {
    /// Rejects entries that cannot affect pay or lack an owner.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id == 0 {
            return Err(EngineError::invalid_field(
                "employee_id",
                "an employee identifier is required",
            ));
        }
        if self.amount.is_zero() {
            return Err(EngineError::invalid_field("amount", "must not be zero"));
        }
        Ok(())
    }

    /// Materializes the stored row under the given identifier.
    pub fn into_entry(self, id: u64) -> BonusEntry {
        BonusEntry {
            id,
            employee_id: self.employee_id,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
            comment: self.comment,
        }
    }
}
