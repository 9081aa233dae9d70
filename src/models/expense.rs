//! Expense records and their lookup dimensions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::default_active;

/// A lookup dimension grouping expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Expenses in a marketing category roll up separately from commercial ones.
    #[serde(default)]
    pub is_marketing: bool,
}

/// How often an expense recurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyType {
    /// Unique identifier.
    pub id: u64,
    /// Display name (e.g. "monthly", "quarterly").
    pub name: String,
    /// Factor converting one occurrence into a monthly figure.
    #[serde(default = "default_multiplier")]
    pub monthly_multiplier: Decimal,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

/// A company expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Category reference; null once the category is deleted.
    #[serde(default)]
    pub category_id: Option<u64>,
    /// Frequency reference; null once the frequency type is deleted.
    #[serde(default)]
    pub frequency_id: Option<u64>,
    /// Inactive records are ignored by the summaries.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// First day the expense applies.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Last day the expense applies.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl ExpenseRecord {
    /// Clears the category reference if it points at `category_id`.
    ///
    /// Returns true if the record changed.
    pub fn detach_category(&mut self, category_id: u64) -> bool {
        if self.category_id == Some(category_id) {
            self.category_id = None;
            true
        } else {
            false
        }
    }

    /// Clears the frequency reference if it points at `frequency_id`.
    ///
    /// Returns true if the record changed.
    pub fn detach_frequency(&mut self, frequency_id: u64) -> bool {
        if self.frequency_id == Some(frequency_id) {
            self.frequency_id = None;
            true
        } else {
            false
        }
    }
}
