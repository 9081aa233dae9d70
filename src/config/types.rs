//! Configuration types for the reconciliation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `engine.yaml`.

use rust_decimal::Decimal;
use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Arithmetic policy shared by the earnings and payroll computations.
///
/// # Example
///
/// ```
/// use reconciliation_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayrollPolicy::default();
/// assert_eq!(policy.working_days_per_month, 22);
/// assert_eq!(policy.unpaid_deduction(Decimal::from(220_000), 3), Decimal::from(30_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PayrollPolicy {
    /// Assumed working days in every month; the salary share of one day.
    #[serde(default = "default_working_days")]
    pub working_days_per_month: u32,
    /// Decimal places money is rounded to.
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            working_days_per_month: default_working_days(),
            scale: default_scale(),
        }
    }
}

impl PayrollPolicy {
    /// `salary × days ÷ working days`, unrounded.
    ///
    /// Multiplies before dividing so the quotient is only truncated once.
    pub fn unpaid_deduction(&self, salary: Decimal, days: u32) -> Decimal {
        if self.working_days_per_month == 0 {
            return Decimal::ZERO;
        }
        salary * Decimal::from(days) / Decimal::from(self.working_days_per_month)
    }
}

fn default_working_days() -> u32 {
    22
}

fn default_scale() -> u32 {
    2
}

/// Where the in-memory ledger gets its initial rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerSection {
    /// Seed snapshot file, relative to the configuration directory.
    #[serde(default)]
    pub seed: Option<String>,
}

/// The contents of `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Arithmetic policy.
    #[serde(default)]
    pub payroll: PayrollPolicy,
    /// Ledger seeding.
    #[serde(default)]
    pub ledger: LedgerSection,
}
