//! Calculation logic for the reconciliation engine.
//!
//! This module contains the earnings and payroll computations: monthly
//! earnings with vacation proration, lifetime accumulation since hire, and
//! the company-wide payroll and expense summary. Each computation comes in a
//! pure form over already-fetched rows and a store-driven form.

mod adjustments;
mod lifetime;
mod monthly_earnings;
mod payroll_summary;
mod rounding;

pub use adjustments::{BonusTotals, VacationTotals};
pub use lifetime::{compute_lifetime, months_worked};
pub use monthly_earnings::{compute_monthly, earnings_report};
pub use payroll_summary::{payroll_summary, summarize_payroll};
pub use rounding::round_money;
