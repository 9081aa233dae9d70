//! Financial Reconciliation Engine
//!
//! This crate turns raw ledger rows (salaries, bonuses and penalties,
//! vacations, category-tagged expenses and recurring obligations) into
//! monthly and lifetime compensation figures and company-wide payroll
//! summaries, and keeps auto-generated obligation rows consistent across
//! edits and deletions.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
