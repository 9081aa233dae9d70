//! Ledger storage and the obligation lifecycle.
//!
//! This module provides the [`LedgerStore`] row interface the computations
//! read through, an in-memory implementation seeded from a YAML snapshot, and
//! the [`ObligationLedger`] that manages recurring obligations.

mod memory;
mod obligations;
mod store;

pub use memory::{InMemoryLedger, LedgerSnapshot};
pub use obligations::ObligationLedger;
pub use store::{DateRange, LedgerStore};
