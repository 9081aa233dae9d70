//! Application state for the reconciliation engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollPolicy};
use crate::ledger::{LedgerStore, ObligationLedger};

/// Shared application state.
///
/// Holds the loaded configuration and the ledger store. Nothing here is
/// per-request; the caller's identity travels with each request as a
/// [`Principal`](super::Principal).
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The ledger every computation reads.
    store: Arc<dyn LedgerStore>,
    /// Obligation lifecycle over the same store.
    obligations: ObligationLedger,
}

impl AppState {
    /// Creates a new application state over `store`.
    pub fn new(config: ConfigLoader, store: Arc<dyn LedgerStore>) -> Self {
        Self {
            config: Arc::new(config),
            obligations: ObligationLedger::new(Arc::clone(&store)),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payroll arithmetic policy.
    pub fn policy(&self) -> PayrollPolicy {
        self.config.policy()
    }

    /// Returns the ledger store.
    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    /// Returns the obligation ledger.
    pub fn obligations(&self) -> &ObligationLedger {
        &self.obligations
    }
}
