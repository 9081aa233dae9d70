//! Configuration loading and management for the reconciliation engine.
//!
//! This module loads the engine settings (server bind address, payroll
//! arithmetic policy) and the ledger seed snapshot from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use reconciliation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Binding to {}", config.server().bind);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, LedgerSection, PayrollPolicy, ServerConfig};
