//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration and the ledger seed snapshot from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::ledger::LedgerSnapshot;

use super::types::{EngineConfig, PayrollPolicy, ServerConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml   # Server, payroll policy and seed location
/// └── ledger.yaml   # Initial ledger rows (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use reconciliation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Working days per month: {}", loader.policy().working_days_per_month);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    config: EngineConfig,
    seed: LedgerSnapshot,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `engine.yaml` is required. The seed file named by `ledger.seed` is
    /// resolved against the directory; without one the ledger starts empty.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `engine.yaml` or the named seed
    ///   file is missing
    /// - [`EngineError::ConfigParseError`] if a file is not valid YAML for its
    ///   shape, or the payroll policy has zero working days
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let root = path.as_ref().to_path_buf();

        let engine_path = root.join("engine.yaml");
        let config = Self::load_yaml::<EngineConfig>(&engine_path)?;

        if config.payroll.working_days_per_month == 0 {
            return Err(EngineError::ConfigParseError {
                path: engine_path.display().to_string(),
                message: "payroll.working_days_per_month must be positive".to_string(),
            });
        }

        let seed = match &config.ledger.seed {
            Some(file) => Self::load_yaml::<LedgerSnapshot>(&root.join(file))?,
            None => LedgerSnapshot::default(),
        };

        Ok(Self { root, config, seed })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// The directory the configuration was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the parsed `engine.yaml`.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the payroll arithmetic policy.
    pub fn policy(&self) -> PayrollPolicy {
        self.config.payroll
    }

    /// Returns the ledger rows to seed the store with.
    pub fn seed(&self) -> &LedgerSnapshot {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("recon-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_default_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), PayrollPolicy::default());
        assert_eq!(loader.server().bind, "127.0.0.1:8080");
        assert!(!loader.seed().employees.is_empty());
        assert!(!loader.seed().recurring_rules.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_seed_file_returns_error() {
        let dir = scratch_dir();
        fs::write(dir.join("engine.yaml"), "ledger:\n  seed: absent.yaml\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("absent.yaml")),
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_seed_starts_empty() {
        let dir = scratch_dir();
        fs::write(dir.join("engine.yaml"), "server:\n  bind: 0.0.0.0:9000\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.server().bind, "0.0.0.0:9000");
        assert!(loader.seed().employees.is_empty());
        assert_eq!(loader.root(), dir.as_path());
    }

    #[test]
    fn test_zero_working_days_rejected() {
        let dir = scratch_dir();
        fs::write(
            dir.join("engine.yaml"),
            "payroll:\n  working_days_per_month: 0\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("working_days_per_month"));
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir();
        fs::write(dir.join("engine.yaml"), "payroll: [not, a, map]\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
    }
}
