//! Candidate catalog configuration.
//!
//! The candidate catalog is the full list of entries a breach could ever
//! offer, before any filtering. It is declared in TOML so hosts can add hub
//! programs and rewards without touching the pipeline.
//!
//! Example:
//! ```toml
//! [[entries]]
//! id = "unlock-basic"
//! capability = "basic"
//!
//! [[entries]]
//! id = "network-blackout"
//! capability = "basic"
//! category = "hub-only"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use breach_contracts::{
    capability::{CapabilityClass, CatalogEntry},
    error::{BreachError, BreachResult},
};

/// The top-level structure deserialized from a TOML catalog file.
///
/// Entry order is preserved through the pipeline: the offered list is always
/// a subsequence of `entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub entries: Vec<CatalogEntry>,
}

impl CatalogConfig {
    /// The built-in catalog: one unlock entry per capability class.
    pub fn standard() -> Self {
        Self {
            entries: CapabilityClass::ALL.into_iter().map(CatalogEntry::unlock).collect(),
        }
    }

    /// Parse `s` as a TOML catalog.
    ///
    /// Returns `BreachError::ConfigError` for malformed TOML, an empty id,
    /// or a duplicated id.
    pub fn from_toml_str(s: &str) -> BreachResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| BreachError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> BreachResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BreachError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> BreachResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id.trim().is_empty() {
                return Err(BreachError::ConfigError {
                    reason: format!("catalog entry for '{}' has an empty id", entry.capability),
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(BreachError::ConfigError {
                    reason: format!("duplicate catalog entry id '{}'", entry.id),
                });
            }
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::standard()
    }
}
