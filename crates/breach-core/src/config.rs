//! TOML-driven engine settings.
//!
//! `BreachSettings` is the stock `SettingsProvider`. Every key is optional;
//! a missing key takes its default.
//!
//! ```toml
//! ttl_hours = 6.0            # 0 = permanent
//! lockout_minutes = 10.0
//! lockout_enabled = true
//! lockout_radius = 50.0
//! unlock_radius = 50.0
//! scan_radius = 50.0
//! auto_reward_granting = false
//! radial_unlock_enabled = true
//! spatial_scan_enabled = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use breach_contracts::error::{BreachError, BreachResult};

use crate::traits::SettingsProvider;

pub const DEFAULT_RADIUS: f64 = 50.0;
pub const DEFAULT_LOCKOUT_MINUTES: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachSettings {
    pub ttl_hours: f64,
    pub lockout_minutes: f64,
    pub lockout_enabled: bool,
    pub lockout_radius: f64,
    pub unlock_radius: f64,
    pub scan_radius: f64,
    pub auto_reward_granting: bool,
    pub radial_unlock_enabled: bool,
    pub spatial_scan_enabled: bool,
}

impl Default for BreachSettings {
    fn default() -> Self {
        Self {
            ttl_hours: 0.0,
            lockout_minutes: DEFAULT_LOCKOUT_MINUTES,
            lockout_enabled: true,
            lockout_radius: DEFAULT_RADIUS,
            unlock_radius: DEFAULT_RADIUS,
            scan_radius: DEFAULT_RADIUS,
            auto_reward_granting: false,
            radial_unlock_enabled: true,
            spatial_scan_enabled: true,
        }
    }
}

impl BreachSettings {
    /// Parse `s` as TOML settings.
    ///
    /// Returns `BreachError::ConfigError` if the TOML is malformed or a value
    /// is out of range (negative durations or radii).
    pub fn from_toml_str(s: &str) -> BreachResult<Self> {
        let settings: BreachSettings = toml::from_str(s).map_err(|e| BreachError::ConfigError {
            reason: format!("failed to parse settings TOML: {}", e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read the file at `path` and parse it as TOML settings.
    pub fn from_file(path: &Path) -> BreachResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BreachError::ConfigError {
            reason: format!("failed to read settings file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> BreachResult<()> {
        let checks = [
            ("ttl_hours", self.ttl_hours),
            ("lockout_minutes", self.lockout_minutes),
            ("lockout_radius", self.lockout_radius),
            ("unlock_radius", self.unlock_radius),
            ("scan_radius", self.scan_radius),
        ];
        for (key, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(BreachError::ConfigError {
                    reason: format!("'{}' must be a non-negative number, got {}", key, value),
                });
            }
        }
        Ok(())
    }

    pub fn with_ttl_hours(mut self, ttl_hours: f64) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }

    pub fn with_lockout_minutes(mut self, minutes: f64) -> Self {
        self.lockout_minutes = minutes;
        self
    }

    pub fn with_auto_rewards(mut self, enabled: bool) -> Self {
        self.auto_reward_granting = enabled;
        self
    }

    pub fn with_spatial_scan(mut self, enabled: bool) -> Self {
        self.spatial_scan_enabled = enabled;
        self
    }
}

impl SettingsProvider for BreachSettings {
    fn ttl_hours(&self) -> f64 {
        self.ttl_hours
    }
    fn lockout_minutes(&self) -> f64 {
        self.lockout_minutes
    }
    fn lockout_enabled(&self) -> bool {
        self.lockout_enabled
    }
    fn lockout_radius(&self) -> f64 {
        self.lockout_radius
    }
    fn unlock_radius(&self) -> f64 {
        self.unlock_radius
    }
    fn scan_radius(&self) -> f64 {
        self.scan_radius
    }
    fn auto_reward_granting(&self) -> bool {
        self.auto_reward_granting
    }
    fn radial_unlock_enabled(&self) -> bool {
        self.radial_unlock_enabled
    }
    fn spatial_scan_enabled(&self) -> bool {
        self.spatial_scan_enabled
    }
}
