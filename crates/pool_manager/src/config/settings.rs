//! Pool settings
//!
//! Tunables for the pool manager, loaded once at session start.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::foundation::math::{far_away_location, Vec3};

/// Number of objects to construct up front for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrespawnEntry {
    /// Class name, as registered with the pool manager
    pub class: String,
    /// How many inactive objects to build
    pub count: usize,
}

/// Settings for a [`PoolManager`](crate::pool::PoolManager) session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Fallback log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Park returned actors at `return_location` in addition to hiding them
    pub relocate_on_return: bool,
    /// Where returned actors are parked
    pub return_location: [f32; 3],
    /// Warn once when a single pool grows past this many objects (0 = never)
    pub capacity_warning: usize,
    /// Warm-up counts applied right after the session starts
    pub prespawn: Vec<PrespawnEntry>,
}

impl PoolSettings {
    /// Return location as a vector
    pub fn return_location(&self) -> Vec3 {
        Vec3::from(self.return_location)
    }

    /// Set the return location
    pub fn with_return_location(mut self, location: Vec3) -> Self {
        self.return_location = [location.x, location.y, location.z];
        self
    }

    /// Enable or disable relocation of returned actors
    pub fn with_relocation(mut self, enabled: bool) -> Self {
        self.relocate_on_return = enabled;
        self
    }

    /// Set the capacity warning threshold
    pub fn with_capacity_warning(mut self, threshold: usize) -> Self {
        self.capacity_warning = threshold;
        self
    }

    /// Add a warm-up entry
    pub fn with_prespawn(mut self, class: impl Into<String>, count: usize) -> Self {
        self.prespawn.push(PrespawnEntry { class: class.into(), count });
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }

        if self.return_location.iter().any(|axis| !axis.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "return location must be finite, got {:?}",
                self.return_location
            )));
        }

        if let Some(entry) = self.prespawn.iter().find(|entry| entry.class.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "prespawn entry with count {} has no class name",
                entry.count
            )));
        }

        Ok(())
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        let location = far_away_location();
        Self {
            log_level: "info".to_string(),
            relocate_on_return: true,
            return_location: [location.x, location.y, location.z],
            capacity_warning: 256,
            prespawn: Vec::new(),
        }
    }
}

impl Config for PoolSettings {}
