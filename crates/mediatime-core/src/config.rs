//! Converter configuration.
//!
//! Replaces a process-wide "current framerate" with a value that is passed to
//! [`TimebaseConverter::new`](crate::TimebaseConverter::new). Stored as JSON:
//!
//! ```text
//! { "default_rate": 23.976, "mode": "legacy" }
//! { "default_rate": { "rate": 30000, "scale": 1001 }, "mode": "exact" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, TimebaseError};
use crate::timebase::{normalize, ConversionMode, RateSpec};

/// Settings for a [`TimebaseConverter`](crate::TimebaseConverter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimebaseConfig {
    /// Rate used when a conversion is called without one.
    pub default_rate: Option<RateSpec>,
    /// Formula set applied by every conversion.
    pub mode: ConversionMode,
}

impl TimebaseConfig {
    /// Check that the default rate, if any, normalizes.
    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.default_rate {
            let rational = normalize(rate)
                .map_err(|e| TimebaseError::Config(format!("default_rate: {}", e)))?;
            if rational.is_degenerate() {
                return Err(TimebaseError::Config(format!(
                    "default_rate: degenerate rate {}",
                    rational
                )));
            }
        }
        Ok(())
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| TimebaseError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Deserialize from JSON bytes and validate.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| TimebaseError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        debug!(default_rate = ?config.default_rate, mode = ?config.mode, "Parsed timebase config");
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "Loading timebase config");
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Save configuration to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        info!(path = %path.display(), "Saved timebase config");
        Ok(())
    }
}
