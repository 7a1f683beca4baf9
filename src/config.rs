//! Configuration for the live serial view.
//!
//! Defaults match the usual USB-UART EKG front end. A JSON file may override
//! any subset of fields; the CLI applies its flags on top.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rolling::DEFAULT_CAPACITY;
use crate::sink::DEFAULT_CHANNEL_CAPACITY;

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Upper bound for `capacity` and `channel_capacity`; both are allocated up front.
pub const MAX_CAPACITY: usize = 10_000_000;

/// Settings for `ekg-live`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Serial device path.
    pub port: String,
    pub baud_rate: u32,
    /// Serial read timeout in milliseconds.
    pub timeout_ms: u64,
    /// Samples kept in the rolling window.
    pub capacity: usize,
    /// Bounded channel size between the serial thread and the UI.
    pub channel_capacity: usize,
    /// Fixed Y axis range of the live chart.
    pub y_min: f64,
    pub y_max: f64,
    /// Redraw period in milliseconds.
    pub refresh_ms: u64,
    pub title: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: 1000,
            capacity: DEFAULT_CAPACITY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            y_min: -10.0,
            y_max: 1100.0,
            refresh_ms: 1,
            title: "Realtime EKG/ADC".to_string(),
        }
    }
}

impl LiveConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Check the values that would otherwise fail later in a less obvious place.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(Error::Config(format!("capacity must be between 1 and {MAX_CAPACITY}")));
        }
        if !(1..=MAX_CAPACITY).contains(&self.channel_capacity) {
            return Err(Error::Config(format!(
                "channel_capacity must be between 1 and {MAX_CAPACITY}"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be at least 1".into()));
        }
        if !(self.y_min < self.y_max) {
            return Err(Error::Config(format!(
                "y_min ({}) must be below y_max ({})",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Config(format!("JSON parse error: {e}")))
    }

    /// Load from a JSON file. Fields absent from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let cfg = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), "loaded live config");
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
