//! Health data readings consumed from an external source

use std::sync::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Latest biometric values reported by the health data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    /// Beats per minute
    pub heart_rate: f64,
    /// Kilocalories burned during the active workout
    pub active_calories: f64,
    #[serde(default)]
    pub workout_active: bool,
}

/// Read-only view of a health data provider
pub trait HealthSource: Send + Sync {
    fn latest(&self) -> HealthReading;
}

/// Holds whatever reading was last pushed by a companion device
#[derive(Debug, Default)]
pub struct SharedHealthSource {
    reading: Mutex<HealthReading>,
}

impl SharedHealthSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, reading: HealthReading) -> Result<(), String> {
        let mut current = self.reading.lock()
            .map_err(|e| format!("Failed to lock health reading: {}", e))?;
        debug!("Health reading: hr={} kcal={}", reading.heart_rate, reading.active_calories);
        *current = reading;
        Ok(())
    }
}

impl HealthSource for SharedHealthSource {
    fn latest(&self) -> HealthReading {
        self.reading.lock().map(|r| *r).unwrap_or_default()
    }
}
