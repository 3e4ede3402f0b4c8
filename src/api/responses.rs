//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::HealthReading,
    state::{TimerProfile, TimerSnapshot},
    theme::PersistedTheme,
};

/// Response for timer actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    /// Build a response whose status mirrors the run flag
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        let status = if timer.state.is_running { "running" } else { "paused" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Profile table listing
#[derive(Debug, Clone, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<TimerProfile>,
}

/// Minutes and seconds for a single duration edit
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DurationEdit {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl DurationEdit {
    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

/// Theme catalogue listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub selected: String,
    pub builtin_count: usize,
    pub themes: Vec<PersistedTheme>,
    pub timestamp: DateTime<Utc>,
}

/// Response carrying a single theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub theme: PersistedTheme,
}

impl ThemeResponse {
    pub fn new(message: String, theme: PersistedTheme) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
            theme,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddThemeRequest {
    pub copy_from: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteThemesRequest {
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteThemesResponse {
    pub removed: Vec<String>,
    pub selected: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub added: usize,
    pub timestamp: DateTime<Utc>,
}

/// Status response combining timer, theme and health data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub selected_theme: String,
    pub biometrics: HealthReading,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
