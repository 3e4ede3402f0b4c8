//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    services::{HealthReading, HealthSource, LoggingTransport, MediaCommand, MediaTransport, SharedHealthSource},
    theme::Theme,
};
use super::{
    profiles::find_profile,
    theme_store::{ThemeEvent, ThemeStore},
    timer_state::{TickOutcome, TimerConfig, TimerEngine, TimerField, TimerSnapshot},
};

/// Shared state behind the HTTP API and the tick task
#[derive(Debug)]
pub struct AppState {
    /// Round timer, advanced by the tick task
    pub timer: Arc<Mutex<TimerEngine>>,
    /// Theme catalogue and selection
    pub themes: Arc<Mutex<ThemeStore>>,
    /// External collaborators
    pub health: Arc<SharedHealthSource>,
    pub media: Arc<dyn MediaTransport>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer snapshots
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    /// Channel for theme change notifications
    pub theme_change_tx: broadcast::Sender<ThemeEvent>,
}

impl AppState {
    /// Create a new AppState around a timer engine and a loaded theme store
    pub fn new(port: u16, host: String, engine: TimerEngine, theme_store: ThemeStore) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(engine.snapshot());
        let (theme_change_tx, _) = broadcast::channel(100);

        Self {
            timer: Arc::new(Mutex::new(engine)),
            themes: Arc::new(Mutex::new(theme_store)),
            health: Arc::new(SharedHealthSource::new()),
            media: Arc::new(LoggingTransport::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            theme_change_tx,
        }
    }

    /// Replace the media transport
    pub fn with_media(mut self, media: Arc<dyn MediaTransport>) -> Self {
        self.media = media;
        self
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish_timer(&self, snapshot: &TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn publish_theme(&self, event: ThemeEvent) {
        if self.theme_change_tx.send(event).is_err() {
            debug!("No listeners for theme change");
        }
    }

    /// Apply a user action to the timer and notify watchers
    pub fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerEngine),
    {
        let mut engine = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        updater(&mut *engine);
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        info!("Timer action {}: {} {}", action, snapshot.title, snapshot.display);
        self.record_action(action);
        self.publish_timer(&snapshot);
        Ok(snapshot)
    }

    pub fn start_timer(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("start", TimerEngine::start)
    }

    pub fn pause_timer(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("pause", TimerEngine::pause)
    }

    pub fn toggle_timer(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("toggle", TimerEngine::toggle)
    }

    pub fn reset_timer(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("reset", TimerEngine::reset)
    }

    pub fn configure_timer(&self, config: TimerConfig) -> Result<TimerSnapshot, String> {
        self.update_timer("configure", |engine| engine.configure(config))
    }

    pub fn set_timer_duration(&self, field: TimerField, seconds: u32) -> Result<TimerSnapshot, String> {
        self.update_timer("edit-duration", |engine| engine.set_duration(field, seconds))
    }

    /// Apply a named profile. Returns `Ok(None)` for unknown names.
    pub fn apply_profile(&self, name: &str) -> Result<Option<TimerSnapshot>, String> {
        let Some(profile) = find_profile(name) else {
            warn!("Unknown timer profile: {}", name);
            return Ok(None);
        };
        self.update_timer("profile", |engine| engine.apply_profile(profile)).map(Some)
    }

    /// Advance the timer by one second (called by the tick task)
    pub fn tick_timer(&self) -> Result<(TickOutcome, TimerSnapshot), String> {
        let mut engine = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let outcome = engine.tick();
        let snapshot = engine.snapshot();
        drop(engine);

        if outcome != TickOutcome::Stopped {
            self.publish_timer(&snapshot);
        }
        Ok((outcome, snapshot))
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    fn with_themes<F, R>(&self, f: F) -> Result<R, String>
    where
        F: FnOnce(&mut ThemeStore) -> R,
    {
        let mut store = self.themes.lock()
            .map_err(|e| format!("Failed to lock theme store: {}", e))?;
        Ok(f(&mut *store))
    }

    /// Get every theme plus the selected name
    pub fn get_themes(&self) -> Result<(Vec<Theme>, String), String> {
        self.with_themes(|store| (store.themes().to_vec(), store.selected_name().to_string()))
    }

    pub fn builtin_theme_count(&self) -> usize {
        self.with_themes(|store| store.builtin_count()).unwrap_or_default()
    }

    pub fn current_theme(&self) -> Result<Theme, String> {
        self.with_themes(|store| store.current_theme())
    }

    /// Select a theme; returns false when the name is unknown
    pub fn select_theme(&self, name: &str) -> Result<bool, String> {
        let selected = self.with_themes(|store| store.select(name))?;
        if selected {
            self.record_action("select-theme");
            self.publish_theme(ThemeEvent::Selected { name: name.to_string() });
        }
        Ok(selected)
    }

    /// Add a theme copied from `copy_from` or the current theme.
    /// Returns `Ok(None)` when `copy_from` names no theme.
    pub fn add_theme(&self, copy_from: Option<&str>) -> Result<Option<Theme>, String> {
        let added = self.with_themes(|store| match copy_from {
            Some(name) => store
                .get(name)
                .cloned()
                .map(|base| store.add_theme(Some(&base))),
            None => Some(store.add_theme(None)),
        })?;

        if let Some(theme) = &added {
            self.record_action("add-theme");
            self.publish_theme(ThemeEvent::Added { name: theme.name.clone() });
        }
        Ok(added)
    }

    /// Delete themes by position; returns the removed names
    pub fn delete_themes(&self, indices: &[usize]) -> Result<Vec<String>, String> {
        let (names, selected) = self.with_themes(|store| {
            let names = store.delete_themes(indices);
            (names, store.selected_name().to_string())
        })?;

        if !names.is_empty() {
            self.record_action("delete-themes");
            self.publish_theme(ThemeEvent::Deleted { names: names.clone(), selected });
        }
        Ok(names)
    }

    pub fn export_themes(&self) -> Result<Vec<u8>, String> {
        self.with_themes(|store| store.export_all())
    }

    /// Merge themes from an export; returns how many were added
    pub fn import_themes(&self, bytes: &[u8]) -> Result<usize, String> {
        let added = self.with_themes(|store| store.import_themes(bytes))?;
        self.record_action("import-themes");
        if added > 0 {
            self.publish_theme(ThemeEvent::Imported { added });
        }
        Ok(added)
    }

    pub fn latest_health(&self) -> HealthReading {
        self.health.latest()
    }

    pub fn update_health(&self, reading: HealthReading) -> Result<(), String> {
        self.health.update(reading)
    }

    pub fn send_media(&self, command: MediaCommand) -> Result<(), String> {
        self.media.send(command)?;
        self.record_action("media");
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
