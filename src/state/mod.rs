//! State management module
//!
//! This module contains the round timer engine, the theme store and the
//! shared application state that hosts both.

pub mod app_state;
pub mod profiles;
pub mod theme_store;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use profiles::{find_profile, TimerProfile, PROFILES};
pub use theme_store::{ThemeEvent, ThemeStore};
pub use timer_state::{
    format_seconds, TickOutcome, TimerConfig, TimerEngine, TimerField, TimerPhase, TimerSnapshot, TimerState,
};
