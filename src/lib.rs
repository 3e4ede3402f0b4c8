//! Boxing Mood - A round timer and theme service for combat-sport workouts
//!
//! This library provides the round timer state machine, the theme store with
//! its hex color codec, and the HTTP service that hosts both.

pub mod config;
pub mod state;
pub mod theme;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ThemeStore, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
