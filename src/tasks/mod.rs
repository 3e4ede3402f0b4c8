//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod theme_watch;
pub mod tick;

// Re-export main functions
pub use theme_watch::theme_watch_task;
pub use tick::tick_task;
