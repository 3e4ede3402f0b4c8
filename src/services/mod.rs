//! External collaborator module
//!
//! Narrow interfaces to everything outside the core: the persisted key/value
//! store, the health data source and the media transport.

pub mod health;
pub mod media;
pub mod storage;

// Re-export main types
pub use health::{HealthReading, HealthSource, SharedHealthSource};
pub use media::{LoggingTransport, MediaCommand, MediaTransport};
pub use storage::{FileStore, KeyValueStore, MemoryStore, CUSTOM_THEMES_KEY, SELECTED_THEME_KEY};
