//! Theme model
//!
//! Color values, the theme palette type and its hex-encoded persisted form.

pub mod color;
pub mod model;

pub use color::Rgba;
pub use model::{builtin_themes, PersistedTheme, Theme};
