//! Theme value type, its persisted form and the built-in palettes

use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// A named color palette. The name is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Prominent accents
    pub primary: Rgba,
    pub secondary: Rgba,
    pub background: Rgba,
    pub text: Rgba,
    pub card_background: Rgba,
    pub card_border: Rgba,
}

impl Theme {
    /// Copy every color of `base` under a new name
    pub fn copy_of(base: &Theme, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..base.clone() }
    }
}

/// Storage and wire form of a [`Theme`], colors as ARGB hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTheme {
    pub name: String,
    pub primary_hex: String,
    pub secondary_hex: String,
    pub background_hex: String,
    pub text_hex: String,
    pub card_background_hex: String,
    pub card_border_hex: String,
}

impl From<&Theme> for PersistedTheme {
    fn from(theme: &Theme) -> Self {
        Self {
            name: theme.name.clone(),
            primary_hex: theme.primary.to_hex(),
            secondary_hex: theme.secondary.to_hex(),
            background_hex: theme.background.to_hex(),
            text_hex: theme.text.to_hex(),
            card_background_hex: theme.card_background.to_hex(),
            card_border_hex: theme.card_border.to_hex(),
        }
    }
}

impl From<PersistedTheme> for Theme {
    fn from(record: PersistedTheme) -> Self {
        Self {
            primary: Rgba::from_hex(&record.primary_hex),
            secondary: Rgba::from_hex(&record.secondary_hex),
            background: Rgba::from_hex(&record.background_hex),
            text: Rgba::from_hex(&record.text_hex),
            card_background: Rgba::from_hex(&record.card_background_hex),
            card_border: Rgba::from_hex(&record.card_border_hex),
            name: record.name,
        }
    }
}

/// Themes that ship with the app, in display order
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme {
            name: "Default".to_string(),
            primary: Rgba::rgb(0xFF, 0x3B, 0x30),
            secondary: Rgba::rgb(0xFF, 0xCC, 0x00),
            background: Rgba::rgb(0xFF, 0xCC, 0x00),
            text: Rgba::rgb(0x00, 0x00, 0x00),
            card_background: Rgba::argb(0x99, 0xFF, 0xFF, 0xFF),
            card_border: Rgba::argb(0x33, 0xFF, 0xFF, 0xFF),
        },
        Theme {
            name: "Midnight".to_string(),
            primary: Rgba::rgb(0x0A, 0x84, 0xFF),
            secondary: Rgba::rgb(0xFF, 0x9F, 0x0A),
            background: Rgba::rgb(0x00, 0x00, 0x00),
            text: Rgba::rgb(0xFF, 0xFF, 0xFF),
            card_background: Rgba::argb(0x99, 0x1C, 0x1C, 0x1E),
            card_border: Rgba::argb(0x33, 0xFF, 0xFF, 0xFF),
        },
    ]
}
