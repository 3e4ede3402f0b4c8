//! Theme catalogue, selection and import/export

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    services::{KeyValueStore, CUSTOM_THEMES_KEY, SELECTED_THEME_KEY},
    theme::{builtin_themes, PersistedTheme, Theme},
};

const NEW_THEME_NAME: &str = "New Theme";

/// Change notification emitted by the host after a store mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ThemeEvent {
    Selected { name: String },
    Added { name: String },
    Deleted { names: Vec<String>, selected: String },
    Imported { added: usize },
}

/// Manages the ordered theme list and the selected theme.
///
/// The leading `builtin_count` entries are the shipped palettes; everything
/// after them is custom and gets persisted. Every mutation writes through to
/// the key/value store via [`ThemeStore::persist`].
pub struct ThemeStore {
    themes: Vec<Theme>,
    selected_name: String,
    builtin_count: usize,
    store: Box<dyn KeyValueStore>,
}

impl ThemeStore {
    /// Build the catalogue from the built-ins plus whatever custom themes and
    /// selection the store holds. Missing or malformed entries are ignored.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let themes = builtin_themes();
        let builtin_count = themes.len();
        let mut theme_store = Self {
            selected_name: String::new(),
            themes,
            builtin_count,
            store,
        };

        if let Some(blob) = theme_store.store.get(CUSTOM_THEMES_KEY) {
            match serde_json::from_str::<Vec<PersistedTheme>>(&blob) {
                Ok(records) => {
                    let added = theme_store.append_new(records);
                    info!("Loaded {} custom themes", added);
                }
                Err(e) => warn!("Ignoring malformed custom themes: {}", e),
            }
        }

        let saved = theme_store.store.get(SELECTED_THEME_KEY).unwrap_or_default();
        theme_store.selected_name = match theme_store.position(&saved) {
            Some(_) => saved,
            None => theme_store.themes[0].name.clone(),
        };
        debug!("Selected theme: {}", theme_store.selected_name);

        theme_store
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn selected_name(&self) -> &str {
        &self.selected_name
    }

    /// Number of leading built-in themes still in the list
    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.name == name)
    }

    /// The selected theme, or the first one if the selection does not resolve.
    /// An emptied list falls back to the first shipped palette.
    pub fn current_theme(&self) -> Theme {
        self.get(&self.selected_name)
            .or_else(|| self.themes.first())
            .cloned()
            .unwrap_or_else(|| builtin_themes().swap_remove(0))
    }

    /// Select a theme by name. Unknown names are ignored and return false.
    pub fn select(&mut self, name: &str) -> bool {
        if self.position(name).is_none() {
            debug!("Ignoring selection of unknown theme: {}", name);
            return false;
        }

        info!("Selecting theme: {}", name);
        self.selected_name = name.to_string();
        self.persist_or_warn();
        true
    }

    /// Append a copy of `copy_from` (default: the current theme) under a
    /// fresh name and select it
    pub fn add_theme(&mut self, copy_from: Option<&Theme>) -> Theme {
        let base = copy_from.cloned().unwrap_or_else(|| self.current_theme());
        let theme = Theme::copy_of(&base, self.unique_name(NEW_THEME_NAME));

        info!("Adding theme {} copied from {}", theme.name, base.name);
        self.selected_name = theme.name.clone();
        self.themes.push(theme.clone());
        self.persist_or_warn();
        theme
    }

    fn unique_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        let mut counter = 1;
        while self.position(&name).is_some() {
            counter += 1;
            name = format!("{} {}", base, counter);
        }
        name
    }

    /// Remove the themes at `indices` and return their names.
    ///
    /// Out-of-range and repeated indices are ignored. If the selected theme is
    /// removed the selection moves to the first remaining theme, or to an
    /// empty name when nothing is left.
    pub fn delete_themes(&mut self, indices: &[usize]) -> Vec<String> {
        let mut indices: Vec<usize> = indices.iter().copied().filter(|&i| i < self.themes.len()).collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let mut removed = Vec::with_capacity(indices.len());
        for index in indices {
            if index < self.builtin_count {
                self.builtin_count -= 1;
            }
            removed.push(self.themes.remove(index).name);
        }
        if removed.is_empty() {
            return removed;
        }

        removed.reverse();
        info!("Deleted themes: {:?}", removed);
        if removed.contains(&self.selected_name) {
            self.selected_name = self.themes.first().map(|theme| theme.name.clone()).unwrap_or_default();
            info!("Selection fell back to: {:?}", self.selected_name);
        }
        self.persist_or_warn();
        removed
    }

    /// Write the selection and then the custom themes to the key/value store.
    ///
    /// The two keys are written separately, so a failure can leave only the
    /// selection updated. A selection naming a theme that was never written
    /// falls back to the first theme at the next [`ThemeStore::load`].
    pub fn persist(&mut self) -> Result<(), String> {
        let custom: Vec<PersistedTheme> = self.themes[self.builtin_count..]
            .iter()
            .map(PersistedTheme::from)
            .collect();
        let blob = serde_json::to_string(&custom)
            .map_err(|e| format!("Failed to encode custom themes: {}", e))?;

        self.store.set(SELECTED_THEME_KEY, &self.selected_name)?;
        self.store.set(CUSTOM_THEMES_KEY, &blob)?;
        debug!("Persisted {} custom themes", custom.len());
        Ok(())
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Failed to persist themes: {}", e);
        }
    }

    /// Every theme, built-ins included, as a JSON array of persisted records
    pub fn export_all(&self) -> Vec<u8> {
        let records: Vec<PersistedTheme> = self.themes.iter().map(PersistedTheme::from).collect();
        serde_json::to_vec_pretty(&records).unwrap_or_else(|e| {
            warn!("Failed to encode theme export: {}", e);
            b"[]".to_vec()
        })
    }

    /// Merge themes from a JSON export.
    ///
    /// Records whose name already exists are skipped untouched. Input that
    /// does not parse adds nothing. Returns how many themes were added.
    pub fn import_themes(&mut self, bytes: &[u8]) -> usize {
        let records: Vec<PersistedTheme> = match serde_json::from_slice(bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring malformed theme import: {}", e);
                return 0;
            }
        };

        let total = records.len();
        let added = self.append_new(records);
        info!("Imported {} of {} themes", added, total);
        if added > 0 {
            self.persist_or_warn();
        }
        added
    }

    fn append_new(&mut self, records: Vec<PersistedTheme>) -> usize {
        let mut added = 0;
        for record in records {
            if self.position(&record.name).is_some() {
                debug!("Skipping theme with existing name: {}", record.name);
                continue;
            }
            self.themes.push(Theme::from(record));
            added += 1;
        }
        added
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("themes", &self.themes.len())
            .field("selected_name", &self.selected_name)
            .field("builtin_count", &self.builtin_count)
            .finish()
    }
}
