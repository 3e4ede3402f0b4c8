//! String key/value persistence used by the theme store

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use anyhow::Context;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Key holding the selected theme name
pub const SELECTED_THEME_KEY: &str = "SelectedThemeName";
/// Key holding the JSON array of custom themes
pub const CUSTOM_THEMES_KEY: &str = "CustomThemes";

/// Minimal persisted key/value contract
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Volatile store, mostly for tests and ephemeral runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, written through on every set
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Every entry of the file; only string values are visible through `get`
    values: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. Entries whose value is not a string are
    /// kept on disk but never returned. A file that is not a JSON object is
    /// moved aside to `<name>.corrupt` so the next write cannot destroy it.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(values) => {
                    for (key, value) in values.iter().filter(|(_, value)| !value.is_string()) {
                        warn!("Ignoring non-string entry {} in {}: {}", key, path.display(), value);
                    }
                    values
                }
                Err(e) => {
                    let aside = sibling(&path, "corrupt");
                    warn!("Malformed data file {}: {}; moving it to {}", path.display(), e, aside.display());
                    if let Err(e) = fs::rename(&path, &aside) {
                        warn!("Failed to move {} aside: {}", path.display(), e);
                    }
                    Map::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No data file at {}, starting empty", path.display());
                Map::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read data file {}", path.display()));
            }
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `data.json` -> `data.json.<suffix>` in the same directory
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(Value::as_str).map(str::to_string)
    }

    /// Replace one entry and rewrite the file via a temp file and rename, so
    /// a crash mid-write leaves the previous file intact
    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.values.insert(key.to_string(), Value::String(value.to_string()));
        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to encode data file: {}", e))?;

        let tmp = sibling(&self.path, "tmp");
        fs::write(&tmp, content)
            .map_err(|e| format!("Failed to write {}: {}", tmp.display(), e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(format!("Failed to replace {}: {}", self.path.display(), e));
        }

        debug!("Stored key {} in {}", key, self.path.display());
        Ok(())
    }
}
