//! File-backed key/value settings store.
//!
//! Values live in a single JSON object keyed by option name, so the file stays
//! readable and hand-editable:
//!
//! ```text
//! {
//!   "formatOutput": true,
//!   "enableDirectPasting": false,
//!   "languages": ["eng", "deu"]
//! }
//! ```
//!
//! Keys the store does not know about are preserved on save.

use crate::error::Result;
use crate::options::{OptionKey, Options};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "OCR_INDENT_SETTINGS";

/// Settings file used when nothing else is configured.
pub const DEFAULT_SETTINGS_FILE: &str = ".ocr_indent.json";

/// Settings location from the environment, falling back to the working
/// directory.
pub fn default_settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// Persistent string-keyed settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    values: IndexMap<String, Value>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                IndexMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            log::debug!("No settings file at {}, starting empty", path.display());
            IndexMap::new()
        };
        Ok(Self { path, values })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored values for the requested keys. Absent keys are left out.
    pub fn get(&self, keys: &[&str]) -> IndexMap<String, Value> {
        keys.iter()
            .filter_map(|key| {
                self.values
                    .get(*key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect()
    }

    /// Merge values into the store and write it out.
    pub fn set(&mut self, values: IndexMap<String, Value>) -> Result<()> {
        self.values.extend(values);
        self.persist()
    }

    /// Drop keys from the store and write it out.
    pub fn remove(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.values.shift_remove(*key);
        }
        self.persist()
    }

    /// Options from storage, with defaults for every key not stored.
    ///
    /// A stored value of the wrong shape is ignored with a warning and the
    /// default is used instead.
    pub fn load_options(&self) -> Options {
        let mut options = Options::default();
        let names: Vec<&str> = OptionKey::ALL.iter().map(OptionKey::as_str).collect();
        for (name, value) in self.get(&names) {
            // names came from OptionKey::ALL
            let Ok(key) = name.parse::<OptionKey>() else {
                continue;
            };
            if let Err(e) = options.apply_value(key, &value) {
                log::warn!("Ignoring stored {}: {}", key, e);
            }
        }
        options
    }

    /// Write every option to storage.
    pub fn save_options(&mut self, options: &Options) -> Result<()> {
        let values = OptionKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), options.get(*key)))
            .collect();
        self.set(values)?;
        log::info!("Options saved to {}", self.path.display());
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
