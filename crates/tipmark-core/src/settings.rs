//! Style settings and their persistence.
//!
//! Four colour values, stored as a small JSON blob. Loading never fails:
//! the stored object is merged shallowly over the defaults, and any field
//! that is missing or not a string keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use crate::error::{Result, TipmarkError};

/// Colours used by the injected stylesheet.
///
/// Values are any CSS colour expression, including `var(--...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    pub tooltip_text_color: SmolStr,
    pub tooltip_background_color: SmolStr,
    pub tooltip_border_color: SmolStr,
    /// Accent for the visible (hoverable) text.
    pub visible_text_color: SmolStr,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            tooltip_text_color: SmolStr::new_static("var(--text-normal)"),
            tooltip_background_color: SmolStr::new_static("var(--background-secondary)"),
            tooltip_border_color: SmolStr::new_static("var(--background-modifier-border)"),
            visible_text_color: SmolStr::new_static("var(--text-accent)"),
        }
    }
}

impl StyleSettings {
    /// Parse a stored blob, substituting defaults for anything unusable.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                tracing::warn!(target: "tipmark::settings", %err, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    /// Merge a stored JSON value over the defaults, field by field.
    pub fn from_value(value: &Value) -> Self {
        let mut settings = Self::default();
        let Some(stored) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!(target: "tipmark::settings", "settings blob is not an object, using defaults");
            }
            return settings;
        };

        let fields: [(&str, &mut SmolStr); 4] = [
            ("tooltipTextColor", &mut settings.tooltip_text_color),
            ("tooltipBackgroundColor", &mut settings.tooltip_background_color),
            ("tooltipBorderColor", &mut settings.tooltip_border_color),
            ("visibleTextColor", &mut settings.visible_text_color),
        ];
        for (key, slot) in fields {
            match stored.get(key) {
                Some(Value::String(s)) => *slot = SmolStr::new(s),
                Some(Value::Null) | None => {}
                Some(other) => {
                    tracing::debug!(target: "tipmark::settings", key, %other, "non-string setting ignored");
                }
            }
        }

        settings
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Persistent storage for style settings.
pub trait SettingsStore {
    /// Read the raw stored blob, `None` if nothing was saved yet.
    fn load_raw(&self) -> Result<Option<String>>;

    /// Overwrite the stored blob.
    fn save_raw(&self, json: &str) -> Result<()>;

    /// Load settings; storage errors fall back to defaults.
    fn load(&self) -> StyleSettings {
        match self.load_raw() {
            Ok(Some(json)) => StyleSettings::from_json(&json),
            Ok(None) => StyleSettings::default(),
            Err(err) => {
                tracing::warn!(target: "tipmark::settings", %err, "settings load failed, using defaults");
                StyleSettings::default()
            }
        }
    }

    fn save(&self, settings: &StyleSettings) -> Result<()> {
        self.save_raw(&settings.to_json()?)
    }
}

/// A [`SettingsStore`] that reads and writes a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load_raw(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_raw(&self, json: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json).map_err(|err| {
            TipmarkError::Settings(format!("cannot write {}: {err}", self.path.display()))
        })
    }
}
