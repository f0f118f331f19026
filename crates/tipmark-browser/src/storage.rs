//! Style settings in `localStorage`.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use smol_str::SmolStr;
use tipmark_core::{Result, SettingsStore, TipmarkError};

/// [`SettingsStore`] keeping the settings JSON under one localStorage key.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: SmolStr,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new("tipmark_settings")
    }
}

impl LocalStorageStore {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clear(&self) {
        LocalStorage::delete(self.key.as_str());
    }
}

impl SettingsStore for LocalStorageStore {
    fn load_raw(&self) -> Result<Option<String>> {
        match LocalStorage::get::<serde_json::Value>(self.key.as_str()) {
            Ok(value) => Ok(Some(value.to_string())),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(TipmarkError::Settings(format!("localStorage error: {e}"))),
        }
    }

    fn save_raw(&self, json: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        LocalStorage::set(self.key.as_str(), &value)
            .map_err(|e| TipmarkError::Settings(format!("localStorage error: {e}")))
    }
}
