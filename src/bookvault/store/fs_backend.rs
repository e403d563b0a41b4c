use super::backend::{StorageBackend, RECORDS_KEY, SETTINGS_KEY};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::settings::Settings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Filesystem backend: one pretty-printed JSON document per storage key,
/// all inside a single data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// File that holds the document stored under `key` (`vault:data:v1` -> `vault-data-v1.json`).
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key.replace(':', "-")))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(VaultError::Io)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let target = self.key_path(key);
        let content = serde_json::to_string_pretty(value).map_err(VaultError::Serialization)?;

        let tmp = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(VaultError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(VaultError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Option<Vec<Value>>> {
        self.read_json(RECORDS_KEY)
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        self.write_json(RECORDS_KEY, records)
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        self.read_json(SETTINGS_KEY)
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_KEY, settings)
    }
}
