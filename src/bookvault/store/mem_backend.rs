use super::backend::StorageBackend;
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::settings::Settings;
use serde_json::Value;
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Documents are kept as serialized JSON so that loads go through the same
/// deserialization path as the filesystem backend. Uses `RefCell` for
/// interior mutability since the tracker is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Option<String>>,
    settings: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
    saves: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a raw records document, as if written by an
    /// earlier version.
    pub fn with_records_json(json: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = Some(json.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The raw records document as last saved.
    pub fn records_json(&self) -> Option<String> {
        self.records.borrow().clone()
    }

    /// Number of successful record saves.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Option<Vec<Value>>> {
        match self.records.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        self.check_writable()?;
        *self.records.borrow_mut() = Some(serde_json::to_string_pretty(records)?);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        match self.settings.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.check_writable()?;
        *self.settings.borrow_mut() = Some(serde_json::to_string_pretty(settings)?);
        Ok(())
    }
}
