//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every bookvault operation, whichever UI drives it.
//!
//! The API:
//! - **Dispatches** to the matching `commands::*::run` function
//! - **Normalizes inputs** (`3`, `0003` and `rec_0003` all name the same record)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! `VaultApi<B: StorageBackend>` is generic over the backend:
//! - Production: `VaultApi<FsBackend>`
//! - Testing: `VaultApi<MemBackend>`

use crate::commands;
use crate::error::{Result, VaultError};
use crate::model::{format_record_id, NewRecord, RecordUpdate};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NUMERIC_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:rec_)?(\d+)$").expect("valid record ref pattern"));

pub struct VaultApi<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> VaultApi<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn add_record(&mut self, new: NewRecord) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, new)
    }

    pub fn list_records(&self, query: &ListQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn view_records<I: AsRef<str>>(&self, refs: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_refs(refs)?;
        commands::view::run(&self.store, ids.as_slice())
    }

    pub fn update_record(
        &mut self,
        record_ref: &str,
        update: RecordUpdate,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve_ref(record_ref)?;
        commands::update::run(&mut self.store, &id, update)
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, refs: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_refs(refs)?;
        commands::delete::run(&mut self.store, ids.as_slice())
    }

    pub fn log_progress(
        &mut self,
        record_ref: &str,
        pages: i64,
        note: &str,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve_ref(record_ref)?;
        commands::progress::run(&mut self.store, &id, pages, note)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn export_records(&self, output: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, output)
    }

    pub fn import_records(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(self.store.backend(), action)
    }

    /// An id as stored wins; otherwise numeric forms map to `rec_NNNN`.
    fn resolve_ref(&self, input: &str) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VaultError::Api("Empty record id".to_string()));
        }
        if self.store.get_by_id(input).is_some() {
            return Ok(input.to_string());
        }
        Ok(normalize_record_ref(input))
    }

    fn resolve_refs<I: AsRef<str>>(&self, inputs: &[I]) -> Result<Vec<String>> {
        if inputs.is_empty() {
            return Err(VaultError::Api("No record ids given".to_string()));
        }
        inputs.iter().map(|i| self.resolve_ref(i.as_ref())).collect()
    }
}

/// `3`, `0003` and `rec_3` become `rec_0003`; anything else is returned as is.
pub fn normalize_record_ref(input: &str) -> String {
    let input = input.trim();
    NUMERIC_REF
        .captures(input)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .map(format_record_id)
        .unwrap_or_else(|| input.to_string())
}

pub use commands::config::ConfigAction;
pub use commands::list::ListQuery;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
