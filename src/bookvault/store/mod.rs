//! # Storage Layer
//!
//! [`RecordStore`] is the authoritative owner of the record collection. It is
//! an explicit value, created once per process and handed to whoever needs
//! it; there is no ambient global state.
//!
//! ## Responsibilities
//!
//! - **Identity**: assigns sequential `rec_NNNN` ids and keeps them unique.
//! - **Migration**: records loaded or imported without reading-progress fields
//!   get `pagesRead = 0` and an empty `readHistory`; nothing else is touched.
//! - **Invariant**: `0 <= pagesRead <= pages` is enforced on every mutation
//!   that changes progress.
//! - **Persistence**: the full collection is written back through the
//!   [`StorageBackend`] after every mutation.
//!
//! ## Persistence Failures
//!
//! Backends report failures explicitly. The store keeps the in-memory
//! mutation (the caller's view stays consistent), logs a warning, and holds
//! on to the error until [`RecordStore::take_persist_error`] is called. The
//! command layer turns it into a user-visible warning.
//!
//! Records are parsed one by one on load. An element that cannot be read is
//! skipped and logged; a document that cannot be read at all opens as an
//! empty collection. Either way the store becomes read-only: saves are
//! refused (and reported like any other persistence failure) so the stored
//! document is never overwritten with a partial collection. An import
//! replaces the collection wholesale and lifts the restriction.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: JSON documents in a data directory.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── vault-data-v1.json       # Record collection (JSON array)
//! └── vault-settings-v1.json   # User settings
//! ```

use crate::error::{Result, VaultError};
use crate::model::{
    format_log_id, format_record_id, record_seq, LogEntry, NewRecord, RawRecord, Record,
    RecordUpdate, Stats, LOG_ID_PREFIX,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

use backend::StorageBackend;

/// Placeholder category reported when the collection is empty.
pub const NO_CATEGORY: &str = "None";

/// Number of records reported in [`Stats::last_interacted`].
pub const LAST_INTERACTED_COUNT: usize = 3;

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: Vec<Record>,
    next_id: u64,
    last_log_millis: i64,
    persist_error: Option<VaultError>,
    read_only: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Load the collection from `backend` and migrate it.
    pub fn open(backend: B) -> Self {
        let (raw, intact) = match backend.load_records() {
            Ok(Some(values)) => parse_stored(values),
            Ok(None) => (Vec::new(), true),
            Err(e) => {
                log::error!("Failed to load records, starting empty: {}", e);
                (Vec::new(), false)
            }
        };

        let mut store = Self {
            backend,
            records: Vec::new(),
            next_id: 1,
            last_log_millis: 0,
            persist_error: None,
            read_only: !intact,
        };
        store.replace_collection(raw, Utc::now());
        if store.read_only {
            log::error!("Stored records were not fully readable, saving is disabled until an import");
        }
        log::debug!("Loaded {} records", store.records.len());
        store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether saving is refused because stored data could not be read.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Borrowed view of the collection in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Copy of the collection in insertion order.
    pub fn get_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Record> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    /// Sequence number the next added record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn add(&mut self, new: NewRecord) -> Record {
        let now = Utc::now();
        let record = Record {
            id: format_record_id(self.next_id),
            title: new.title,
            author: new.author,
            tag: new.tag,
            pages: new.pages,
            pages_read: 0,
            date_added: new.date_added,
            read_history: Vec::new(),
            created_at: now,
            updated_at: now,
            extra: Default::default(),
        };
        self.next_id += 1;
        self.records.push(record.clone());
        self.persist();
        record
    }

    /// Shallow-merge `update` into the record and refresh `updated_at`.
    ///
    /// Fails without side effects when the id is unknown, or when an update
    /// to `pages` or `pagesRead` would leave more pages read than pages.
    pub fn update(&mut self, id: &str, update: RecordUpdate) -> Result<Record> {
        let index = self.position(id)?;

        let touches_progress = update.pages.is_some() || update.pages_read.is_some();
        let mut candidate = self.records[index].clone();
        update.apply_to(&mut candidate);
        if touches_progress && candidate.pages_read > candidate.pages {
            return Err(VaultError::PagesExceeded {
                id: id.to_string(),
                pages: candidate.pages,
                attempted: i64::from(candidate.pages_read),
            });
        }
        candidate.updated_at = Utc::now();

        self.records[index] = candidate.clone();
        self.persist();
        Ok(candidate)
    }

    /// Remove a record. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Replace the whole collection. Returns the number of records imported.
    pub fn import_all(&mut self, raw: Vec<RawRecord>) -> usize {
        self.replace_collection(raw.into_iter().enumerate().collect(), Utc::now());
        self.read_only = false;
        log::info!("Imported {} records", self.records.len());
        self.persist();
        self.records.len()
    }

    /// Parse a JSON array of records and [`import_all`](Self::import_all) it.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(self.import_all(raw))
    }

    /// Pretty-printed JSON of the whole collection.
    pub fn export_all(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn get_stats(&self) -> Stats {
        let total_pages = self.records.iter().map(|r| u64::from(r.pages)).sum();
        let total_pages_read = self.records.iter().map(|r| u64::from(r.pages_read)).sum();

        let mut by_recency: Vec<Record> = self.records.clone();
        by_recency.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        by_recency.truncate(LAST_INTERACTED_COUNT);

        Stats {
            total: self.records.len(),
            total_pages,
            total_pages_read,
            favorite_category: favorite_category(&self.records),
            last_interacted: by_recency,
        }
    }

    /// Log a reading session of `delta_pages` pages.
    ///
    /// The new entry is prepended to the record's history and the record is
    /// saved through [`update`](Self::update).
    pub fn log_progress(&mut self, id: &str, delta_pages: i64, note: &str) -> Result<Record> {
        let index = self.position(id)?;
        let record = &self.records[index];

        // Saturates at i64::MAX, which is always past the last page.
        let new_pages_read = i64::from(record.pages_read).saturating_add(delta_pages);
        if new_pages_read > i64::from(record.pages) {
            return Err(VaultError::PagesExceeded {
                id: id.to_string(),
                pages: record.pages,
                attempted: new_pages_read,
            });
        }
        if new_pages_read < 0 {
            return Err(VaultError::NegativeProgress {
                id: id.to_string(),
                attempted: new_pages_read,
            });
        }

        let now = Utc::now();
        let mut history = Vec::with_capacity(record.read_history.len() + 1);
        history.push(LogEntry {
            id: self.issue_log_id(now),
            book_id: id.to_string(),
            date_iso: now,
            delta_pages,
            note: note.to_string(),
        });
        history.extend(self.records[index].read_history.iter().cloned());

        self.update(
            id,
            RecordUpdate {
                pages_read: Some(new_pages_read as u32),
                read_history: Some(history),
                ..Default::default()
            },
        )
    }

    /// The last persistence failure, if the collection is not saved yet.
    pub fn take_persist_error(&mut self) -> Option<VaultError> {
        self.persist_error.take()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))
    }

    fn persist(&mut self) {
        if self.read_only {
            let e = VaultError::Store(
                "stored records could not be read, refusing to overwrite them".to_string(),
            );
            log::warn!("Not saving records: {}", e);
            self.persist_error = Some(e);
            return;
        }
        match self.backend.save_records(&self.records) {
            Ok(()) => {
                self.persist_error = None;
                log::debug!("Saved {} records", self.records.len());
            }
            Err(e) => {
                log::warn!("Failed to save records, changes kept in memory: {}", e);
                self.persist_error = Some(e);
            }
        }
    }

    /// Log ids embed a millisecond timestamp that never repeats: when the
    /// clock has not advanced past the last issued value, the next
    /// millisecond is used instead.
    fn issue_log_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_log_millis + 1);
        self.last_log_millis = millis;
        format_log_id(millis)
    }

    /// `raw` pairs each record with its 0-based position in the source
    /// document, which names records that carry no id.
    fn replace_collection(&mut self, raw: Vec<(usize, RawRecord)>, now: DateTime<Utc>) {
        let legacy = raw.iter().filter(|(_, r)| r.needs_migration()).count();
        if legacy > 0 {
            log::info!("Migrating {} records without reading progress", legacy);
        }

        let mut records: Vec<Record> = raw
            .into_iter()
            .map(|(i, r)| r.migrate(i + 1, now))
            .collect();

        let mut next_id = next_sequence(&records);
        let mut seen = HashSet::new();
        for record in &mut records {
            if !seen.insert(record.id.clone()) {
                let fresh = format_record_id(next_id);
                next_id += 1;
                log::warn!("Duplicate record id {}, reassigned to {}", record.id, fresh);
                record.id = fresh.clone();
                for entry in &mut record.read_history {
                    entry.book_id = fresh.clone();
                }
                seen.insert(fresh);
            }
            if record.pages_read > record.pages {
                log::warn!(
                    "Record {} has {} pages read of {}",
                    record.id,
                    record.pages_read,
                    record.pages
                );
            }
        }

        self.last_log_millis = records
            .iter()
            .flat_map(|r| r.read_history.iter())
            .filter_map(|e| e.id.strip_prefix(LOG_ID_PREFIX)?.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.next_id = next_id;
        self.records = records;
    }
}

/// Parse stored elements one at a time. Unreadable elements are skipped;
/// the flag reports whether every element was read.
fn parse_stored(values: Vec<Value>) -> (Vec<(usize, RawRecord)>, bool) {
    let mut intact = true;
    let mut raw = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => raw.push((i, record)),
            Err(e) => {
                log::warn!("Skipping unreadable record #{}: {}", i + 1, e);
                intact = false;
            }
        }
    }
    (raw, intact)
}

/// One past the highest numeric id suffix, or 1 for an empty collection.
fn next_sequence(records: &[Record]) -> u64 {
    records
        .iter()
        .filter_map(|r| record_seq(&r.id))
        .max()
        .map_or(1, |max| max + 1)
}

/// Most frequent tag; the first tag to reach the top count wins ties.
fn favorite_category(records: &[Record]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(tag, _)| *tag == record.tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.tag.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (tag, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((tag, count));
        }
    }
    best.map_or_else(|| NO_CATEGORY.to_string(), |(tag, _)| tag.to_string())
}
