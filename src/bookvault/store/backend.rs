use crate::error::Result;
use crate::model::Record;
use crate::settings::Settings;
use serde_json::Value;

/// Storage key of the record collection.
pub const RECORDS_KEY: &str = "vault:data:v1";
/// Storage key of the user settings.
pub const SETTINGS_KEY: &str = "vault:settings:v1";

/// Abstract interface for raw storage I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`RecordStore`](super::RecordStore) handles the "what" (ids, migration,
/// invariants). Every call reports failure explicitly; deciding whether a
/// failure is fatal is up to the caller.
pub trait StorageBackend {
    // --- Records ---

    /// Load the stored record collection, one JSON value per element.
    /// Returns Ok(None) if nothing was ever saved, and an error if the
    /// document is not a JSON array.
    fn load_records(&self) -> Result<Option<Vec<Value>>>;

    /// Replace the stored record collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_records(&self, records: &[Record]) -> Result<()>;

    // --- Settings ---

    /// Load user settings. Returns Ok(None) if never saved.
    fn load_settings(&self) -> Result<Option<Settings>>;

    /// Persist user settings.
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}
