use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Turn an unsaved collection into a warning on `result`.
pub fn report_persist_error<B: StorageBackend>(store: &mut RecordStore<B>, result: &mut CmdResult) {
    if let Some(e) = store.take_persist_error() {
        result.add_message(CmdMessage::warning(format!(
            "Changes could not be saved: {}",
            e
        )));
    }
}

/// Look up every id, failing on the first one that does not exist.
pub fn records_by_ids<B: StorageBackend, I: AsRef<str>>(
    store: &RecordStore<B>,
    ids: &[I],
) -> Result<Vec<Record>> {
    ids.iter()
        .map(|id| {
            store
                .get_by_id(id.as_ref())
                .ok_or_else(|| VaultError::RecordNotFound(id.as_ref().to_string()))
        })
        .collect()
}

/// `120/300 pages (40%)`
pub fn progress_summary(record: &Record) -> String {
    format!(
        "{}/{} pages ({:.0}%)",
        record.pages_read,
        record.pages,
        record.progress_percent()
    )
}
