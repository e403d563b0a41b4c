use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use std::fs;
use std::path::Path;

use super::helpers::report_persist_error;

/// Replace the collection with the records in a JSON export file.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, path: &Path) -> Result<CmdResult> {
    let json = fs::read_to_string(path)?;
    run_json(store, &json)
}

pub fn run_json<B: StorageBackend>(store: &mut RecordStore<B>, json: &str) -> Result<CmdResult> {
    let replaced = store.len();
    let count = store.import_json(json)?;
    let mut result = CmdResult::default().with_affected_records(store.get_all());

    result.add_message(CmdMessage::success(format!(
        "Imported {} records (replaced {})",
        count, replaced
    )));
    report_persist_error(store, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::export;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn imports_exported_collection() {
        let source = StoreFixture::new()
            .with_books(&[("Dune", "SciFi", 412)])
            .with_book_in_progress("Emma", "Classic", 300, 30);
        let json = export::run(&source.store, None).unwrap().export.unwrap();

        let mut target = InMemoryStore::new();
        let result = run_json(&mut target, &json).unwrap();

        assert_eq!(result.affected_records.len(), 2);
        assert_eq!(result.messages[0].content, "Imported 2 records (replaced 0)");
        assert_eq!(target.get_all(), source.store.get_all());
    }

    #[test]
    fn malformed_json_leaves_collection_alone() {
        let mut fixture = StoreFixture::new().with_books(&[("Dune", "SciFi", 412)]);
        assert!(run_json(&mut fixture.store, "not json").is_err());
        assert_eq!(fixture.store.len(), 1);
    }
}
