use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

use super::helpers::{records_by_ids, report_persist_error};

/// Delete every listed record. Nothing is deleted if any id is unknown.
pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &mut RecordStore<B>,
    ids: &[I],
) -> Result<CmdResult> {
    let records = records_by_ids(store, ids)?;
    let mut result = CmdResult::default();

    for record in records {
        if store.delete(&record.id) {
            result.add_message(CmdMessage::success(format!(
                "Record deleted ({}): {}",
                record.id, record.title
            )));
            result.affected_records.push(record);
        }
    }

    report_persist_error(store, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_records() {
        let mut fixture = StoreFixture::new().with_books(&[("A", "X", 1), ("B", "X", 1)]);
        let result = run(&mut fixture.store, &["rec_0001"]).unwrap();

        assert_eq!(result.affected_records[0].title, "A");
        assert!(fixture.store.get_by_id("rec_0001").is_none());
        assert_eq!(fixture.store.len(), 1);
    }

    #[test]
    fn repeated_id_is_deleted_once() {
        let mut fixture = StoreFixture::new().with_books(&[("A", "X", 1)]);
        let result = run(&mut fixture.store, &["rec_0001", "rec_0001"]).unwrap();
        assert_eq!(result.affected_records.len(), 1);
    }

    #[test]
    fn unknown_id_deletes_nothing() {
        let mut fixture = StoreFixture::new().with_books(&[("A", "X", 1)]);
        let result = run(&mut fixture.store, &["rec_0001", "rec_0009"]);

        assert!(matches!(result, Err(VaultError::RecordNotFound(id)) if id == "rec_0009"));
        assert_eq!(fixture.store.len(), 1);
    }
}
