use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordUpdate;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

use super::helpers::report_persist_error;

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    update: RecordUpdate,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if update.is_empty() {
        let record = super::helpers::records_by_ids(store, &[id])?;
        result.add_message(CmdMessage::info(format!("Nothing to change for {}", id)));
        return Ok(result.with_listed_records(record));
    }

    let record = store.update(id, update)?;
    result.add_message(CmdMessage::success(format!(
        "Record updated ({}): {}",
        record.id, record.title
    )));
    result.affected_records.push(record);
    report_persist_error(store, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::VaultError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_fields() {
        let mut fixture = StoreFixture::new().with_books(&[("Dune", "SciFi", 412)]);
        let result = run(
            &mut fixture.store,
            "rec_0001",
            RecordUpdate {
                tag: Some("Classic".into()),
                pages: Some(500),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(result.affected_records[0].tag, "Classic");
        assert_eq!(fixture.store.get_by_id("rec_0001").unwrap().pages, 500);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut fixture = StoreFixture::new().with_books(&[("Dune", "SciFi", 412)]);
        let saves = fixture.store.backend().save_count();
        let result = run(&mut fixture.store, "rec_0001", RecordUpdate::default()).unwrap();

        assert!(result.affected_records.is_empty());
        assert!(result.has_level(MessageLevel::Info));
        assert_eq!(fixture.store.backend().save_count(), saves);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut fixture = StoreFixture::new();
        let result = run(
            &mut fixture.store,
            "rec_0001",
            RecordUpdate {
                title: Some("x".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(VaultError::RecordNotFound(_))));
    }
}
