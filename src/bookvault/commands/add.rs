use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewRecord;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

use super::helpers::report_persist_error;

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, new: NewRecord) -> Result<CmdResult> {
    let record = store.add(new);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record added ({}): {}",
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
    use crate::store::memory::fixtures::book;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_record_and_reports_id() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, book("Dune", "SciFi", 412)).unwrap();

        assert_eq!(result.affected_records.len(), 1);
        assert_eq!(result.affected_records[0].id, "rec_0001");
        assert_eq!(result.messages[0].content, "Record added (rec_0001): Dune");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn warns_when_not_saved() {
        let mut store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        let result = run(&mut store, book("Dune", "SciFi", 412)).unwrap();

        assert!(result.has_level(MessageLevel::Success));
        assert!(result.has_level(MessageLevel::Warning));
    }
}
