use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

use super::helpers::{progress_summary, report_persist_error};

/// Log a reading session. Negative `pages` corrects earlier over-counting.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    pages: i64,
    note: &str,
) -> Result<CmdResult> {
    let record = store.log_progress(id, pages, note)?;
    let mut result = CmdResult::default();

    result.add_message(CmdMessage::success(format!(
        "Logged {} pages on {}: {}",
        pages,
        record.title,
        progress_summary(&record)
    )));
    if record.is_finished() && pages > 0 {
        result.add_message(CmdMessage::success(format!("Finished {}!", record.title)));
    }
    result.affected_records.push(record);
    report_persist_error(store, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn logs_progress() {
        let mut fixture = StoreFixture::new().with_books(&[("Emma", "Classic", 300)]);
        let result = run(&mut fixture.store, "rec_0001", 120, "first chapters").unwrap();

        assert_eq!(
            result.messages[0].content,
            "Logged 120 pages on Emma: 120/300 pages (40%)"
        );
        let record = &result.affected_records[0];
        assert_eq!(record.pages_read, 120);
        assert_eq!(record.read_history[0].note, "first chapters");
    }

    #[test]
    fn announces_finished_book() {
        let mut fixture = StoreFixture::new().with_book_in_progress("Emma", "Classic", 100, 90);
        let result = run(&mut fixture.store, "rec_0001", 10, "").unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].content, "Finished Emma!");
    }

    #[test]
    fn rejects_overshoot() {
        let mut fixture = StoreFixture::new().with_book_in_progress("Emma", "Classic", 100, 90);
        let result = run(&mut fixture.store, "rec_0001", 20, "");
        assert!(matches!(result, Err(VaultError::PagesExceeded { .. })));
        assert_eq!(fixture.store.get_by_id("rec_0001").unwrap().pages_read, 90);
    }
}
