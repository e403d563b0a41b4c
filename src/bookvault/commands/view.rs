use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

use super::helpers::records_by_ids;

pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &RecordStore<B>,
    ids: &[I],
) -> Result<CmdResult> {
    let records = records_by_ids(store, ids)?;
    Ok(CmdResult::default().with_listed_records(records))
}
