use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use std::fs;
use std::path::Path;

/// Export the collection as pretty JSON, to `output` or into the result.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, output: Option<&Path>) -> Result<CmdResult> {
    let json = store.export_all()?;
    let mut result = CmdResult::default();

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} records to {}",
                store.len(),
                path.display()
            )));
        }
        None => result.export = Some(json),
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn exports_to_result_when_no_path() {
        let fixture = StoreFixture::new().with_books(&[("Dune", "SciFi", 412)]);
        let result = run(&fixture.store, None).unwrap();

        let json = result.export.unwrap();
        assert!(json.starts_with("[\n"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "rec_0001");
        assert_eq!(value[0]["pagesRead"], 0);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn exports_empty_collection() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.store, None).unwrap();
        assert_eq!(result.export.as_deref(), Some("[]"));
    }

    #[test]
    fn exports_to_file_with_message() {
        let fixture = StoreFixture::new().with_books(&[("Dune", "SciFi", 412)]);
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let result = run(&fixture.store, Some(path.as_path())).unwrap();
        assert!(result.export.is_none());
        assert!(result.messages[0].content.contains("Exported 1 records"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"id\": \"rec_0001\""));
    }
}
