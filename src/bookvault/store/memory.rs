use super::mem_backend::MemBackend;
use super::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::open(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::NewRecord;

    /// A [`NewRecord`] with a derived author and a fixed date.
    pub fn book(title: &str, tag: &str, pages: u32) -> NewRecord {
        NewRecord {
            title: title.to_string(),
            author: format!("Author of {}", title),
            tag: tag.to_string(),
            pages,
            date_added: "2024-01-15".to_string(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Add `(title, tag, pages)` books in order; ids start at `rec_0001`.
        pub fn with_books(mut self, books: &[(&str, &str, u32)]) -> Self {
            for (title, tag, pages) in books {
                self.store.add(book(title, tag, *pages));
            }
            self
        }

        /// Add a book and log `pages_read` pages against it.
        pub fn with_book_in_progress(
            mut self,
            title: &str,
            tag: &str,
            pages: u32,
            pages_read: u32,
        ) -> Self {
            let record = self.store.add(book(title, tag, pages));
            self.store
                .log_progress(&record.id, i64::from(pages_read), "")
                .unwrap();
            self
        }
    }
}
