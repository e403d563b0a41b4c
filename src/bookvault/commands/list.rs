use crate::commands::CmdResult;
use crate::error::Result;
use crate::search::{search_records, sort_records, SearchOptions, SortDirection, SortField};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// What to show: an optional search and an optional ordering.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub options: SearchOptions,
    /// Insertion order when `None`.
    pub sort: Option<(SortField, SortDirection)>,
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>, query: &ListQuery) -> Result<CmdResult> {
    let matched = match query.search.as_deref() {
        Some(term) => search_records(store.records(), term, query.options)?,
        None => store.get_all(),
    };
    let listed = match query.sort {
        Some((field, direction)) => sort_records(&matched, field, direction),
        None => matched,
    };
    Ok(CmdResult::default().with_listed_records(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new().with_books(&[
            ("Dune", "SciFi", 412),
            ("Emma", "Classic", 300),
            ("Hyperion", "SciFi", 482),
        ])
    }

    #[test]
    fn lists_in_insertion_order() {
        let result = run(&fixture().store, &ListQuery::default()).unwrap();
        let ids: Vec<&str> = result.listed_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rec_0001", "rec_0002", "rec_0003"]);
    }

    #[test]
    fn filters_then_sorts() {
        let query = ListQuery {
            search: Some("scifi".into()),
            sort: Some((SortField::Pages, SortDirection::Desc)),
            ..Default::default()
        };
        let result = run(&fixture().store, &query).unwrap();
        let titles: Vec<&str> = result
            .listed_records
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Hyperion", "Dune"]);
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let query = ListQuery {
            search: Some("[".into()),
            options: SearchOptions {
                advanced: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            run(&fixture().store, &query),
            Err(VaultError::InvalidPattern(_))
        ));
    }
}
