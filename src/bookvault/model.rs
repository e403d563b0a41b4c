//! # Data Model
//!
//! The persisted shape of a book record and its reading history.
//!
//! Field names are serialized in camelCase (`pagesRead`, `readHistory`,
//! `dateAdded`, ...) so that data written by earlier versions of the tracker
//! loads unchanged. Unknown fields are carried through `extra` and written
//! back verbatim.
//!
//! Two record shapes exist:
//! - [`Record`]: a fully-formed record as owned by the [`RecordStore`](crate::store::RecordStore).
//! - [`RawRecord`]: whatever was found in storage or in an import file. Every
//!   field is optional; [`RawRecord::migrate`] turns it into a `Record`.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const RECORD_ID_PREFIX: &str = "rec_";
pub const LOG_ID_PREFIX: &str = "log_";

/// Formats a record sequence number as `rec_NNNN`. Numbers past 9999 widen.
pub fn format_record_id(seq: u64) -> String {
    format!("{}{:04}", RECORD_ID_PREFIX, seq)
}

/// Numeric suffix of a record id (`rec_0042` -> 42).
pub fn record_seq(id: &str) -> Option<u64> {
    id.split('_').nth(1)?.parse().ok()
}

pub fn format_log_id(millis: i64) -> String {
    format!("{}{}", LOG_ID_PREFIX, millis)
}

/// One logged reading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub book_id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: DateTime<Utc>,
    pub delta_pages: i64,
    #[serde(default)]
    pub note: String,
}

/// One tracked book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    pub author: String,
    pub tag: String,
    pub pages: u32,
    pub pages_read: u32,
    pub date_added: String,
    pub read_history: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Reading progress as a percentage in `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        if self.pages == 0 {
            return 0.0;
        }
        f64::from(self.pages_read) / f64::from(self.pages) * 100.0
    }

    pub fn is_finished(&self) -> bool {
        self.pages > 0 && self.pages_read >= self.pages
    }
}

/// Caller-supplied fields for a new record. Identity, progress and
/// timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub author: String,
    pub tag: String,
    pub pages: u32,
    pub date_added: String,
}

/// A shallow, partial update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
    pub pages: Option<u32>,
    pub date_added: Option<String>,
    pub pages_read: Option<u32>,
    pub read_history: Option<Vec<LogEntry>>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.tag.is_none()
            && self.pages.is_none()
            && self.date_added.is_none()
            && self.pages_read.is_none()
            && self.read_history.is_none()
    }

    pub(crate) fn apply_to(self, record: &mut Record) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(author) = self.author {
            record.author = author;
        }
        if let Some(tag) = self.tag {
            record.tag = tag;
        }
        if let Some(pages) = self.pages {
            record.pages = pages;
        }
        if let Some(date_added) = self.date_added {
            record.date_added = date_added;
        }
        if let Some(pages_read) = self.pages_read {
            record.pages_read = pages_read;
        }
        if let Some(read_history) = self.read_history {
            record.read_history = read_history;
        }
    }
}

/// A record as found in storage or in an import file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub pages: Option<u32>,
    /// Signed: earlier versions let corrections push progress below zero.
    #[serde(default, deserialize_with = "lenient_int")]
    pub pages_read: Option<i64>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub read_history: Option<Vec<LogEntry>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// Whether this record predates reading-progress tracking.
    pub fn needs_migration(&self) -> bool {
        self.pages_read.is_none() || self.read_history.is_none()
    }

    /// Normalize into a [`Record`].
    ///
    /// `position` is the 1-based index of the record in its source sequence and
    /// is only used when the record carries no id. Missing timestamps become
    /// `now`; missing progress fields become `0` and an empty history.
    pub fn migrate(self, position: usize, now: DateTime<Utc>) -> Record {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format_record_id(position as u64));
        let pages_read = clamp_pages_read(self.pages_read, &id);
        Record {
            id,
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            tag: self.tag.unwrap_or_default(),
            pages: self.pages.unwrap_or(0),
            pages_read,
            date_added: self.date_added.unwrap_or_default(),
            read_history: self.read_history.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            extra: self.extra,
        }
    }
}

/// Dashboard numbers derived from the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub total_pages: u64,
    pub total_pages_read: u64,
    pub favorite_category: String,
    pub last_interacted: Vec<Record>,
}

fn clamp_pages_read(value: Option<i64>, id: &str) -> u32 {
    let value = value.unwrap_or(0);
    match u32::try_from(value) {
        Ok(v) => v,
        Err(_) if value < 0 => {
            log::warn!("Record {} has {} pages read, reset to 0", id, value);
            0
        }
        Err(_) => {
            log::warn!("Record {} has {} pages read, capped", id, value);
            u32::MAX
        }
    }
}

/// Page counts were stored as raw form values by older versions, so accept
/// `300`, `300.0`, `"300"` and `null`.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient_int(deserializer)? {
        Some(v) => u32::try_from(v)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid page count: {}", v))),
        None => Ok(None),
    }
}

/// Integer from a JSON number or numeric string. `null` and `""` are missing.
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a page count (number or numeric string)")
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(
            self,
            deserializer: D2,
        ) -> std::result::Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(IntVisitor)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            i64::try_from(v).map(Some).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                Ok(Some(v as i64))
            } else {
                Err(E::custom(format!("invalid page count: {}", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid page count: {:?}", v)))
        }
    }

    deserializer.deserialize_option(IntVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_record_ids_with_padding() {
        assert_eq!(format_record_id(1), "rec_0001");
        assert_eq!(format_record_id(42), "rec_0042");
        assert_eq!(format_record_id(12345), "rec_12345");
    }

    #[test]
    fn parses_record_seq() {
        assert_eq!(record_seq("rec_0042"), Some(42));
        assert_eq!(record_seq("rec_12345"), Some(12345));
        assert_eq!(record_seq("rec_abc"), None);
        assert_eq!(record_seq("nonsense"), None);
    }

    #[test]
    fn raw_record_accepts_string_pages() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"id":"rec_0001","title":"Dune","pages":"412"}"#).unwrap();
        assert_eq!(raw.pages, Some(412));
        assert!(raw.needs_migration());
    }

    #[test]
    fn raw_record_treats_null_progress_as_missing() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"id":"rec_0001","pagesRead":null,"readHistory":null}"#)
                .unwrap();
        assert_eq!(raw.pages_read, None);
        assert!(raw.read_history.is_none());
    }

    #[test]
    fn migrate_fills_defaults_and_keeps_unknown_fields() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"id":"rec_0007","title":"Emma","author":"Austen","tag":"Classic","pages":300,"dateAdded":"2024-02-01","shelf":"top"}"#,
        )
        .unwrap();
        let now = Utc::now();
        let record = raw.migrate(1, now);

        assert_eq!(record.id, "rec_0007");
        assert_eq!(record.pages_read, 0);
        assert!(record.read_history.is_empty());
        assert_eq!(record.created_at, now);
        assert_eq!(record.extra.get("shelf"), Some(&Value::from("top")));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["shelf"], "top");
        assert_eq!(json["pagesRead"], 0);
        assert_eq!(json["dateAdded"], "2024-02-01");
    }

    #[test]
    fn migrate_assigns_positional_id_when_missing() {
        let record = RawRecord::default().migrate(3, Utc::now());
        assert_eq!(record.id, "rec_0003");
    }

    #[test]
    fn log_entry_uses_original_field_names() {
        let entry = LogEntry {
            id: format_log_id(1_700_000_000_000),
            book_id: "rec_0001".into(),
            date_iso: Utc::now(),
            delta_pages: 12,
            note: String::new(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "log_1700000000000");
        assert_eq!(json["bookId"], "rec_0001");
        assert_eq!(json["deltaPages"], 12);
        assert!(json.get("dateISO").is_some());
    }

    #[test]
    fn progress_helpers() {
        let mut record = RawRecord::default().migrate(1, Utc::now());
        record.pages = 200;
        record.pages_read = 50;
        assert_eq!(record.progress_percent(), 25.0);
        assert!(!record.is_finished());
        record.pages_read = 200;
        assert!(record.is_finished());
    }

    #[test]
    fn negative_pages_read_loads_as_zero() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"id":"rec_0001","title":"Dune","pages":100,"pagesRead":-5,"readHistory":[]}"#,
        )
        .unwrap();
        assert_eq!(raw.pages_read, Some(-5));
        assert!(!raw.needs_migration());

        let record = raw.migrate(1, Utc::now());
        assert_eq!(record.pages_read, 0);
        assert_eq!(record.title, "Dune");
    }

    #[test]
    fn pages_read_accepts_numeric_strings() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"id":"rec_0001","pages":"90","pagesRead":"-3"}"#).unwrap();
        assert_eq!(raw.pages, Some(90));
        assert_eq!(raw.pages_read, Some(-3));
    }

    #[test]
    fn negative_pages_still_rejected() {
        let result = serde_json::from_str::<RawRecord>(r#"{"id":"rec_0001","pages":-1}"#);
        assert!(result.is_err());
    }
}
