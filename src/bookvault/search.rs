//! # Search and Sort
//!
//! Filtering, match highlighting and ordering over a slice of records. These
//! are pure functions; they never touch the store.
//!
//! Queries are matched against a record's title, author and tag. In basic
//! mode the query is escaped and matched literally; in advanced mode it is
//! compiled as a regular expression. Matching ignores case unless
//! [`SearchOptions::case_sensitive`] is set.

use crate::error::{Result, VaultError};
use crate::model::Record;
use chrono::{DateTime, NaiveDate};
use regex::{Captures, Regex, RegexBuilder};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    /// Treat the query as a regular expression.
    pub advanced: bool,
}

fn build_pattern(query: &str, options: SearchOptions) -> Result<Regex> {
    let source = if options.advanced {
        query.to_string()
    } else {
        regex::escape(query)
    };
    RegexBuilder::new(&source)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|e| VaultError::InvalidPattern(e.to_string()))
}

/// Records whose title, author or tag match `query`, in their original order.
///
/// An empty query returns every record.
pub fn search_records(
    records: &[Record],
    query: &str,
    options: SearchOptions,
) -> Result<Vec<Record>> {
    if query.is_empty() {
        return Ok(records.to_vec());
    }
    let pattern = build_pattern(query, options)?;
    Ok(records
        .iter()
        .filter(|r| {
            pattern.is_match(&r.title) || pattern.is_match(&r.author) || pattern.is_match(&r.tag)
        })
        .cloned()
        .collect())
}

/// Replace every match of `query` in `text` with `wrap(match)`.
///
/// Returns `text` unchanged for an empty query or an invalid pattern.
pub fn highlight_matches<F>(text: &str, query: &str, options: SearchOptions, wrap: F) -> String
where
    F: Fn(&str) -> String,
{
    if query.is_empty() || text.is_empty() {
        return text.to_string();
    }
    match build_pattern(query, options) {
        Ok(pattern) => pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                if matched.is_empty() {
                    String::new()
                } else {
                    wrap(matched)
                }
            })
            .into_owned(),
        Err(_) => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    Tag,
    Pages,
    #[default]
    DateAdded,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "tag" => Ok(SortField::Tag),
            "pages" => Ok(SortField::Pages),
            "dateAdded" | "date-added" | "date" => Ok(SortField::DateAdded),
            "updatedAt" | "updated-at" | "updated" => Ok(SortField::UpdatedAt),
            other => Err(format!(
                "Unknown sort field '{}', expected one of: title, author, tag, pages, date, updated",
                other
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Tag => "tag",
            SortField::Pages => "pages",
            SortField::DateAdded => "dateAdded",
            SortField::UpdatedAt => "updatedAt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// `dateAdded` is free text: accept `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        SortField::Tag => a.tag.to_lowercase().cmp(&b.tag.to_lowercase()),
        SortField::Pages => a.pages.cmp(&b.pages),
        SortField::DateAdded => parse_date(&a.date_added).cmp(&parse_date(&b.date_added)),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Stable sorted copy of `records`. Unparseable dates sort before valid ones.
pub fn sort_records(records: &[Record], field: SortField, direction: SortDirection) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}
