//! # Commands
//!
//! One module per user-facing operation. Each `run` function takes the store
//! (and whatever arguments it needs), performs the operation, and returns a
//! [`CmdResult`] describing what happened. Commands never print.
//!
//! Mutating commands check the store for an unsaved collection afterwards
//! (see [`helpers::report_persist_error`]) and turn it into a warning.

use crate::model::{Record, Stats};
use crate::settings::Settings;

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod progress;
pub mod stats;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created or changed by the command.
    pub affected_records: Vec<Record>,
    /// Records to display, in display order.
    pub listed_records: Vec<Record>,
    pub stats: Option<Stats>,
    pub settings: Option<Settings>,
    /// Exported JSON when no output file was given.
    pub export: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
