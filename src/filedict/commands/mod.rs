//! # Command Layer
//!
//! Business logic for every user-facing operation. Commands take a
//! [`DictionaryCollection`](crate::collection::DictionaryCollection) and plain Rust
//! arguments, and return a [`CmdResult`]. They never print.

use crate::config::FiledictConfig;
use chrono::{DateTime, Utc};
use serde_json::Value;

pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod records;

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

/// One line of `list` output
#[derive(Debug, Clone)]
pub struct DictionarySummary {
    pub name: String,
    pub records: usize,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub dictionaries: Vec<DictionarySummary>,
    /// Records as JSON, whatever the dictionary's value type
    pub records: Vec<(String, Value)>,
    pub config: Option<FiledictConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_dictionaries(mut self, dictionaries: Vec<DictionarySummary>) -> Self {
        self.dictionaries = dictionaries;
        self
    }

    pub fn with_records(mut self, records: Vec<(String, Value)>) -> Self {
        self.records = records;
        self
    }

    pub fn with_config(mut self, config: FiledictConfig) -> Self {
        self.config = Some(config);
        self
    }
}
