//! The finished output record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a record's `date` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Converted from a parsed create time
    Exact,
    /// No usable create time; `date` is empty
    Missing,
}

impl DateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateSource::Exact => "exact",
            DateSource::Missing => "missing",
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified conversation, ready for tabular output.
///
/// Built by [`RecordBuilder`](crate::core::builder::RecordBuilder), which
/// guarantees:
///
/// - `title` is non-empty and not a placeholder
/// - `date` is non-empty exactly when `date_source` is [`DateSource::Exact`]
/// - `categories` and `tags` are non-empty
/// - `relevance_score` lies in `[0.1, 1.0]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_timestamp: Option<f64>,
    /// `YYYY-MM-DD` in UTC, or empty
    pub date: String,
    pub date_source: DateSource,
    pub messages: Vec<String>,
    pub description: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub relevance_score: f64,
    pub message_volume: usize,
    /// File name of origin, set in batch mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub creator: String,
    /// Emitted as the `type` column
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl ConversationRecord {
    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }

    /// Key used to sort by date; missing dates sort last.
    pub fn sort_key(&self) -> &str {
        if self.date.is_empty() {
            MISSING_DATE_SENTINEL
        } else {
            &self.date
        }
    }

    /// `YYYY-MM` of the record's date, if it has one.
    pub fn month(&self) -> Option<&str> {
        self.date.get(..7)
    }

    /// Tags the record with its file of origin.
    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }
}

/// Sorts after every real `YYYY-MM-DD` date.
pub const MISSING_DATE_SENTINEL: &str = "9999-99-99";
