//! Assembly of [`ConversationRecord`]s from extractor and classifier output.
//!
//! # Example
//!
//! ```rust
//! use chatsift::RawConversation;
//! use chatsift::classifier::Classifier;
//! use chatsift::config::{RecordConfig, Taxonomy};
//! use chatsift::core::builder::RecordBuilder;
//! use chatsift::core::DateSource;
//!
//! let classifier = Classifier::new(Taxonomy::default())?;
//! let builder = RecordBuilder::new(RecordConfig::default());
//!
//! let raw = RawConversation::new("Launch plan").with_create_time(1700000000.0);
//! let record = builder.classify_and_build(raw, &classifier).unwrap();
//!
//! assert_eq!(record.date, "2023-11-14");
//! assert_eq!(record.date_source, DateSource::Exact);
//! assert!(record.url.starts_with("https://chat.openai.com/c/"));
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::models::{ConversationRecord, DateSource};
use crate::RawConversation;
use crate::classifier::{Classification, Classifier, truncate_chars};
use crate::config::RecordConfig;
use crate::parsing::unescape;

static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-–—:,.()]").expect("title noise regex"));

/// Hex characters of the title digest used in the URL.
const URL_ID_LEN: usize = 12;

/// Turns classified conversations into output records.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    config: RecordConfig,
}

impl RecordBuilder {
    pub fn new(config: RecordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    /// Cleans a raw title, or returns `None` if the conversation should be
    /// dropped (empty or placeholder title, before or after cleaning).
    pub fn clean_title(&self, raw_title: &str) -> Option<String> {
        if self.is_placeholder(raw_title) {
            return None;
        }

        let decoded = unescape(raw_title);
        let stripped = TITLE_NOISE.replace_all(&decoded, "");
        let cleaned = truncate_chars(stripped.trim(), self.config.max_title_chars)
            .trim_end()
            .to_string();

        (!self.is_placeholder(&cleaned)).then_some(cleaned)
    }

    fn is_placeholder(&self, title: &str) -> bool {
        title.trim().is_empty() || self.config.placeholder_titles.iter().any(|p| p == title)
    }

    /// Assembles a record, or `None` if the title disqualifies it.
    ///
    /// A missing update time falls back to the create time.
    pub fn build(
        &self,
        raw: RawConversation,
        classification: Classification,
    ) -> Option<ConversationRecord> {
        let title = self.clean_title(&raw.title)?;
        let (date, date_source) = date_from_timestamp(raw.create_time);
        let url = format!("{}{}", self.config.url_base, title_digest(&title));

        Some(ConversationRecord {
            create_timestamp: raw.create_time,
            update_timestamp: raw.update_time.or(raw.create_time),
            date,
            date_source,
            message_volume: raw.messages.len(),
            messages: raw.messages,
            description: classification.description,
            categories: classification.categories,
            tags: classification.tags,
            relevance_score: classification.relevance_score,
            source_file: None,
            creator: self.config.creator.clone(),
            kind: self.config.kind.clone(),
            url,
            title,
        })
    }

    /// Classifies and builds in one step. Conversations with a
    /// disqualifying title are not classified.
    pub fn classify_and_build(
        &self,
        raw: RawConversation,
        classifier: &Classifier,
    ) -> Option<ConversationRecord> {
        if self.clean_title(&raw.title).is_none() {
            return None;
        }
        let classification = classifier.classify(&unescape(&raw.title), &raw.messages);
        self.build(raw, classification)
    }
}

/// Converts an epoch-seconds create time to a UTC `YYYY-MM-DD` date.
///
/// Absent, zero, non-finite or out-of-range values give an empty date and
/// [`DateSource::Missing`].
pub fn date_from_timestamp(timestamp: Option<f64>) -> (String, DateSource) {
    let date = timestamp
        .filter(|ts| ts.is_finite() && *ts != 0.0)
        .and_then(|ts| DateTime::from_timestamp(ts.floor() as i64, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string());

    match date {
        Some(date) => (date, DateSource::Exact),
        None => (String::new(), DateSource::Missing),
    }
}

/// First 12 hex characters of the SHA-256 of `title`.
pub fn title_digest(title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(URL_ID_LEN);
    id
}
