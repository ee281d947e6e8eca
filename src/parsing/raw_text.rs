//! Raw-text dialect: exports that look like JSON but don't parse as JSON.
//!
//! The file is cut on every `"title": "` marker. Each piece after the first
//! is one conversation block; everything inside it is recovered with
//! independent regex passes rather than a real parse, so truncated or
//! concatenated dumps still yield their messages.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::unescape;
use crate::RawConversation;
use crate::config::ExtractorConfig;
use crate::error::{ChatsiftError, Result};
use crate::extractor::{ConversationParser, Dialect, Extraction};

// String literal bodies are matched as `((?:[^"\\]|\\.)*)"` so that an
// escaped quote does not end the literal.

static BLOCK_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title":\s*""#).expect("boundary regex"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\A((?:[^"\\]|\\.)+)""#).expect("title regex"));

static PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"parts":\s*\[\s*"((?:[^"\\]|\\.)*)""#).expect("parts regex")
});

static VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"value":\s*"((?:[^"\\]|\\.)*)""#).expect("value regex")
});

static CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"content":\s*"((?:[^"\\]|\\.)*)""#).expect("content regex")
});

static CREATE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""create_time":\s*([\d.]+)"#).expect("create_time regex"));

static UPDATE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""update_time":\s*([\d.]+)"#).expect("update_time regex"));

/// Parser for the raw-text dialect.
pub struct RawTextParser {
    config: ExtractorConfig,
}

impl RawTextParser {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }
}

impl Default for RawTextParser {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl ConversationParser for RawTextParser {
    fn name(&self) -> &'static str {
        "raw text"
    }

    fn dialect(&self) -> Dialect {
        Dialect::RawText
    }

    fn parse_str(&self, content: &str) -> Result<Extraction> {
        let mut extraction = Extraction::new(Dialect::RawText);

        for (i, block) in split_blocks(content).enumerate() {
            let index = i + 1;
            match parse_block(block, index, &self.config) {
                Ok(Some(conversation)) => extraction.conversations.push(conversation),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "skipping conversation block");
                    extraction.skipped_blocks += 1;
                }
            }
        }

        Ok(extraction)
    }
}

/// Splits `content` into conversation blocks.
///
/// Text before the first `"title": "` marker is not a block. Each block
/// starts right after the opening quote of its title.
pub fn split_blocks(content: &str) -> impl Iterator<Item = &str> {
    BLOCK_BOUNDARY.split(content).skip(1)
}

/// Recovers one conversation from a block.
///
/// Returns `Ok(None)` when the title has no terminating quote, and an
/// [`MalformedBlock`](ChatsiftError::MalformedBlock) error when a timestamp
/// is present but not a number.
pub fn parse_block(
    block: &str,
    index: usize,
    config: &ExtractorConfig,
) -> Result<Option<RawConversation>> {
    let Some(title) = TITLE.captures(block).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    let conversation = RawConversation {
        title: title.as_str().to_string(),
        create_time: find_timestamp(&CREATE_TIME, "create_time", block, index)?,
        update_time: find_timestamp(&UPDATE_TIME, "update_time", block, index)?,
        messages: extract_messages(block, config),
    };

    Ok(Some(conversation))
}

fn find_timestamp(pattern: &Regex, key: &str, block: &str, index: usize) -> Result<Option<f64>> {
    let Some(raw) = pattern.captures(block).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    raw.as_str().parse::<f64>().map(Some).map_err(|_| {
        ChatsiftError::malformed_block(index, format!("invalid {key} '{}'", raw.as_str()))
    })
}

/// Runs the `parts`, `value` and `content` passes over a block.
///
/// Results are concatenated in pass order without deduplication. With
/// [`ExtractorConfig::fallback_passes`] the last two passes only run when
/// the first produced nothing.
pub fn extract_messages(block: &str, config: &ExtractorConfig) -> Vec<String> {
    let mut messages = run_pass(&PARTS, block, config);

    if config.fallback_passes && !messages.is_empty() {
        return messages;
    }

    messages.extend(run_pass(&VALUE, block, config));
    messages.extend(run_pass(&CONTENT, block, config));
    messages
}

fn run_pass(pattern: &Regex, block: &str, config: &ExtractorConfig) -> Vec<String> {
    pattern
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .filter(|msg| config.accepts(msg))
        .collect()
}
