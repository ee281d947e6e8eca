//! Conversation extraction from export files.
//!
//! This module is the single entry point for turning export text into
//! [`RawConversation`]s. The [`Dialect`] enum selects a parser, either
//! explicitly or by sniffing the first character of the content.
//!
//! # Example
//!
//! ```rust
//! use chatsift::extractor::{Dialect, Extractor};
//!
//! let content = r#"[{"title": "Launch plan", "create_time": 1700000000,
//!     "messages": ["We need a checklist for the product launch next week"]}]"#;
//!
//! let extraction = Extractor::default().extract_str(content)?;
//! assert_eq!(extraction.dialect, Dialect::JsonArray);
//! assert_eq!(extraction.conversations[0].title, "Launch plan");
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! # Dialect selection
//!
//! ```rust
//! use chatsift::extractor::Dialect;
//!
//! assert_eq!(Dialect::detect("  [{}]"), Dialect::JsonArray);
//! assert_eq!(Dialect::detect("{}"), Dialect::JsonObject);
//! assert_eq!(Dialect::detect("\"title\": \"x\""), Dialect::RawText);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RawConversation;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::parsing::{JsonParser, RawTextParser};

/// Export dialects understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Decide from the content's first non-whitespace character
    #[default]
    Auto,
    /// A JSON array of conversation objects
    #[serde(alias = "array")]
    JsonArray,
    /// A single JSON conversation object
    #[serde(alias = "object")]
    JsonObject,
    /// Text resembling JSON, split on `"title": "` markers
    #[serde(alias = "raw", alias = "text")]
    RawText,
}

impl Dialect {
    /// Picks a concrete dialect for `content`.
    ///
    /// A leading UTF-8 BOM and whitespace are ignored. `[` means a JSON
    /// array, `{` a JSON object, anything else raw text. Never returns
    /// [`Dialect::Auto`].
    pub fn detect(content: &str) -> Self {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        match trimmed.chars().next() {
            Some('[') => Dialect::JsonArray,
            Some('{') => Dialect::JsonObject,
            _ => Dialect::RawText,
        }
    }

    /// Returns `self`, or the detected dialect when `self` is `Auto`.
    pub fn resolve(self, content: &str) -> Self {
        match self {
            Dialect::Auto => Self::detect(content),
            other => other,
        }
    }

    /// Returns all dialect names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "auto",
            "json-array",
            "array",
            "json-object",
            "object",
            "raw-text",
            "raw",
            "text",
        ]
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Auto => write!(f, "auto"),
            Dialect::JsonArray => write!(f, "JSON array"),
            Dialect::JsonObject => write!(f, "JSON object"),
            Dialect::RawText => write!(f, "raw text"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Dialect::Auto),
            "json-array" | "array" => Ok(Dialect::JsonArray),
            "json-object" | "object" => Ok(Dialect::JsonObject),
            "raw-text" | "raw" | "text" => Ok(Dialect::RawText),
            _ => Err(format!(
                "Unknown dialect: '{}'. Expected one of: {}",
                s,
                Dialect::all_names().join(", ")
            )),
        }
    }
}

/// What one parser run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The dialect that was actually parsed
    pub dialect: Dialect,
    /// Conversations in order of appearance
    pub conversations: Vec<RawConversation>,
    /// Blocks or entries that were skipped as malformed
    pub skipped_blocks: usize,
}

impl Extraction {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            conversations: Vec::new(),
            skipped_blocks: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

/// A parser for one concrete dialect.
///
/// Implementations recover what they can: a malformed block or entry is
/// logged and counted in [`Extraction::skipped_blocks`]. Only a failure of
/// the file as a whole (for example invalid JSON) is returned as an error.
pub trait ConversationParser: Send + Sync {
    /// Human-readable name used in error messages.
    fn name(&self) -> &'static str;

    /// The dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Parses export content held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Parse`](crate::ChatsiftError::Parse) if the
    /// content cannot be parsed at all.
    fn parse_str(&self, content: &str) -> Result<Extraction>;
}

/// Creates the parser for a concrete dialect.
///
/// `Dialect::Auto` has no parser of its own and falls back to raw text,
/// which accepts any input; resolve it first with [`Dialect::resolve`].
pub fn create_parser(dialect: Dialect, config: ExtractorConfig) -> Box<dyn ConversationParser> {
    match dialect {
        Dialect::JsonArray => Box::new(JsonParser::array(config)),
        Dialect::JsonObject => Box::new(JsonParser::object(config)),
        Dialect::RawText | Dialect::Auto => Box::new(RawTextParser::new(config)),
    }
}

/// Reads export files and strings into conversations.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts conversations, detecting the dialect.
    pub fn extract_str(&self, content: &str) -> Result<Extraction> {
        self.extract_with(content, Dialect::Auto)
    }

    /// Extracts conversations using `dialect` (or detection for `Auto`).
    pub fn extract_with(&self, content: &str, dialect: Dialect) -> Result<Extraction> {
        let dialect = dialect.resolve(content);
        let content = content.trim_start_matches('\u{feff}');
        let parser = create_parser(dialect, self.config.clone());
        let extraction = parser.parse_str(content)?;

        debug!(
            dialect = %extraction.dialect,
            conversations = extraction.len(),
            skipped = extraction.skipped_blocks,
            "extracted conversations"
        );
        Ok(extraction)
    }

    /// Reads `path` and extracts its conversations.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a parse error
    /// (carrying the path) if its content cannot be parsed.
    pub fn extract_file(&self, path: impl AsRef<Path>, dialect: Dialect) -> Result<Extraction> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        self.extract_with(&content, dialect)
            .map_err(|err| err.with_path(path))
    }
}
