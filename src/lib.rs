//! # Chatsift
//!
//! A Rust library for extracting and classifying conversations from chat
//! assistant exports, producing tabular records ready for import into an
//! analysis tool.
//!
//! ## Overview
//!
//! Exports come in three shapes:
//! - **JSON array** of conversation objects
//! - **JSON object** holding a single conversation
//! - **Raw text** that resembles JSON but does not parse (truncated dumps,
//!   concatenated files, copy-pasted fragments)
//!
//! For each conversation the library recovers the title, timestamps and
//! the human-written message text, then derives a description, categories,
//! tags and a relevance score with a keyword-table classifier.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! let content = r#""title": "Test", "create_time": 1700000000,
//!     "parts": ["A message over twenty chars long for sure"]"#;
//!
//! let extraction = Extractor::default().extract_str(content)?;
//! let classifier = Classifier::new(Taxonomy::default())?;
//! let builder = RecordBuilder::default();
//!
//! let records: Vec<ConversationRecord> = extraction
//!     .conversations
//!     .into_iter()
//!     .filter_map(|raw| builder.classify_and_build(raw, &classifier))
//!     .collect();
//!
//! assert_eq!(records[0].date, "2023-11-14");
//! let csv = to_csv(&records)?;
//! assert!(csv.starts_with("name,description,category,tags"));
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! ## Batch Processing
//!
//! ```rust,no_run
//! use chatsift::prelude::*;
//!
//! let files = discover_inputs(&["exports/*.json"])?;
//! let output = BatchCoordinator::default().run(&files)?;
//!
//! let config = OutputConfig::new().with_prefix("archive");
//! write_csv_chunks(&output.records, &config)?;
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`extractor`]: [`Dialect`](extractor::Dialect), [`Extractor`](extractor::Extractor)
//!   and the [`ConversationParser`](extractor::ConversationParser) trait
//! - [`parsing`]: the JSON and raw-text parsers and [`unescape`](parsing::unescape)
//! - [`classifier`]: [`Classifier`](classifier::Classifier) and its rule helpers
//! - [`core`]: records, record building, dedup/sort policy, report and writers
//! - [`batch`]: input discovery and the [`BatchCoordinator`](batch::BatchCoordinator)
//! - [`config`]: [`ExtractorConfig`], [`Taxonomy`](config::Taxonomy),
//!   [`RecordConfig`](config::RecordConfig), [`OutputConfig`](config::OutputConfig)
//! - [`progress`]: per-file progress callbacks
//! - [`error`]: [`ChatsiftError`], [`Result`]
//! - [`prelude`]: Convenient re-exports

pub mod batch;
pub mod classifier;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod extractor;
pub mod parsing;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use config::ExtractorConfig;
pub use conversation::RawConversation;
pub use core::models::{ConversationRecord, DateSource};
pub use error::{ChatsiftError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ConversationRecord, DateSource, RawConversation};

    pub use crate::error::{ChatsiftError, Result};

    pub use crate::config::{ExtractorConfig, OutputConfig, RecordConfig, Taxonomy};

    pub use crate::extractor::{ConversationParser, Dialect, Extraction, Extractor};

    pub use crate::classifier::{Classification, Classifier};

    pub use crate::core::builder::RecordBuilder;
    pub use crate::core::processor::{BatchStats, dedup_records, merge_batches, sort_by_date};
    pub use crate::core::report::Report;

    pub use crate::core::output::{to_csv, to_json, write_csv, write_csv_chunks, write_report};

    pub use crate::batch::{BatchCoordinator, BatchOutput, discover_inputs};
}
