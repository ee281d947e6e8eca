//! Record assembly, batch policy and output.
//!
//! This module contains:
//! - [`models`] - The output record and its date source
//! - [`builder`] - Title cleaning, dates and URLs for each record
//! - [`processor`] - Deduplication, date ordering and batch counters
//! - [`report`] - Summary statistics
//! - [`output`] - CSV and JSON writers

pub mod builder;
pub mod models;
pub mod output;
pub mod processor;
pub mod report;

pub use builder::{RecordBuilder, date_from_timestamp, title_digest};
pub use models::{ConversationRecord, DateSource, MISSING_DATE_SENTINEL};
pub use output::{to_csv, to_json, write_csv, write_csv_chunks, write_report};
pub use processor::{BatchStats, dedup_records, merge_batches, sort_by_date};
pub use report::Report;
