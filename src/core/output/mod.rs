//! Output writers.
//!
//! - [`write_csv_chunks`] - the record set split into `<prefix>_chunk_NNN.csv` files
//! - [`write_csv`] / [`to_csv`] - every record in one CSV (the merged file)
//! - [`write_report`] / [`to_json`] - the JSON summary report
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::config::OutputConfig;
//! use chatsift::core::output::{write_csv_chunks, write_report};
//! use chatsift::core::report::Report;
//!
//! let records = vec![];
//! let config = OutputConfig::new().with_prefix("archive");
//!
//! let chunks = write_csv_chunks(&records, &config)?;
//! write_report(&Report::from_records(&records), &config.report_path())?;
//! # Ok(())
//! # }
//! ```

mod csv_writer;
mod json_writer;

pub use csv_writer::{CSV_HEADER, to_csv, write_csv, write_csv_chunks};
pub use json_writer::{to_json, write_report};
