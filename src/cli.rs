//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`DialectArg`] - The `--dialect` values
//!
//! # Example
//!
//! ```rust
//! use chatsift::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatsift", "export.json", "-o", "archive", "--merge"]);
//! assert_eq!(args.output, "archive");
//! assert!(args.merge);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ExtractorConfig, OutputConfig, RecordConfig};
use crate::extractor::Dialect;

/// Extract and classify conversations from chat exports into
/// import-ready CSV chunks and a JSON report.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift conversations.json
    chatsift export.txt -o archive
    chatsift 'exports/*.json' --merge
    chatsift exports/ --dialect raw --chunk-size 250
    chatsift conversations.json --taxonomy taxonomy.json --creator \"Research Team\"")]
pub struct Args {
    /// Input files, directories or wildcard paths
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Prefix for output files
    #[arg(short, long, default_value = "gemini_ready")]
    pub output: String,

    /// Export dialect
    #[arg(short, long, value_enum, default_value = "auto")]
    pub dialect: DialectArg,

    /// Maximum rows per CSV chunk
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: u64,

    /// Also write every record to <OUTPUT>_merged.csv
    #[arg(short, long)]
    pub merge: bool,

    /// Load the taxonomy from a JSON file
    #[arg(long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Value of the creator column
    #[arg(long)]
    pub creator: Option<String>,

    /// Only run the value/content passes when the parts pass finds nothing
    #[arg(long)]
    pub fallback_passes: bool,

    /// Skip writing <OUTPUT>_report.json
    #[arg(long)]
    pub no_report: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors, no progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::new().with_fallback_passes(self.fallback_passes)
    }

    pub fn record_config(&self) -> RecordConfig {
        match &self.creator {
            Some(creator) => RecordConfig::new().with_creator(creator.clone()),
            None => RecordConfig::new(),
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new()
            .with_prefix(self.output.clone())
            .with_chunk_size(usize::try_from(self.chunk_size).unwrap_or(usize::MAX))
            .with_merge(self.merge)
            .with_report(!self.no_report)
    }
}

/// Values accepted by `--dialect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum DialectArg {
    /// Detect from the first character of each file
    #[default]
    Auto,

    /// JSON array of conversations
    #[value(alias = "array")]
    JsonArray,

    /// Single JSON conversation object
    #[value(alias = "object")]
    JsonObject,

    /// Text resembling JSON, split on title markers
    #[value(alias = "raw", alias = "text")]
    RawText,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Auto => Dialect::Auto,
            DialectArg::JsonArray => Dialect::JsonArray,
            DialectArg::JsonObject => Dialect::JsonObject,
            DialectArg::RawText => Dialect::RawText,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["chatsift", "a.json"]);
        assert_eq!(args.output, "gemini_ready");
        assert_eq!(args.dialect, DialectArg::Auto);
        assert_eq!(args.chunk_size, 500);
        assert!(!args.merge);

        let output = args.output_config();
        assert_eq!(output.chunk_size, 500);
        assert!(output.report);
        assert_eq!(args.record_config().creator, "chatsift");
    }

    #[test]
    fn test_multiple_inputs_and_flags() {
        let args = Args::parse_from([
            "chatsift",
            "a.json",
            "dir/",
            "--dialect",
            "raw",
            "--chunk-size",
            "10",
            "--creator",
            "Team",
            "--fallback-passes",
            "--no-report",
        ]);
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(Dialect::from(args.dialect), Dialect::RawText);
        assert_eq!(args.output_config().chunk_size, 10);
        assert!(!args.output_config().report);
        assert_eq!(args.record_config().creator, "Team");
        assert!(args.extractor_config().fallback_passes);
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        assert!(Args::try_parse_from(["chatsift", "a.json", "--chunk-size", "0"]).is_err());
    }

    #[test]
    fn test_requires_input() {
        assert!(Args::try_parse_from(["chatsift"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["chatsift", "a.json", "-v", "-q"]).is_err());
    }
}
