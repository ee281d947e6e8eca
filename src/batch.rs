//! Multi-file processing.
//!
//! [`discover_inputs`] expands command-line style arguments into files, and
//! [`BatchCoordinator`] runs extraction, classification and record building
//! over them one file at a time. A file that cannot be read or parsed is
//! logged, reported to the progress callback and skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::batch::{BatchCoordinator, discover_inputs};
//!
//! let files = discover_inputs(&["exports/*.json", "more_exports/"])?;
//! let output = BatchCoordinator::default().run(&files)?;
//!
//! println!(
//!     "{} unique conversations, {} duplicates removed",
//!     output.records.len(),
//!     output.stats.duplicates_removed
//! );
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::config::{ExtractorConfig, RecordConfig, Taxonomy};
use crate::core::builder::RecordBuilder;
use crate::core::models::ConversationRecord;
use crate::core::processor::{BatchStats, merge_batches};
use crate::error::{ChatsiftError, Result};
use crate::extractor::{Dialect, Extractor};
use crate::progress::{FileOutcome, Progress, ProgressCallback};

/// Expands input arguments into a list of files.
///
/// Each argument is one of:
/// - a directory: every regular file directly inside it, sorted by name
/// - a path whose last component contains `*` or `?`: the matching regular
///   files of its parent directory, sorted by name
/// - anything else: taken as a file path as-is
///
/// A wildcard with no match contributes nothing. A path listed twice is
/// kept once.
pub fn discover_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let found = if has_wildcard(input) {
            expand_wildcard(input)?
        } else if input.is_dir() {
            list_files(input, |_| true)?
        } else {
            vec![input.to_path_buf()]
        };

        for path in found {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn has_wildcard(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(['*', '?']))
}

fn expand_wildcard(path: &Path) -> Result<Vec<PathBuf>> {
    let pattern = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.is_dir() {
        return Ok(Vec::new());
    }

    let matcher = wildcard_regex(pattern)?;
    list_files(parent, |name| matcher.is_match(name))
}

/// Compiles a `*`/`?` wildcard into an anchored regex.
fn wildcard_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');

    Regex::new(&re).map_err(|e| ChatsiftError::invalid_config(format!("bad input pattern '{pattern}': {e}")))
}

fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let keep_it = path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| keep(name));
        if keep_it {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Everything a batch run produced.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Unique records, sorted by date
    pub records: Vec<ConversationRecord>,
    /// Names of the files that were processed successfully
    pub source_files: Vec<String>,
    pub stats: BatchStats,
}

/// Runs the whole pipeline over a list of files.
pub struct BatchCoordinator {
    extractor: Extractor,
    classifier: Classifier,
    builder: RecordBuilder,
    dialect: Dialect,
    progress: Option<ProgressCallback>,
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self {
            extractor: Extractor::default(),
            classifier: Classifier::default(),
            builder: RecordBuilder::default(),
            dialect: Dialect::Auto,
            progress: None,
        }
    }
}

impl BatchCoordinator {
    /// Creates a coordinator from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidConfig`] if the taxonomy is invalid.
    pub fn new(
        extractor_config: ExtractorConfig,
        taxonomy: Taxonomy,
        record_config: RecordConfig,
    ) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(extractor_config),
            classifier: Classifier::new(taxonomy)?,
            builder: RecordBuilder::new(record_config),
            dialect: Dialect::Auto,
            progress: None,
        })
    }

    /// Forces a dialect instead of detecting it per file.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Extracts, classifies and builds the records of one file.
    ///
    /// Records are tagged with the file name. Returns the records and the
    /// number of malformed blocks skipped.
    pub fn process_file(&self, path: &Path) -> Result<(Vec<ConversationRecord>, usize)> {
        let extraction = self.extractor.extract_file(path, self.dialect)?;
        let source = file_label(path);
        let skipped = extraction.skipped_blocks;

        let records: Vec<ConversationRecord> = extraction
            .conversations
            .into_iter()
            .filter_map(|raw| self.builder.classify_and_build(raw, &self.classifier))
            .map(|record| record.with_source_file(source.clone()))
            .collect();

        debug!(
            file = %path.display(),
            dialect = %extraction.dialect,
            records = records.len(),
            skipped,
            "processed file"
        );
        Ok((records, skipped))
    }

    /// Processes every file in order, then merges, deduplicates and sorts.
    ///
    /// # Errors
    ///
    /// Per-file failures are not errors. Returns
    /// [`ChatsiftError::NoConversations`] if no record survives.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchOutput> {
        let total = files.len();
        let mut stats = BatchStats::default();
        let mut batches = Vec::with_capacity(total);
        let mut source_files = Vec::new();

        for (i, path) in files.iter().enumerate() {
            let outcome = match self.process_file(path) {
                Ok((records, skipped)) => {
                    stats.files_processed += 1;
                    stats.records_collected += records.len();
                    stats.skipped_blocks += skipped;
                    source_files.push(file_label(path));

                    let outcome = FileOutcome::Extracted {
                        records: records.len(),
                        skipped_blocks: skipped,
                    };
                    batches.push(records);
                    outcome
                }
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping input file");
                    stats.files_failed += 1;
                    FileOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };

            if let Some(callback) = &self.progress {
                callback(Progress::new(file_label(path), i + 1, total, outcome));
            }
        }

        let (records, duplicates) = merge_batches(batches);
        stats.duplicates_removed = duplicates;
        stats.unique_records = records.len();

        info!(
            files = stats.files_processed,
            failed = stats.files_failed,
            unique = stats.unique_records,
            duplicates = stats.duplicates_removed,
            "batch complete"
        );

        if records.is_empty() {
            return Err(ChatsiftError::NoConversations { inputs: total });
        }

        Ok(BatchOutput {
            records,
            source_files,
            stats,
        })
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[test]
    fn test_wildcard_regex() {
        let re = wildcard_regex("export_*.json").unwrap();
        assert!(re.is_match("export_1.json"));
        assert!(re.is_match("export_.json"));
        assert!(!re.is_match("export_1.jsonl"));
        assert!(!re.is_match("xexport_1.json"));

        let re = wildcard_regex("part?.txt").unwrap();
        assert!(re.is_match("part1.txt"));
        assert!(!re.is_match("part10.txt"));
    }

    #[test]
    fn test_discover_inputs() {
        let dir = tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            fs::write(dir.path().join(name), "[]").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let pattern = dir.path().join("*.json");
        let files = discover_inputs(&[&pattern]).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_label(p)).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let all = discover_inputs(&[dir.path()]).unwrap();
        assert_eq!(all.len(), 3);

        let none = discover_inputs(&[dir.path().join("*.csv")]).unwrap();
        assert!(none.is_empty());

        let dupes = discover_inputs(&[pattern.clone(), dir.path().join("a.json")]).unwrap();
        assert_eq!(dupes.len(), 2);
    }

    #[test]
    fn test_run_dedups_across_files_and_reports_progress() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.txt");
        let bad = dir.path().join("bad.json");

        fs::write(
            &a,
            r#"[{"title": "Plan", "create_time": 1704067200,
                 "messages": ["Outline the launch strategy for next quarter"]}]"#,
        )
        .unwrap();
        fs::write(
            &b,
            r#"junk "title": "Plan", "create_time": 1704067200, "parts": ["A different copy of the same conversation"]
               "title": "Undated", "parts": ["Nothing dated in this one at all"]"#,
        )
        .unwrap();
        fs::write(&bad, "[{").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let coordinator = BatchCoordinator::default().with_progress(Arc::new(move |p: Progress| {
            seen_clone.lock().unwrap().push(p);
        }));

        let output = coordinator.run(&[a, bad, b]).unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].title, "Plan");
        assert_eq!(output.records[0].source_file.as_deref(), Some("a.json"));
        assert_eq!(output.records[1].title, "Undated");
        assert_eq!(output.stats.files_processed, 2);
        assert_eq!(output.stats.files_failed, 1);
        assert_eq!(output.stats.duplicates_removed, 1);
        assert_eq!(output.source_files, vec!["a.json", "b.txt"]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[1].is_failure());
        assert!(seen[2].is_complete());
    }

    #[test]
    fn test_run_with_nothing_is_empty_result() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "no conversations here").unwrap();

        let err = BatchCoordinator::default().run(&[empty]).unwrap_err();
        assert!(err.is_empty_result());
    }
}
