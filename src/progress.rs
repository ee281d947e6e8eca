//! Progress reporting for batch runs.
//!
//! The batch coordinator pushes a [`Progress`] update after every input
//! file, successful or not. Library users plug in a [`ProgressCallback`];
//! the CLI prints one line per file.
//!
//! # Example
//!
//! ```rust
//! use chatsift::progress::{FileOutcome, Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("[{}/{}] {}", progress.files_done, progress.total_files, progress.file);
//! });
//!
//! callback(Progress::new(
//!     "export.json",
//!     1,
//!     3,
//!     FileOutcome::Extracted { records: 12, skipped_blocks: 0 },
//! ));
//! ```

use std::sync::Arc;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was processed
    Extracted {
        /// Records built from the file
        records: usize,
        /// Malformed blocks or entries skipped inside the file
        skipped_blocks: usize,
    },
    /// The file was skipped
    Failed {
        /// Why the file was skipped
        error: String,
    },
}

/// Progress after one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Name of the file just handled.
    pub file: String,

    /// Number of files handled so far, including this one.
    pub files_done: usize,

    /// Number of files in the batch.
    pub total_files: usize,

    /// Outcome for this file.
    pub outcome: FileOutcome,
}

impl Progress {
    /// Creates a new progress instance.
    pub fn new(
        file: impl Into<String>,
        files_done: usize,
        total_files: usize,
        outcome: FileOutcome,
    ) -> Self {
        Self {
            file: file.into(),
            files_done,
            total_files,
            outcome,
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatsift::progress::{FileOutcome, Progress};
    ///
    /// let outcome = FileOutcome::Extracted { records: 1, skipped_blocks: 0 };
    /// let progress = Progress::new("a.json", 1, 4, outcome);
    /// assert_eq!(progress.percentage(), 25.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            100.0
        } else {
            (self.files_done as f64 / self.total_files as f64) * 100.0
        }
    }

    /// Returns whether every file has been handled.
    pub fn is_complete(&self) -> bool {
        self.files_done >= self.total_files
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
///
/// # Example
///
/// ```rust
/// use chatsift::progress::{FileOutcome, Progress, no_progress};
///
/// let callback = no_progress();
/// callback(Progress::new("a.json", 1, 1, FileOutcome::Failed { error: "bad".into() }));
/// ```
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints one line per file to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| match &progress.outcome {
        FileOutcome::Extracted {
            records,
            skipped_blocks,
        } => {
            eprint!(
                "[{}/{}] {}: {} conversations",
                progress.files_done, progress.total_files, progress.file, records
            );
            if *skipped_blocks > 0 {
                eprint!(" ({} malformed blocks skipped)", skipped_blocks);
            }
            eprintln!();
        }
        FileOutcome::Failed { error } => {
            eprintln!(
                "[{}/{}] {}: skipped ({})",
                progress.files_done, progress.total_files, progress.file, error
            );
        }
    })
}
