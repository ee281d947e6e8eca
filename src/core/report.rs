//! Summary statistics over a record set.
//!
//! A [`Report`] is what ends up in `<prefix>_report.json`. Batch runs add a
//! [`BatchSection`] with per-file and per-month counts.
//!
//! # Example
//!
//! ```rust
//! use chatsift::core::report::Report;
//!
//! let report = Report::from_records(&[]);
//! assert_eq!(report.total_conversations, 0);
//! assert!(report.date_range.earliest.is_none());
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::models::ConversationRecord;
use super::processor::BatchStats;

/// Number of tags listed in [`Report::top_tags`].
pub const TOP_TAGS: usize = 20;
/// Number of project categories listed in [`BatchSection::top_projects`].
pub const TOP_PROJECTS: usize = 10;

/// Whole-run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_conversations: usize,
    pub date_range: DateRange,
    pub missing_dates: usize,
    pub categories_distribution: BTreeMap<String, usize>,
    pub top_tags: Vec<LabelCount>,
    pub relevance_distribution: RelevanceDistribution,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub batch: Option<BatchSection>,
}

/// Earliest and latest record dates; both `None` when no record has a date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// Three-bucket relevance histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceDistribution {
    /// score >= 0.8
    pub high: usize,
    /// 0.5 <= score < 0.8
    pub medium: usize,
    /// score < 0.5
    pub low: usize,
}

impl RelevanceDistribution {
    pub fn add(&mut self, score: f64) {
        if score >= 0.8 {
            self.high += 1;
        } else if score >= 0.5 {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Extra statistics for multi-file runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSection {
    /// RFC 3339 time the report was generated
    pub processing_date: String,
    pub source_files: Vec<String>,
    pub by_source_file: BTreeMap<String, usize>,
    /// Records per `YYYY-MM`
    pub by_month: BTreeMap<String, usize>,
    pub top_projects: Vec<LabelCount>,
    pub files_processed: usize,
    pub files_failed: usize,
    pub duplicates_removed: usize,
    pub skipped_blocks: usize,
}

impl Report {
    /// Computes the summary of `records`.
    pub fn from_records(records: &[ConversationRecord]) -> Self {
        let mut categories_distribution = BTreeMap::new();
        let mut relevance_distribution = RelevanceDistribution::default();
        let mut date_range = DateRange::default();
        let mut missing_dates = 0;

        for record in records {
            for category in &record.categories {
                *categories_distribution.entry(category.clone()).or_insert(0) += 1;
            }
            relevance_distribution.add(record.relevance_score);

            if record.has_date() {
                let date = &record.date;
                if date_range.earliest.as_ref().is_none_or(|e| date < e) {
                    date_range.earliest = Some(date.clone());
                }
                if date_range.latest.as_ref().is_none_or(|l| date > l) {
                    date_range.latest = Some(date.clone());
                }
            } else {
                missing_dates += 1;
            }
        }

        let top_tags = most_common(records.iter().flat_map(|r| r.tags.iter()), TOP_TAGS);

        Self {
            total_conversations: records.len(),
            date_range,
            missing_dates,
            categories_distribution,
            top_tags,
            relevance_distribution,
            batch: None,
        }
    }

    /// Adds the batch section for a multi-file run.
    #[must_use]
    pub fn with_batch(
        mut self,
        records: &[ConversationRecord],
        source_files: &[String],
        stats: &BatchStats,
    ) -> Self {
        let mut by_source_file = BTreeMap::new();
        let mut by_month = BTreeMap::new();

        for record in records {
            if let Some(source) = &record.source_file {
                *by_source_file.entry(source.clone()).or_insert(0) += 1;
            }
            if let Some(month) = record.month() {
                *by_month.entry(month.to_string()).or_insert(0) += 1;
            }
        }

        let projects = records
            .iter()
            .flat_map(|r| r.categories.iter())
            .filter(|c| c.contains("Project"));

        self.batch = Some(BatchSection {
            processing_date: Utc::now().to_rfc3339(),
            source_files: source_files.to_vec(),
            by_source_file,
            by_month,
            top_projects: most_common(projects, TOP_PROJECTS),
            files_processed: stats.files_processed,
            files_failed: stats.files_failed,
            duplicates_removed: stats.duplicates_removed,
            skipped_blocks: stats.skipped_blocks,
        });
        self
    }
}

/// The `limit` most frequent labels, by count descending then name.
fn most_common<'a, I>(labels: I, limit: usize) -> Vec<LabelCount>
where
    I: Iterator<Item = &'a String>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    sorted
        .into_iter()
        .take(limit)
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect()
}
