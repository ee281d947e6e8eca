//! Merging, deduplication and ordering of record sets.

use std::collections::HashSet;

use serde::Serialize;

use super::models::ConversationRecord;

/// Drops every record whose `(title, date)` pair was already seen.
/// The first occurrence wins and order is preserved.
///
/// # Example
/// Input:  [("Plan", "2024-01-01", a.json), ("Plan", "2024-01-01", b.json)]
/// Output: [("Plan", "2024-01-01", a.json)]
pub fn dedup_records(records: Vec<ConversationRecord>) -> Vec<ConversationRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());

    records
        .into_iter()
        .filter(|record| seen.insert((record.title.clone(), record.date.clone())))
        .collect()
}

/// Stable ascending sort by date; records without a date go last.
pub fn sort_by_date(records: &mut [ConversationRecord]) {
    records.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
}

/// Concatenates per-file record sets in order, deduplicates and sorts.
pub fn merge_batches<I>(batches: I) -> (Vec<ConversationRecord>, usize)
where
    I: IntoIterator<Item = Vec<ConversationRecord>>,
{
    let all: Vec<ConversationRecord> = batches.into_iter().flatten().collect();
    let before = all.len();

    let mut unique = dedup_records(all);
    sort_by_date(&mut unique);

    let duplicates = before - unique.len();
    (unique, duplicates)
}

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records_collected: usize,
    pub unique_records: usize,
    pub duplicates_removed: usize,
    pub skipped_blocks: usize,
}

impl BatchStats {
    /// Share of collected records that were duplicates, in percent.
    pub fn duplicate_ratio(&self) -> f64 {
        if self.records_collected == 0 {
            return 0.0;
        }
        (self.duplicates_removed as f64 / self.records_collected as f64) * 100.0
    }
}
