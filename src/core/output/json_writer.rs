//! JSON report writer.

use std::fs::File;
use std::io::Write;

use crate::core::report::Report;
use crate::error::Result;

/// Writes a report to a pretty-printed JSON file.
///
/// # Format
/// ```json
/// {
///   "total_conversations": 2,
///   "date_range": {"earliest": "2024-01-01", "latest": "2024-03-01"},
///   "missing_dates": 0,
///   "categories_distribution": {"Business Strategy": 2},
///   "top_tags": [{"label": "Framework", "count": 2}],
///   "relevance_distribution": {"high": 0, "medium": 2, "low": 0}
/// }
/// ```
pub fn write_report(report: &Report, output_path: &str) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Converts a report to a pretty-printed JSON string.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
