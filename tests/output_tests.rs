//! Tests for output writers (CSV chunks, merged CSV, JSON report)

use chatsift::config::OutputConfig;
use chatsift::core::DateSource;
use chatsift::core::output::{CSV_HEADER, to_csv, to_json, write_csv, write_csv_chunks, write_report};
use chatsift::core::processor::BatchStats;
use chatsift::core::report::Report;
use chatsift::ConversationRecord;
use std::fs;
use tempfile::tempdir;

fn record(title: &str, date: &str, description: &str) -> ConversationRecord {
    ConversationRecord {
        title: title.to_string(),
        create_timestamp: None,
        update_timestamp: None,
        date: date.to_string(),
        date_source: if date.is_empty() {
            DateSource::Missing
        } else {
            DateSource::Exact
        },
        messages: vec!["A message over twenty chars long for sure".to_string()],
        description: description.to_string(),
        categories: vec!["Copywriting - Emails".to_string(), "Business Strategy".to_string()],
        tags: vec!["Email Sequence".to_string(), "Framework".to_string()],
        relevance_score: 0.85,
        message_volume: 1,
        source_file: Some("export.json".to_string()),
        creator: "chatsift".to_string(),
        kind: "chatgpt".to_string(),
        url: "https://chat.openai.com/c/0123456789ab".to_string(),
    }
}

fn sample_records() -> Vec<ConversationRecord> {
    vec![
        record("Welcome sequence", "2024-01-15", "Email sequence copywriting and optimization"),
        record("Launch, phase two", "2024-02-01", "Said \"go\" and\nwent"),
        record("Undated", "", "No date on this one"),
    ]
}

fn read_csv(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(Result::unwrap).collect()
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_roundtrips_through_a_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&sample_records(), path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADER);

        let rows = read_csv(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "Launch, phase two");
        assert_eq!(&rows[1][1], "Said \"go\" and\nwent");
        assert_eq!(&rows[0][2], "Copywriting - Emails|Business Strategy");
        assert_eq!(&rows[0][3], "Email Sequence,Framework");
        assert_eq!(&rows[0][6], "0.85");
        assert_eq!(&rows[2][4], "");
        assert_eq!(&rows[2][5], "missing");
    }

    #[test]
    fn test_minimal_quoting() {
        let csv = to_csv(&sample_records()[..1]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("Welcome sequence,Email sequence copywriting and optimization,"));
        assert!(row.contains(",\"Email Sequence,Framework\","));
    }

    #[test]
    fn test_score_has_two_decimals() {
        let mut r = record("Rounding", "2024-01-01", "d");
        r.relevance_score = 0.1;
        let csv = to_csv(&[r]).unwrap();
        assert!(csv.contains(",0.10,"));
    }

    #[test]
    fn test_chunks_split_at_chunk_size() {
        let dir = tempdir().unwrap();
        let config = OutputConfig::new()
            .with_prefix(dir.path().join("gemini_ready").to_string_lossy())
            .with_chunk_size(2);

        let paths = write_csv_chunks(&sample_records(), &config).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("gemini_ready_chunk_001.csv"));
        assert!(paths[1].ends_with("gemini_ready_chunk_002.csv"));
        assert_eq!(read_csv(&paths[0]).len(), 2);
        assert_eq!(read_csv(&paths[1]).len(), 1);
    }

    #[test]
    fn test_exact_multiple_of_chunk_size() {
        let dir = tempdir().unwrap();
        let config = OutputConfig::new()
            .with_prefix(dir.path().join("p").to_string_lossy())
            .with_chunk_size(3);

        let paths = write_csv_chunks(&sample_records(), &config).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_merged_path_holds_every_row() {
        let dir = tempdir().unwrap();
        let config = OutputConfig::new()
            .with_prefix(dir.path().join("archive").to_string_lossy())
            .with_merge(true);

        write_csv(&sample_records(), &config.merged_path()).unwrap();
        assert!(config.merged_path().ends_with("archive_merged.csv"));
        assert_eq!(read_csv(std::path::Path::new(&config.merged_path())).len(), 3);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let result = write_csv(&sample_records(), "/nonexistent/dir/out.csv");
        assert!(result.unwrap_err().is_io());
    }
}

// ============================================================================
// Report Writer Tests
// ============================================================================

mod report_writer_tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = Report::from_records(&sample_records());
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(json["total_conversations"], 3);
        assert_eq!(json["missing_dates"], 1);
        assert_eq!(json["date_range"]["earliest"], "2024-01-15");
        assert_eq!(json["date_range"]["latest"], "2024-02-01");
        assert_eq!(json["categories_distribution"]["Business Strategy"], 3);
        assert_eq!(json["relevance_distribution"]["high"], 3);
        assert_eq!(json["top_tags"][0]["label"], "Email Sequence");
        assert_eq!(json["top_tags"][0]["count"], 3);
        assert!(json.get("batch").is_none());
    }

    #[test]
    fn test_empty_report_has_null_dates() {
        let report = Report::from_records(&[]);
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert!(json["date_range"]["earliest"].is_null());
        assert!(json["date_range"]["latest"].is_null());
        assert_eq!(json["top_tags"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_write_report_with_batch_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gemini_ready_report.json");
        let records = sample_records();
        let stats = BatchStats {
            files_processed: 2,
            files_failed: 1,
            records_collected: 4,
            unique_records: 3,
            duplicates_removed: 1,
            skipped_blocks: 2,
        };

        let report = Report::from_records(&records).with_batch(
            &records,
            &["export.json".to_string(), "more.txt".to_string()],
            &stats,
        );
        write_report(&report, path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));

        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        let batch = &json["batch"];
        assert_eq!(batch["by_source_file"]["export.json"], 3);
        assert_eq!(batch["by_month"]["2024-01"], 1);
        assert_eq!(batch["by_month"]["2024-02"], 1);
        assert_eq!(batch["files_failed"], 1);
        assert_eq!(batch["skipped_blocks"], 2);
        assert_eq!(batch["top_projects"].as_array().unwrap().len(), 0);
        assert!(batch["processing_date"].as_str().unwrap().contains('T'));

        let parsed: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.total_conversations, 3);
    }
}
