//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::core::models::ConversationRecord;
use crate::error::Result;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 11] = [
    "name",
    "description",
    "category",
    "tags",
    "date",
    "date_source",
    "relevance_score",
    "message_volume",
    "creator",
    "type",
    "url",
];

/// Writes records to one CSV file.
///
/// # Format
/// - Delimiter: `,`, minimal quoting
/// - Columns: see [`CSV_HEADER`]
/// - `category` joined with `|`, `tags` joined with `,`
/// - `relevance_score` with two decimals
pub fn write_csv(records: &[ConversationRecord], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[ConversationRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes records in files of at most `config.chunk_size` rows named
/// `<prefix>_chunk_001.csv`, `<prefix>_chunk_002.csv`, ...
///
/// Returns the paths written. No file is written for an empty record set.
pub fn write_csv_chunks(records: &[ConversationRecord], config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (i, chunk) in records.chunks(config.chunk_size.max(1)).enumerate() {
        let path = config.chunk_path(i + 1);
        write_csv(chunk, &path)?;
        written.push(PathBuf::from(path));
    }

    Ok(written)
}

fn write_records<W: Write>(records: &[ConversationRecord], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(sink);

    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record(build_row(record))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_row(record: &ConversationRecord) -> [String; 11] {
    [
        record.title.clone(),
        record.description.clone(),
        record.categories.join("|"),
        record.tags.join(","),
        record.date.clone(),
        record.date_source.to_string(),
        format!("{:.2}", record.relevance_score),
        record.message_volume.to_string(),
        record.creator.clone(),
        record.kind.clone(),
        record.url.clone(),
    ]
}
