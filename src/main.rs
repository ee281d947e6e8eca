//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsift::ChatsiftError;
use chatsift::batch::{BatchCoordinator, discover_inputs};
use chatsift::cli::Args;
use chatsift::config::Taxonomy;
use chatsift::core::output::{write_csv, write_csv_chunks, write_report};
use chatsift::core::report::Report;
use chatsift::extractor::Dialect;
use chatsift::progress::stderr_progress;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ChatsiftError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    let output_config = args.output_config();
    let dialect: Dialect = args.dialect.into();

    println!("📦 chatsift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Inputs:  {}", args.inputs.len());
    println!("📖 Dialect: {}", dialect);
    println!("💾 Output:  {}_*", output_config.prefix);

    let taxonomy = match &args.taxonomy {
        Some(path) => {
            println!("🏷️  Taxonomy: {}", path.display());
            Taxonomy::from_json_file(path)?
        }
        None => Taxonomy::default(),
    };
    println!();

    let files = discover_inputs(&args.inputs)?;
    if files.is_empty() {
        println!("⚠️  No input files found");
        return Ok(());
    }

    println!("⏳ Processing {} file(s)...", files.len());
    let process_start = Instant::now();

    let mut coordinator =
        BatchCoordinator::new(args.extractor_config(), taxonomy, args.record_config())?
            .with_dialect(dialect);
    if !args.quiet {
        coordinator = coordinator.with_progress(stderr_progress());
    }

    let output = match coordinator.run(&files) {
        Ok(output) => output,
        Err(e) if e.is_empty_result() => {
            println!("⚠️  {}", e);
            println!("   No output files written");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!(
        "   Found {} unique conversations ({:.2}s)",
        output.records.len(),
        process_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing CSV...");
    let chunks = write_csv_chunks(&output.records, &output_config)?;
    for chunk in &chunks {
        println!("   {}", chunk.display());
    }

    if output_config.merge {
        let merged = output_config.merged_path();
        write_csv(&output.records, &merged)?;
        println!("   {}", merged);
    }

    let mut report = Report::from_records(&output.records);
    if output_config.report {
        if files.len() > 1 {
            report = report.with_batch(&output.records, &output.source_files, &output.stats);
        }
        let report_path = output_config.report_path();
        write_report(&report, &report_path)?;
        println!("   {}", report_path);
    }

    println!();
    println!("✅ Done! Wrote {} chunk file(s)", chunks.len());

    println!();
    println!("📊 Summary:");
    println!("   Files:        {} processed", output.stats.files_processed);
    if output.stats.files_failed > 0 {
        println!("   Failed:       {} file(s)", output.stats.files_failed);
    }
    println!("   Collected:    {} conversations", output.stats.records_collected);
    println!(
        "   Duplicates:   {} ({:.1}%)",
        output.stats.duplicates_removed,
        output.stats.duplicate_ratio()
    );
    println!("   Unique:       {}", report.total_conversations);
    println!("   Missing date: {}", report.missing_dates);
    if let (Some(earliest), Some(latest)) = (&report.date_range.earliest, &report.date_range.latest) {
        println!("   Date range:   {} .. {}", earliest, latest);
    }
    println!(
        "   Relevance:    {} high, {} medium, {} low",
        report.relevance_distribution.high,
        report.relevance_distribution.medium,
        report.relevance_distribution.low
    );
    if output.stats.skipped_blocks > 0 {
        println!("   Skipped:      {} malformed block(s)", output.stats.skipped_blocks);
    }

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
