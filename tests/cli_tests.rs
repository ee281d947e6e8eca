//! Tests for the CLI argument types and their mapping onto library config

use chatsift::cli::{Args, DialectArg};
use chatsift::extractor::Dialect;
use clap::{Parser, ValueEnum};
use std::str::FromStr;

#[test]
fn test_dialect_from_str_all_variants() {
    for name in Dialect::all_names() {
        assert!(Dialect::from_str(name).is_ok(), "{name} should parse");
    }

    // Case variations
    assert_eq!(Dialect::from_str("RAW").unwrap(), Dialect::RawText);
    assert_eq!(Dialect::from_str("Json-Array").unwrap(), Dialect::JsonArray);
}

#[test]
fn test_dialect_from_str_errors() {
    assert!(Dialect::from_str("").is_err());
    assert!(Dialect::from_str("xml").is_err());
    assert!(Dialect::from_str("jsonl").is_err());

    let err = Dialect::from_str("yaml").unwrap_err();
    assert!(err.contains("raw-text"));
}

#[test]
fn test_dialect_arg_aliases() {
    for (input, expected) in [
        ("auto", Dialect::Auto),
        ("json-array", Dialect::JsonArray),
        ("array", Dialect::JsonArray),
        ("json-object", Dialect::JsonObject),
        ("object", Dialect::JsonObject),
        ("raw-text", Dialect::RawText),
        ("raw", Dialect::RawText),
        ("text", Dialect::RawText),
    ] {
        let arg = DialectArg::from_str(input, true).unwrap();
        assert_eq!(Dialect::from(arg), expected, "alias {input}");
    }
}

#[test]
fn test_every_dialect_arg_maps() {
    for arg in DialectArg::value_variants() {
        let _: Dialect = (*arg).into();
    }
    assert_eq!(DialectArg::default(), DialectArg::Auto);
}

#[test]
fn test_args_build_library_config() {
    let args = Args::parse_from([
        "chatsift",
        "exports/",
        "-o",
        "archive",
        "--chunk-size",
        "100",
        "--merge",
        "--creator",
        "Research Team",
    ]);

    let output = args.output_config();
    assert_eq!(output.prefix, "archive");
    assert_eq!(output.chunk_size, 100);
    assert!(output.merge);
    assert_eq!(output.chunk_path(1), "archive_chunk_001.csv");

    let record = args.record_config();
    assert_eq!(record.creator, "Research Team");
    assert_eq!(record.kind, "chatgpt");

    assert!(!args.extractor_config().fallback_passes);
}

#[test]
fn test_args_reject_unknown_dialect() {
    assert!(Args::try_parse_from(["chatsift", "a.json", "--dialect", "telegram"]).is_err());
}
