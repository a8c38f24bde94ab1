//! Tests for urls and status.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_urls() {
    match parse(&["didfetch", "urls"]) {
        Some(CliCommand::Urls { codes }) => assert!(codes.is_none()),
        _ => panic!("expected Urls"),
    }
}

#[test]
fn cli_parse_urls_with_codes() {
    match parse(&["didfetch", "urls", "--codes", "1"]) {
        Some(CliCommand::Urls { codes }) => {
            assert_eq!(codes.unwrap().codes()[0].to_string(), "01");
        }
        _ => panic!("expected Urls with codes"),
    }
}

#[test]
fn cli_parse_status() {
    match parse(&["didfetch", "status", "--output-dir", "data"]) {
        Some(CliCommand::Status { output_dir, codes }) => {
            assert_eq!(output_dir.as_deref(), Some(std::path::Path::new("data")));
            assert!(codes.is_none());
        }
        _ => panic!("expected Status"),
    }
}
