//! `didfetch fetch` – download every region archive not already present.

use anyhow::Result;
use didfetch_core::batch::{run_batch, BatchProgress, RunSummary, ThreadSleeper};
use didfetch_core::config::FetchConfig;
use didfetch_core::fetcher::{Outcome, RegionFetcher};
use didfetch_core::region::RegionCode;
use didfetch_core::storage;
use didfetch_core::transport::CurlTransport;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Downstream conversion command, printed as a hint only.
const NEXT_STEP: &str = "npm run convert:did";

/// Prints one line per region to stdout.
#[derive(Default)]
struct ConsoleProgress {
    /// A "Downloading .." prefix is waiting for its result.
    line_open: bool,
}

impl BatchProgress for ConsoleProgress {
    fn download_started(&mut self, code: RegionCode) {
        print!("  Downloading {} ({})... ", code, code.prefecture());
        let _ = std::io::stdout().flush();
        self.line_open = true;
    }

    fn finished(&mut self, code: RegionCode, outcome: &Outcome) {
        println!("{}", outcome_text(code, outcome, self.line_open));
        self.line_open = false;
    }
}

fn format_kib(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Text completing a progress line. Without an open "Downloading" prefix
/// (skips, and failures before the GET) the line names the region itself.
fn outcome_text(code: RegionCode, outcome: &Outcome, line_open: bool) -> String {
    match outcome {
        Outcome::Skipped { existing } => {
            format!("  [SKIP] {}: already exists ({})", code, existing)
        }
        Outcome::Downloaded { bytes, small: true, .. } => format!(
            "WARN: small file size ({} bytes) OK ({})",
            bytes,
            format_kib(*bytes)
        ),
        Outcome::Downloaded { bytes, .. } => format!("OK ({})", format_kib(*bytes)),
        Outcome::Failed(e) if line_open => e.to_string(),
        Outcome::Failed(e) => format!("  [FAIL] {}: {}", code, e),
    }
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Complete! Downloaded: {}, Skipped: {}, Failed: {}",
        summary.downloaded, summary.skipped, summary.failed
    )
}

/// Lines printed after the batch: tally, rerun hint on failure, next step.
fn closing_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![summary_line(summary), String::new()];
    if summary.has_failures() {
        lines.push(
            "Note: Some downloads failed. Re-run to retry only the missing regions.".to_string(),
        );
    }
    lines.push(format!("Next step: {}", NEXT_STEP));
    lines
}

/// Failed regions only become an error when `fail_on_error` is set.
fn check_failures(summary: &RunSummary, fail_on_error: bool) -> Result<()> {
    if fail_on_error && summary.has_failures() {
        anyhow::bail!("{} region(s) failed", summary.failed);
    }
    Ok(())
}

pub fn run_fetch(
    cfg: &FetchConfig,
    output_dir: &Path,
    codes: &[RegionCode],
    delay: Duration,
    fail_on_error: bool,
) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("e-Stat 2020 DID downloader");
    println!("{}", "=".repeat(60));

    storage::ensure_dir(output_dir)?;
    println!("Output directory: {}", output_dir.display());
    println!();

    let fetcher = RegionFetcher::from_config(cfg, CurlTransport::from_config(cfg), output_dir)?;

    println!("Starting download...");
    println!("{}", "-".repeat(40));
    let summary = run_batch(
        &fetcher,
        codes,
        delay,
        &mut ThreadSleeper,
        &mut ConsoleProgress::default(),
    );
    println!("{}", "-".repeat(40));
    for line in closing_lines(&summary) {
        println!("{}", line);
    }

    check_failures(&summary, fail_on_error)
}
