//! Sequential batch over region codes with a courtesy pause between requests.
//!
//! The pause follows every downloaded or skipped region except the last one.
//! Failures are not followed by a pause.

use crate::fetcher::{Outcome, RegionFetcher};
use crate::region::RegionCode;
use crate::transport::Transport;
use std::time::Duration;

/// Per-run tally. Reset on every run, never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Downloaded { .. } => self.downloaded += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.downloaded + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Blocking delay between regions. Tests substitute one that only records.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

/// Real wall-clock sleep on the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Hooks for reporting progress. All methods default to no-ops.
pub trait BatchProgress {
    /// Region passed the probe; its GET is about to start.
    fn download_started(&mut self, _code: RegionCode) {}
    fn finished(&mut self, _code: RegionCode, _outcome: &Outcome) {}
}

/// Progress sink that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl BatchProgress for NoProgress {}

/// Fetches every code in `codes` in order and returns the tally. A zero
/// `delay` skips the sleeper entirely.
pub fn run_batch<T: Transport>(
    fetcher: &RegionFetcher<T>,
    codes: &[RegionCode],
    delay: Duration,
    sleeper: &mut dyn Sleeper,
    progress: &mut dyn BatchProgress,
) -> RunSummary {
    let mut summary = RunSummary::default();
    tracing::info!(
        regions = codes.len(),
        output_dir = %fetcher.output_dir().display(),
        "batch started"
    );

    for (i, &code) in codes.iter().enumerate() {
        let outcome = fetcher.fetch(code, &mut |c: RegionCode| progress.download_started(c));
        summary.record(&outcome);
        progress.finished(code, &outcome);

        let is_last = i + 1 == codes.len();
        if !outcome.is_failed() && !is_last && !delay.is_zero() {
            sleeper.sleep(delay);
        }
    }

    tracing::info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );
    summary
}
