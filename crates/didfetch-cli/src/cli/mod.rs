//! CLI for didfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use didfetch_core::config;
use didfetch_core::region::RegionSelection;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_fetch, run_status, run_urls};

/// Top-level CLI for didfetch.
#[derive(Debug, Parser)]
#[command(name = "didfetch")]
#[command(
    about = "didfetch: download the 2020 census DID shapefile archives from e-Stat",
    long_about = None
)]
pub struct Cli {
    /// Defaults to `fetch` with no options.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every region archive not already present (the default).
    Fetch {
        /// Directory to write archives into (default: ./rawdata/2020).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Comma-separated region codes, e.g. "01,13,47" (default: all 47).
        #[arg(long, value_name = "CODES")]
        codes: Option<RegionSelection>,
        /// Seconds to wait after each downloaded or skipped region.
        #[arg(long, value_name = "SECS")]
        delay_secs: Option<u64>,
        /// Exit with status 1 if any region failed.
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Print the download URL for each region without fetching anything.
    Urls {
        /// Comma-separated region codes (default: all 47).
        #[arg(long, value_name = "CODES")]
        codes: Option<RegionSelection>,
    },

    /// Show which regions already have an archive in the output directory.
    Status {
        /// Directory to inspect (default: ./rawdata/2020).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Comma-separated region codes (default: all 47).
        #[arg(long, value_name = "CODES")]
        codes: Option<RegionSelection>,
    },
}

impl CliCommand {
    fn default_fetch() -> Self {
        CliCommand::Fetch {
            output_dir: None,
            codes: None,
            delay_secs: None,
            fail_on_error: false,
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let project_root = std::env::current_dir()?;
        let selected = |codes: Option<RegionSelection>| {
            codes.unwrap_or_else(RegionSelection::all).into_codes()
        };

        match cli.command.unwrap_or_else(CliCommand::default_fetch) {
            CliCommand::Fetch {
                output_dir,
                codes,
                delay_secs,
                fail_on_error,
            } => {
                let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir_in(&project_root));
                let delay = delay_secs.map(Duration::from_secs).unwrap_or_else(|| cfg.delay());
                run_fetch(&cfg, &output_dir, &selected(codes), delay, fail_on_error)?;
            }
            CliCommand::Urls { codes } => run_urls(&cfg, &selected(codes))?,
            CliCommand::Status { output_dir, codes } => {
                let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir_in(&project_root));
                run_status(&output_dir, &selected(codes))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
