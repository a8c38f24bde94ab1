//! Single-region fetch: probe, GET, persist.

use crate::config::FetchConfig;
use crate::probe;
use crate::region::RegionCode;
use crate::storage;
use crate::transport::{FetchError, Transport};
use crate::url_model;
use anyhow::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// Result of one region attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Body written to `path`. `small` is set when it was under the warning threshold.
    Downloaded { path: PathBuf, bytes: u64, small: bool },
    /// An archive for this region was already present; holds its file name.
    Skipped { existing: String },
    Failed(FetchError),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Downloaded { .. } => "DOWNLOADED",
            Outcome::Skipped { .. } => "SKIPPED",
            Outcome::Failed(_) => "FAILED",
        }
    }
}

/// Downloads region archives into one output directory.
pub struct RegionFetcher<T> {
    transport: T,
    base_url: Url,
    output_dir: PathBuf,
    small_payload_bytes: u64,
}

impl<T: Transport> RegionFetcher<T> {
    pub fn new(transport: T, base_url: Url, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            base_url,
            output_dir: output_dir.into(),
            small_payload_bytes: FetchConfig::default().small_payload_bytes,
        }
    }

    /// Fetcher using the configured endpoint and warning threshold.
    pub fn from_config(cfg: &FetchConfig, transport: T, output_dir: &Path) -> Result<Self> {
        Ok(Self::new(transport, cfg.base_url()?, output_dir)
            .with_small_payload_bytes(cfg.small_payload_bytes))
    }

    pub fn with_small_payload_bytes(mut self, bytes: u64) -> Self {
        self.small_payload_bytes = bytes;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn url_for(&self, code: RegionCode) -> String {
        url_model::build_url(&self.base_url, code)
    }

    pub fn output_path(&self, code: RegionCode) -> PathBuf {
        self.output_dir.join(url_model::output_file_name(code))
    }

    /// Skips when an archive is already present, otherwise downloads. Never
    /// returns an error: every failure becomes `Outcome::Failed`.
    ///
    /// `on_start` runs after the probe, right before the GET.
    pub fn fetch(&self, code: RegionCode, on_start: &mut dyn FnMut(RegionCode)) -> Outcome {
        match probe::existing_archive(&self.output_dir, code) {
            Ok(Some(existing)) => {
                tracing::info!(code = %code, existing = %existing, "skip: archive present");
                return Outcome::Skipped { existing };
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(code = %code, "probe failed: {}", e);
                return Outcome::Failed(FetchError::other(format!(
                    "cannot list {}: {}",
                    self.output_dir.display(),
                    e
                )));
            }
        }

        on_start(code);
        match self.download(code) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(code = %code, kind = e.kind(), "download failed: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    fn download(&self, code: RegionCode) -> Result<Outcome, FetchError> {
        let url = self.url_for(code);
        tracing::debug!(code = %code, url = %url, "GET");
        let body = self.transport.get(&url)?;

        let bytes = body.len() as u64;
        let small = bytes < self.small_payload_bytes;
        if small {
            tracing::warn!(code = %code, bytes, "small archive; possibly an error page");
        }

        let path = self.output_path(code);
        storage::write_atomic(&path, &body).map_err(|e| FetchError::other(format!("{:#}", e)))?;
        tracing::info!(code = %code, bytes, path = %path.display(), "downloaded");
        Ok(Outcome::Downloaded { path, bytes, small })
    }
}
