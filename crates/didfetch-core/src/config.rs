use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// e-Stat statistical GIS download endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.e-stat.go.jp/gis/statmap-search/data";

/// Desktop browser identity; the portal rejects requests that look like scripts.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Output directory relative to the project root when none is configured.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "rawdata/2020";

/// Global configuration loaded from `~/.config/didfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Download endpoint; the fixed query parameters are appended to it.
    pub base_url: String,
    /// Value sent as the `User-Agent` header.
    pub user_agent: String,
    /// Total time allowed for one GET, in seconds.
    pub timeout_secs: u64,
    /// Pause after each downloaded or skipped region, in seconds.
    pub delay_secs: u64,
    /// Bodies smaller than this are written but reported with a warning.
    pub small_payload_bytes: u64,
    /// Where archives are written. None = `<project root>/rawdata/2020`.
    pub output_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 60,
            delay_secs: 3,
            small_payload_bytes: 1000,
            output_dir: None,
        }
    }
}

impl FetchConfig {
    /// Parsed download endpoint. Fails on anything that is not an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("base_url must be http or https: {}", self.base_url);
        }
        Ok(url)
    }

    /// Rejects values that would silently change fetch behavior.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            // libcurl treats 0 as "no timeout".
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Resolves the output directory against `project_root` (relative paths included).
    pub fn output_dir_in(&self, project_root: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => project_root.join(dir),
            None => project_root.join(DEFAULT_OUTPUT_SUBDIR),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("didfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like `load_or_init` but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(60));
        assert_eq!(cfg.delay(), Duration::from_secs(3));
        assert_eq!(cfg.small_payload_bytes, 1000);
        assert!(cfg.output_dir.is_none());
        assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.base_url, cfg.base_url);
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.delay_secs, cfg.delay_secs);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            delay_secs = 0
            output_dir = "data/did"
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.delay_secs, 0);
        assert_eq!(cfg.timeout_secs, 60);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            cfg.output_dir_in(Path::new("/proj")),
            PathBuf::from("/proj/data/did")
        );
    }

    #[test]
    fn default_output_dir_under_project_root() {
        let cfg = FetchConfig::default();
        assert_eq!(
            cfg.output_dir_in(Path::new("/proj")),
            PathBuf::from("/proj/rawdata/2020")
        );
    }

    #[test]
    fn base_url_rejects_non_http() {
        let mut cfg = FetchConfig::default();
        cfg.base_url = "ftp://example.com/data".to_string();
        assert!(cfg.base_url().is_err());
        cfg.base_url = "not a url".to_string();
        assert!(cfg.base_url().is_err());
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.delay_secs, 3);

        fs::write(&path, "delay_secs = 7\n").unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.delay_secs, 7);
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut cfg = FetchConfig::default();
        assert!(cfg.validate().is_ok());
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").unwrap();
        assert!(load_or_init_at(&path).is_err());
        fs::write(&path, "timeout_secs = 1\n").unwrap();
        assert_eq!(load_or_init_at(&path).unwrap().timeout(), Duration::from_secs(1));
    }

    #[test]
    fn load_rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"::nope\"\n").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
