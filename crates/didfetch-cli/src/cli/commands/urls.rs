//! `didfetch urls` – print request URLs (no network access).

use anyhow::Result;
use didfetch_core::config::FetchConfig;
use didfetch_core::region::RegionCode;
use didfetch_core::url_model;

pub fn run_urls(cfg: &FetchConfig, codes: &[RegionCode]) -> Result<()> {
    let base = cfg.base_url()?;
    for &code in codes {
        println!("{}\t{}", code, url_model::build_url(&base, code));
    }
    Ok(())
}
