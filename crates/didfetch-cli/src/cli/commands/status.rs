//! `didfetch status` – which regions already have an archive on disk.

use anyhow::{Context, Result};
use didfetch_core::probe;
use didfetch_core::region::RegionCode;
use std::path::Path;

/// Probe result per code, in the order given.
fn scan(output_dir: &Path, codes: &[RegionCode]) -> Result<Vec<(RegionCode, Option<String>)>> {
    let mut rows = Vec::with_capacity(codes.len());
    for &code in codes {
        let existing = probe::existing_archive(output_dir, code)
            .with_context(|| format!("cannot list {}", output_dir.display()))?;
        rows.push((code, existing));
    }
    Ok(rows)
}

pub fn run_status(output_dir: &Path, codes: &[RegionCode]) -> Result<()> {
    let rows = scan(output_dir, codes)?;
    println!("Output directory: {}", output_dir.display());
    for (code, existing) in &rows {
        match existing {
            Some(name) => println!("  {} {:<10} present  {}", code, code.prefecture(), name),
            None => println!("  {} {:<10} missing", code, code.prefecture()),
        }
    }
    let present = rows.iter().filter(|(_, e)| e.is_some()).count();
    println!("Present: {}, Missing: {}", present, rows.len() - present);
    Ok(())
}
