//! Archive persistence.
//!
//! Bodies are written to `<name>.part`, synced, then renamed onto the final
//! name, so an interrupted run never leaves a `.zip` the probe would accept.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.zip` → `a.zip.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create `dir` and its parents. No-op when it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))
}

/// Write `data` verbatim to `final_path`, replacing any existing file.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> Result<()> {
    let tp = temp_path(final_path);
    let result = write_and_rename(&tp, final_path, data);
    if result.is_err() {
        let _ = fs::remove_file(&tp);
    }
    result
}

fn write_and_rename(temp_path: &Path, final_path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path)
        .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
    file.write_all(data)
        .with_context(|| format!("failed to write {}", temp_path.display()))?;
    file.sync_all().context("storage sync failed")?;
    drop(file);
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            temp_path.display(),
            final_path.display()
        )
    })?;
    Ok(())
}
