//! Existing-archive detection.
//!
//! A region counts as present when any `.zip` directly in the output
//! directory contains `_<code>.` or `_<code>-` in its name. This accepts
//! older suffixed names such as `did_2020_05-1.zip` while keeping `05` and
//! `15` apart.

use crate::region::RegionCode;
use std::fs;
use std::io;
use std::path::Path;

/// True if `file_name` belongs to `code` under the `_<code>.` / `_<code>-` rule.
pub fn matches_code(file_name: &str, code: &str) -> bool {
    file_name.contains(&format!("_{}.", code)) || file_name.contains(&format!("_{}-", code))
}

/// First matching archive name for a raw code string, in name order.
/// A missing directory is reported as no match.
pub fn find_existing(dir: &Path, code: &str) -> io::Result<Option<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("zip") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if matches_code(name, code) {
                matches.push(name.to_string());
            }
        }
    }
    matches.sort();
    Ok(matches.into_iter().next())
}

/// Existing archive for `code` in `dir`, if any.
pub fn existing_archive(dir: &Path, code: RegionCode) -> io::Result<Option<String>> {
    find_existing(dir, &code.to_string())
}
