// davsync/src/local/mod.rs
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::Result;

/// Walks the local folder recursively and returns the full path of every
/// non-directory entry whose base name matches the mask.
///
/// The mask is compiled as a regular expression, not a glob; the historic
/// default mask `*` does not compile and is reported as a Pattern error
/// rather than being rewritten into `.*` here. Non-UTF-8 base names cannot
/// match and are skipped.
pub fn enumerate_files(local_folder: &Path, file_mask: &str) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(file_mask)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(local_folder) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if pattern.is_match(name) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}
