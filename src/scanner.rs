use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;

/// Find all chapter markdown files under `root`, applying the config's
/// include/exclude filters. Paths are relative to the root and sorted so
/// widget ids are claimed in a deterministic order.
///
/// # Errors
///
/// Currently infallible but kept fallible for parity with the other
/// pipeline stages.
pub fn scan(root: &Path, config: &Config) -> Result<Vec<PathBuf>, Error> {
    let mut chapters = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.path().extension().is_some_and(|ext| return ext == "md"))
    {
        let md_path = entry.path();
        let relative = md_path.strip_prefix(root).unwrap_or(md_path).to_path_buf();

        if !config.is_chapter(&relative.to_string_lossy()) {
            continue;
        }
        chapters.push(relative);
    }

    chapters.sort();
    return Ok(chapters);
}
