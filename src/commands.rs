//! Core CLI commands for codebook: build and check.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::chapter;
use crate::config;
use crate::diagnostics;
use crate::error;
use crate::registry::IdRegistry;
use crate::scanner;

/// Render every chapter to the output directory.
///
/// Fails fast on the first broken widget: a single malformed range
/// invalidates the build, and partial output would hide that.
///
/// # Errors
///
/// Returns errors from config loading, scanning, chapter compilation, or
/// output writing.
pub fn build() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let chapters = scanner::scan(&root, &config)?;
    let out_dir = root.join(config.out_dir());

    let mut registry = IdRegistry::new();
    std::fs::create_dir_all(&out_dir)?;

    for relative in &chapters {
        let content = std::fs::read_to_string(root.join(relative))?;
        let html = chapter::compile(relative, &content, &mut registry)?;

        let out_path = output_path(&out_dir, relative);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out_path, html)?;
    }

    let chapter_count = chapters.len();
    let widget_count = registry.count();
    println!(
        "Rendered {chapter_count} chapters ({widget_count} widgets) to {}",
        config.out_dir().display()
    );
    return Ok(ExitCode::SUCCESS);
}

/// Validate every chapter without writing output.
///
/// Unlike `build`, keeps going after a broken chapter so authors see all
/// problems in one pass. Widget ids still accumulate across chapters, so
/// cross-chapter duplicates are caught.
///
/// # Errors
///
/// Returns errors from config loading or scanning; per-chapter failures
/// are reported and counted instead of propagated.
pub fn check() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let chapters = scanner::scan(&root, &config)?;

    let mut registry = IdRegistry::new();
    let mut invalid_count = 0_u32;

    for relative in &chapters {
        let result = std::fs::read_to_string(root.join(relative))
            .map_err(error::Error::Io)
            .and_then(|content| return chapter::compile(relative, &content, &mut registry));

        if let Err(e) = result {
            diagnostics::print_error(&e);
            invalid_count = invalid_count.saturating_add(1);
        }
    }

    let chapter_count = chapters.len();
    if invalid_count > 0 {
        println!("{invalid_count} of {chapter_count} chapters have errors");
        return Ok(ExitCode::from(1));
    }

    let widget_count = registry.count();
    println!("All {chapter_count} chapters valid ({widget_count} widgets)");
    return Ok(ExitCode::SUCCESS);
}

/// Where a chapter's HTML lands: same relative path, `.html` extension.
fn output_path(out_dir: &Path, relative: &Path) -> PathBuf {
    return out_dir.join(relative.with_extension("html"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            output_path(Path::new("_book"), Path::new("part1/intro.md")),
            PathBuf::from("_book/part1/intro.html")
        );
    }
}
