//! File watcher: builds on startup, then rebuilds on chapter changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config;
use crate::diagnostics;
use crate::error;
use crate::scanner;

/// Debounce delay between filesystem events and rebuild.
const DEBOUNCE_MS: u64 = 100;

/// Collect the parent directories of all chapters, plus the book root
/// itself so config edits trigger a rebuild.
fn collect_watch_dirs(root: &std::path::Path, chapters: &[PathBuf]) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    dirs.insert(root.to_path_buf());
    for chapter in chapters {
        if let Some(parent) = chapter.parent()
            && !parent.as_os_str().is_empty()
        {
            dirs.insert(root.join(parent));
        }
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::Io(std::io::Error::other(format!("watcher setup failed: {e}")));
    });
}

/// Entry point for the watch command.
///
/// Runs an initial build, then watches chapter directories and rebuilds
/// on changes.
///
/// # Errors
///
/// Returns errors from config loading, scanning, or watcher setup.
pub fn run() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");

    eprintln!("watch: initial build");
    let mut last_code = run_build();

    let config = config::Config::load(&root)?;
    let chapters = scanner::scan(&root, &config)?;
    let watch_dirs = collect_watch_dirs(&root, &chapters);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if dir.exists() {
            let _ = watcher.watch(dir, RecursiveMode::NonRecursive);
        }
    }

    let dir_count = watch_dirs.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, rebuilding...");
        last_code = run_build();
    }

    return Ok(last_code);
}

/// Run build once and print result. Returns the exit code from build.
fn run_build() -> ExitCode {
    return match commands::build() {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
