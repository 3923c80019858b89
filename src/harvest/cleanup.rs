//! Removal of vacated directories after the walk.
//!
//! Each touched directory is removed recursively, whatever is still inside it.
//! Failures are collected as warnings and never abort the run. A directory that
//! is already gone (removed together with a touched ancestor) counts as removed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::helpers::io_hint;
use super::relocate::TouchedDirs;

/// A directory that could not be removed.
#[derive(Debug)]
pub struct CleanupWarning {
    pub dir: PathBuf,
    pub error: io::Error,
}

impl std::fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to delete directory {}: {}{}",
            self.dir.display(),
            self.error,
            io_hint(&self.error)
        )
    }
}

/// Outcome of a cleanup pass.
#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub removed: Vec<PathBuf>,
    pub warnings: Vec<CleanupWarning>,
}

/// Recursively delete every touched directory.
pub fn remove_touched(touched: &TouchedDirs) -> CleanupOutcome {
    let mut outcome = CleanupOutcome::default();
    for dir in touched.iter() {
        match remove_dir(dir) {
            Ok(()) => {
                info!(dir = %dir.display(), "Deleted directory");
                outcome.removed.push(dir.to_path_buf());
            }
            Err(error) => {
                let w = CleanupWarning {
                    dir: dir.to_path_buf(),
                    error,
                };
                warn!(dir = %w.dir.display(), error = %w.error, "{w}");
                outcome.warnings.push(w);
            }
        }
    }
    outcome
}

fn remove_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "already removed");
            Ok(())
        }
        other => other,
    }
}
