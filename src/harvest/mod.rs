//! Harvesting: flatten a directory tree into its root.
//!
//! Pipeline, strictly forward:
//!   walker -> filter -> collision -> relocate -> (touched dirs) -> cleanup
//!
//! One sequential pass. A file's destination is resolved and the file moved
//! before the walk advances, so probes never race a move from the same run.
//! The first walk or move error ends the run; files already moved stay moved.

pub mod cleanup;
pub mod collision;
pub mod filter;
mod helpers;
pub mod relocate;
pub mod walker;

pub use cleanup::{CleanupOutcome, CleanupWarning, remove_touched};
pub use collision::{MAX_SUFFIX, resolve_destination};
pub use filter::{Decision, ExtensionSet, SkipReason, decide};
pub use helpers::io_hint;
pub use relocate::{Relocation, TouchedDirs, relocate};
pub use walker::{Candidate, EntryKind, walk};

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::types::Config;
use crate::config::validate_root;
use crate::errors::HarvestResult;

/// What a successful run did.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Canonical root the run operated on.
    pub root: PathBuf,
    pub moved: Vec<Relocation>,
    pub removed_dirs: Vec<PathBuf>,
    pub cleanup_warnings: Vec<CleanupWarning>,
}

impl HarvestReport {
    pub fn has_warnings(&self) -> bool {
        !self.cleanup_warnings.is_empty()
    }
}

/// Harvest every matching file below `root` into `root`.
///
/// Validates the root, walks and relocates, then (if `config.clean`) removes
/// the directories files were taken from. Cleanup failures end up in the
/// report's warnings; everything else that fails is returned as the error.
pub fn harvest(root: &Path, config: &Config) -> HarvestResult<HarvestReport> {
    let root = validate_root(root)?;
    let extensions = ExtensionSet::new(&config.extensions);
    if extensions.is_empty() {
        warn!("No extensions configured; nothing will be harvested");
    }
    info!(
        root = %root.display(),
        extensions = ?extensions.names().collect::<Vec<_>>(),
        clean = config.clean,
        "Harvesting"
    );

    let mut touched = config.clean.then(|| TouchedDirs::new(&root));
    let mut moved = Vec::new();

    for entry in walk(&root) {
        let candidate = entry?;
        match decide(&candidate, &root, &extensions) {
            Decision::Harvest => {
                let Some(name) = candidate.path.file_name() else {
                    continue;
                };
                let dest = resolve_destination(&root, name)?;
                moved.push(relocate(&candidate.path, &dest, touched.as_mut())?);
            }
            Decision::Skip(SkipReason::Directory) => {}
            Decision::Skip(reason) => {
                debug!(path = %candidate.path.display(), ?reason, "skip");
            }
        }
    }
    debug!(moved = moved.len(), "walk finished");

    let outcome = match &touched {
        Some(t) if !t.is_empty() => remove_touched(t),
        _ => CleanupOutcome::default(),
    };

    Ok(HarvestReport {
        root,
        moved,
        removed_dirs: outcome.removed,
        cleanup_warnings: outcome.warnings,
    })
}
