//! Relocation of one harvested file into the root.
//! - Plain rename; no copy fallback, so a cross-device move fails the run.
//! - Unix: best-effort fsync of the root after each rename.
//! - Records the vacated parent directory when cleanup was requested.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{HarvestError, HarvestResult};

use super::helpers::io_hint;

/// A completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Parent directories that lost at least one file during this run.
///
/// Never contains the root. Ordered only so removal and logs are stable.
#[derive(Debug, Default)]
pub struct TouchedDirs {
    root: PathBuf,
    dirs: BTreeSet<PathBuf>,
}

impl TouchedDirs {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            dirs: BTreeSet::new(),
        }
    }

    /// Record `dir`; returns false when it was already present or is the root.
    pub fn insert(&mut self, dir: &Path) -> bool {
        if dir == self.root {
            return false;
        }
        self.dirs.insert(dir.to_path_buf())
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

/// Rename `src` to `dest` (which the collision resolver just found free).
///
/// When `touched` is given, the source's parent is recorded in it after the
/// rename succeeds.
pub fn relocate(src: &Path, dest: &Path, touched: Option<&mut TouchedDirs>) -> HarvestResult<Relocation> {
    fs::rename(src, dest).map_err(|e| HarvestError::Relocation {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        hint: io_hint(&e),
        source: e,
    })?;

    #[cfg(unix)]
    {
        // Ignore fsync errors; the rename already happened.
        if let Some(parent) = dest.parent() {
            let _ = fsync_dir(parent);
        }
    }

    info!(src = %src.display(), dest = %dest.display(), "Moved file");

    if let (Some(touched), Some(parent)) = (touched, src.parent()) {
        touched.insert(parent);
    }

    Ok(Relocation {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
    })
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}
