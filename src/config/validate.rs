//! Validation: the harvest root and the configured extension list.

use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{HarvestError, HarvestResult};
use crate::harvest::ExtensionSet;

use super::types::Config;

/// Check that `root` exists, is a directory and can be listed.
/// Returns the canonical path used for the rest of the run.
pub fn validate_root(root: &Path) -> HarvestResult<PathBuf> {
    let meta = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HarvestError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => {
            return Err(HarvestError::RootUnreadable {
                path: root.to_path_buf(),
                source: e,
            });
        }
    };
    if !meta.is_dir() {
        return Err(HarvestError::RootNotDirectory(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|e| HarvestError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;

    let real = dunce::canonicalize(root).map_err(|e| HarvestError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;
    debug!(root = %real.display(), "root validated");
    Ok(real)
}

impl Config {
    /// Normalize the extension list in place and make sure something is left.
    pub fn validate(&mut self) -> Result<()> {
        let set = ExtensionSet::new(&self.extensions);
        if set.is_empty() {
            bail!("no extensions configured; pass --ext or set <extensions> in config.xml");
        }
        self.extensions = set.names().map(str::to_string).collect();
        Ok(())
    }
}
