//! Typed error definitions for dircleaner.
//! Every variant is fatal to a harvest run; cleanup problems are reported
//! separately as `CleanupWarning` records and never show up here.
//!
//! Display strings stay short and leave the underlying cause to `source()`,
//! so `{:#}` (anyhow) renders "what failed: why".

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("{0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("cannot read root directory {path}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk {path}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to check whether {path} is free{hint}")]
    Probe {
        path: PathBuf,
        hint: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to move file {from} to {to}{hint}")]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        hint: String,
        #[source]
        source: io::Error,
    },

    #[error("no free name for {name:?} in {root} after {tries} suffixes")]
    NoFreeName {
        name: OsString,
        root: PathBuf,
        tries: u32,
    },
}

impl HarvestError {
    /// Stable short identifier, used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HarvestError::RootNotFound(_) => "root_not_found",
            HarvestError::RootNotDirectory(_) => "root_not_directory",
            HarvestError::RootUnreadable { .. } => "root_unreadable",
            HarvestError::Traversal { .. } => "traversal",
            HarvestError::Probe { .. } => "probe",
            HarvestError::Relocation { .. } => "relocation",
            HarvestError::NoFreeName { .. } => "no_free_name",
        }
    }

    /// True for the failures raised before anything on disk was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HarvestError::RootNotFound(_)
                | HarvestError::RootNotDirectory(_)
                | HarvestError::RootUnreadable { .. }
        )
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;
