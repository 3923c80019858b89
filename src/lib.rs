//! Core library for `dircleaner`.
//!
//! Contains the harvesting pipeline (walk, filter, collision-free rename,
//! cleanup of vacated directories), its configuration, CLI definitions and
//! user-facing output helpers. The binary only wires these together.

pub mod cli;
pub mod config;
pub mod errors;
pub mod harvest;
pub mod output;

pub use config::{Config, DEFAULT_EXTENSIONS, LogLevel, default_config_path};
pub use errors::{HarvestError, HarvestResult};
pub use harvest::{CleanupWarning, ExtensionSet, HarvestReport, Relocation, harvest};
