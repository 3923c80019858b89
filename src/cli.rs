//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Logging flags are global and may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - --ext may be repeated and takes comma-separated values.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Tidy up directories: harvest nested media files into one flat folder.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "dircleaner is a tool to clean up directories")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL", help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where dircleaner will look for its config file, then exit.
    #[arg(long, help = "Print the config file location used by dircleaner and exit")]
    pub print_config: bool,

    /// Write a template config file at that location, then exit.
    #[arg(long, conflicts_with = "print_config", help = "Write a template config file and exit")]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move nested files with matching extensions into the root directory.
    Harvest(HarvestArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HarvestArgs {
    /// Directory to flatten; matching files below it are moved here.
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: PathBuf,

    /// Extensions to harvest (comma-separated, repeatable). Replaces the configured list.
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Delete the directories files were harvested from, including anything left in them.
    #[arg(long)]
    pub clean: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// The harvest subcommand's arguments, if that is what was invoked.
    pub fn harvest(&self) -> Option<&HarvestArgs> {
        match &self.command {
            Some(Command::Harvest(h)) => Some(h),
            None => None,
        }
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(h) = self.harvest() {
            if !h.extensions.is_empty() {
                cfg.extensions = h.extensions.clone();
            }
            if h.clean {
                cfg.clean = true;
            }
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
