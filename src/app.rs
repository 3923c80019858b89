//! Application orchestrator.
//! Loads/merges config, initializes logging, validates settings and runs the harvest.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::error::ErrorKind;
use tracing::{debug, error, info};

use dircleaner::cli::Args;
use dircleaner::config::{CONFIG_ENV_VAR, create_template_config, load_config};
use dircleaner::output as out;
use dircleaner::{Config, HarvestError, default_config_path, harvest};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        return print_config_location();
    }
    if args.init_config {
        let path = default_config_path().context("could not determine a config file location")?;
        create_template_config(&path)?;
        out::print_success(&format!("Template config written to: {}", path.display()));
        return Ok(());
    }

    let Some(harvest_args) = args.harvest() else {
        Args::command()
            .error(ErrorKind::MissingSubcommand, "a subcommand is required (try `harvest <ROOT>`)")
            .exit();
    };

    // Config file first, CLI flags win.
    let (mut cfg, cfg_path) = match load_config()? {
        Some((cfg, path)) => (cfg, Some(path)),
        None => (Config::default(), None),
    };
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    if let Some(p) = &cfg_path {
        debug!(path = %p.display(), "loaded config file");
    }
    debug!("Starting dircleaner: {:?}", args);

    cfg.validate()?;

    match harvest(&harvest_args.root, &cfg) {
        Ok(report) => {
            info!(
                moved = report.moved.len(),
                removed = report.removed_dirs.len(),
                warnings = report.cleanup_warnings.len(),
                "Harvest completed"
            );
            out::print_summary(&report);
            Ok(())
        }
        Err(e) => {
            log_failure(&e);
            Err(anyhow::Error::new(e).context("error harvesting files"))
        }
    }
}

fn log_failure(e: &HarvestError) {
    let kind = e.kind();
    match e {
        HarvestError::RootNotFound(path) | HarvestError::RootNotDirectory(path) => {
            error!(kind, path = %path.display(), "Invalid root directory")
        }
        HarvestError::RootUnreadable { path, source } => {
            error!(kind, path = %path.display(), error = %source, "Invalid root directory")
        }
        HarvestError::Traversal { path, source } => {
            error!(kind, path = %path.display(), error = %source, "Walk failed; remaining files were not harvested")
        }
        HarvestError::Probe { path, source, .. } => {
            error!(kind, path = %path.display(), error = %source, "Destination probe failed")
        }
        HarvestError::Relocation { from, to, source, .. } => {
            error!(kind, src = %from.display(), dest = %to.display(), error = %source, "Move failed; files already moved stay moved")
        }
        HarvestError::NoFreeName { name, root, tries } => {
            error!(kind, name = ?name, root = %root.display(), tries = *tries, "No free destination name")
        }
    }
}

fn print_config_location() -> Result<()> {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
            std::path::Path::new(&cfg_env).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV_VAR} or set it to another file."));
        return Ok(());
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default dircleaner config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
    Ok(())
}
