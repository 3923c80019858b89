//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - Every element is optional; missing ones keep their defaults.
//! - Unknown elements are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::DEFAULT_EXTENSIONS;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    /// Comma-separated list, e.g. "avi, mp4, srt"
    #[serde(default)]
    extensions: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    clean: Option<bool>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
}

// Booleans arrive as element text; tolerate surrounding whitespace and 1/0.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("true") || s == "1" => Ok(Some(true)),
        Some(s) if s.eq_ignore_ascii_case("false") || s == "0" => Ok(Some(false)),
        Some(s) => Err(serde::de::Error::custom(format!(
            "invalid boolean '{s}' (expected true or false)"
        ))),
    }
}

/// Split a comma-separated extension list; blanks are dropped.
pub(crate) fn split_extension_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(list) = non_empty(parsed.extensions.as_deref()) {
        cfg.extensions = split_extension_list(list);
    }
    if let Some(clean) = parsed.clean {
        cfg.clean = clean;
    }
    if let Some(level) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config file for this run, if there is one.
///
/// - `$DIRCLEANER_CONFIG` set: the file must exist and parse.
/// - Otherwise the default location is used when a file exists there;
///   Ok(None) when it doesn't.
pub fn load_config() -> Result<Option<(Config, PathBuf)>> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        debug!("no config location could be determined; using defaults");
        return Ok(None);
    };

    if !path.exists() {
        if explicit {
            bail!(
                "{CONFIG_ENV_VAR} points to '{}', which does not exist",
                path.display()
            );
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }

    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some((cfg, path)))
}

/// Write a commented template config at `path`.
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let content = format!(
        "<!--\n  dircleaner configuration (XML)\n\n    extensions -> comma-separated list of extensions to harvest (no dots)\n    clean      -> true to delete the directories files were harvested from\n    log_level  -> quiet | normal | info | debug\n    log_file   -> path to an additional log file (optional)\n\n  CLI flags override these values.\n-->\n<config>\n  <extensions>{}</extensions>\n  <clean>false</clean>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n</config>\n",
        DEFAULT_EXTENSIONS.join(", ")
    );

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("create config file '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write config file '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}
