//! Configuration: types, default file location, XML loading and validation.
//!
//! Layering is defaults < config.xml < CLI flags. The resulting `Config` is a
//! plain value handed to `harvest()`; nothing here is global.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_root;
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Extensions harvested when neither config.xml nor `--ext` says otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &["avi", "mp4", "mkv", "wmv", "smi", "srt"];
