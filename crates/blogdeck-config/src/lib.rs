//! Configuration for the blog client tools.
//!
//! Provides TOML-based configuration with:
//! - Config file layering (user config dir + project-local overrides)
//! - Per-field merging, so a project file can override a single value
//! - Environment override for the API base URL
//! - Resolution into concrete settings with defaults filled in

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    LoadedConfig, load_config, load_config_file, load_config_with_options, save_config,
    xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
