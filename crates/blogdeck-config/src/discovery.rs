//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier):
//! 1. `~/.config/blogdeck/config.toml` (user config, or `BLOGDECK_CONFIG_DIR`)
//! 2. `./blogdeck.toml` (project-local)
//! 3. `BLOGDECK_API_BASE_URL` and CLI arguments (applied at resolve time)

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{BlogdeckConfig, ConfigError, Result};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "blogdeck.toml";

/// Default config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for XDG directory resolution.
const APP_NAME: &str = "blogdeck";

/// Environment variable to override the config directory.
const CONFIG_DIR_ENV: &str = "BLOGDECK_CONFIG_DIR";

/// Tracks where each config layer was loaded from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the config file.
    pub path: PathBuf,
    /// Whether the file was found and loaded.
    pub loaded: bool,
}

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: BlogdeckConfig,
    /// Directory holding the user config (and default storage/log files).
    pub config_dir: PathBuf,
    /// Sources that were checked, in order of precedence (lowest first).
    pub sources: Vec<ConfigSource>,
    /// Layers that existed but could not be loaded.
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Get paths of sources that were actually loaded.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Load configuration by discovering and merging all config layers.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_options(project_dir, None)
}

/// Load configuration with explicit control over the user config directory.
///
/// `config_dir` overrides both `BLOGDECK_CONFIG_DIR` and the platform default.
pub fn load_config_with_options(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let config_dir = match config_dir {
        Some(dir) => dir.to_path_buf(),
        None => xdg_config_dir().ok_or(ConfigError::NoConfigDir)?,
    };

    let mut config = BlogdeckConfig::new();
    let mut warnings = Vec::new();

    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    let sources = vec![
        load_layer(&mut config, &config_dir.join(USER_CONFIG_FILE), &mut warnings),
        load_layer(&mut config, &project_path, &mut warnings),
    ];

    debug!(
        config_dir = %config_dir.display(),
        loaded = sources.iter().filter(|s| s.loaded).count(),
        "Configuration loaded"
    );

    Ok(LoadedConfig {
        config,
        config_dir,
        sources,
        warnings,
    })
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<BlogdeckConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    BlogdeckConfig::from_toml(&contents)
}

/// Save configuration to a file.
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &BlogdeckConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_toml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Get the user config file path for blogdeck.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Get the user config directory for blogdeck.
///
/// Checks `BLOGDECK_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/blogdeck` on Linux).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Try to load a config file and merge it into the existing config.
///
/// A missing file is skipped; an unreadable one is skipped with a warning.
fn load_layer(config: &mut BlogdeckConfig, path: &Path, warnings: &mut Vec<String>) -> ConfigSource {
    let loaded = path.is_file()
        && match load_config_file(path) {
            Ok(layer) => {
                config.merge(layer);
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping config layer");
                warnings.push(format!("Failed to load {}: {}", path.display(), e));
                false
            }
        };

    ConfigSource {
        path: path.to_path_buf(),
        loaded,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use blogdeck_client::Flavor;

    #[test]
    fn test_xdg_config_path_shape() {
        if let Some(p) = xdg_config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let err = load_config_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_no_files() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.config, BlogdeckConfig::default());
        assert!(loaded.loaded_from().is_empty());
        assert_eq!(loaded.config_dir, user.path());
    }

    #[test]
    fn test_project_overrides_user() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        fs::write(
            user.path().join("config.toml"),
            r#"
[server]
base_url = "http://user/api"
timeout_secs = 5

[client]
flavor = "console"
"#,
        )
        .unwrap();
        fs::write(
            project.path().join("blogdeck.toml"),
            r#"
[server]
base_url = "http://project/api"
"#,
        )
        .unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.loaded_from().len(), 2);

        let server = loaded.config.server.as_ref().unwrap();
        assert_eq!(server.base_url.as_deref(), Some("http://project/api"));
        assert_eq!(server.timeout_secs, Some(5));
        assert_eq!(
            loaded.config.client.as_ref().unwrap().flavor,
            Some(Flavor::Console)
        );
    }

    #[test]
    fn test_malformed_layer_warns_but_continues() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(project.path().join("blogdeck.toml"), "not valid toml {{{{").unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Failed to load"));
        assert!(loaded.loaded_from().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = BlogdeckConfig::from_toml("[server]\nbase_url = \"http://saved/api\"").unwrap();

        save_config(&config, &path).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }
}
