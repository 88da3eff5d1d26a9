// Configuration loading and parsing (viewer.toml).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::source::{DataSource, DirSource, FetchError, HttpSource};
use crate::store::PreferenceStore;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// viewer.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Dir,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub source: SourceKind,
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Empty means the platform data directory.
    #[serde(default)]
    pub db_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme_id")]
    pub default_theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_theme: default_theme_id(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_theme_id() -> String {
    Theme::default_theme().id.to_string()
}

impl DataConfig {
    /// Build the configured data source. Relative directories resolve
    /// against `base_dir`.
    pub fn build_source(&self, base_dir: &Path) -> Result<Arc<dyn DataSource>, FetchError> {
        match self.source {
            SourceKind::Dir => {
                let dir = Path::new(&self.dir);
                let root = if dir.is_absolute() {
                    dir.to_path_buf()
                } else {
                    base_dir.join(dir)
                };
                Ok(Arc::new(DirSource::new(root)))
            }
            SourceKind::Http => Ok(Arc::new(HttpSource::new(
                &self.base_url,
                Duration::from_secs(self.timeout_secs),
            )?)),
        }
    }
}

impl StorageConfig {
    /// Resolved database path; falls back to the platform data directory,
    /// then to the working directory.
    pub fn resolve_db_path(&self) -> PathBuf {
        if !self.db_path.is_empty() {
            return PathBuf::from(&self.db_path);
        }
        PreferenceStore::default_path().unwrap_or_else(|| PathBuf::from("fantasy-insights.db"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/viewer.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("viewer.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&path, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", path.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.source == SourceKind::Http && config.data.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.base_url".into(),
            message: "required when data.source = \"http\"".into(),
        });
    }

    if config.data.source == SourceKind::Dir && config.data.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.dir".into(),
            message: "required when data.source = \"dir\"".into(),
        });
    }

    if config.data.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "data.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if Theme::by_id(&config.ui.default_theme).is_none() {
        return Err(ConfigError::ValidationError {
            field: "ui.default_theme".into(),
            message: format!("unknown theme `{}`", config.ui.default_theme),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Locate the workspace root holding `defaults/`, whether `cargo test`
    /// runs from the crate directory or the workspace root.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        cwd.ancestors()
            .find(|dir| dir.join("defaults").join("viewer.toml").exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory from CWD {:?}", cwd))
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/viewer.toml"), contents).unwrap();
        tmp
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = std::env::temp_dir().join("insights_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults/viewer.toml"),
            tmp.join("defaults/viewer.toml"),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied.len(), 1);
        let config = load_config_from(&tmp).expect("default config should load");
        assert_eq!(config.data.source, SourceKind::Dir);
        assert_eq!(config.data.dir, "data");
        assert_eq!(config.data.timeout_secs, 10);
        assert_eq!(config.storage.db_path, "fantasy-insights.db");
        assert_eq!(config.ui.default_theme, "ember");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_default() {
        let tmp = write_config("insights_config_minimal", "[data]\nsource = \"dir\"\n");
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.data.dir, "data");
        assert!(config.storage.db_path.is_empty());
        assert_eq!(config.ui.default_theme, "ember");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn http_requires_base_url() {
        let tmp = write_config("insights_config_http_no_url", "[data]\nsource = \"http\"\n");
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.base_url"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = write_config(
            "insights_config_zero_timeout",
            "[data]\nsource = \"dir\"\ntimeout_secs = 0\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "data.timeout_secs"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_theme() {
        let tmp = write_config(
            "insights_config_bad_theme",
            "[data]\nsource = \"dir\"\n[ui]\ndefault_theme = \"neon\"\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(err.to_string().contains("neon"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_source_kind_is_parse_error() {
        let tmp = write_config("insights_config_bad_source", "[data]\nsource = \"ftp\"\n");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_viewer_toml() {
        let tmp = std::env::temp_dir().join("insights_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing_and_examples() {
        let tmp = std::env::temp_dir().join("insights_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/viewer.toml"), "[data]\nsource = \"dir\"\n").unwrap();
        fs::write(tmp.join("defaults/extra.toml.example"), "# example\n").unwrap();
        fs::write(tmp.join("config/viewer.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert!(copied.is_empty());
        assert_eq!(
            fs::read_to_string(tmp.join("config/viewer.toml")).unwrap(),
            "# custom\n"
        );
        assert!(!tmp.join("config/extra.toml.example").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("insights_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn dir_source_resolves_relative_to_base() {
        let tmp = write_config("insights_config_source", "[data]\nsource = \"dir\"\ndir = \"exports\"\n");
        let config = load_config_from(&tmp).unwrap();
        let source = config.data.build_source(&tmp).unwrap();
        assert!(source.describe().ends_with("exports"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn explicit_db_path_is_used() {
        let storage = StorageConfig {
            db_path: "prefs.db".into(),
        };
        assert_eq!(storage.resolve_db_path(), PathBuf::from("prefs.db"));
    }
}
