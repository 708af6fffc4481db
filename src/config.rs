//! # Configuration Module
//!
//! Optional project settings for licensefix, read from a `.licensefix.toml`
//! file or from the file named by the `LICENSEFIX_CONFIG` environment
//! variable.
//!
//! ```toml
//! license-file = "build_scripts/license.template"
//! extensions = ["java"]
//! ignore = ["**/generated/**"]
//! ```
//!
//! Command-line flags override values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licensefix.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSEFIX_CONFIG";

/// Settings loaded from a configuration file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Canonical license text file. Relative paths are resolved against the
  /// directory containing the config file.
  #[serde(default, rename = "license-file")]
  pub license_file: Option<PathBuf>,

  /// File extensions to process, without the leading dot.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// Glob patterns for files to skip.
  #[serde(default)]
  pub ignore: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is syntactically valid TOML but not usable.
  #[error("Invalid value for '{key}': {message}")]
  Invalid { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config = Self::parse(&content).map_err(|e| match e {
      ConfigError::ParseError { source, .. } => ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })?;

    if let Some(license_file) = config.license_file.take() {
      let base = path.parent().unwrap_or_else(|| Path::new(""));
      config.license_file = Some(if license_file.is_absolute() {
        license_file
      } else {
        base.join(license_file)
      });
    }

    Ok(config)
  }

  /// Parses and validates configuration from TOML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: PathBuf::new(),
      source: e,
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Checks that:
  /// - Extensions are non-empty and carry no leading dot
  /// - Ignore patterns are valid globs
  fn validate(&self) -> Result<(), ConfigError> {
    for ext in &self.extensions {
      if ext.is_empty() {
        return Err(ConfigError::Invalid {
          key: "extensions".to_string(),
          message: "extension cannot be empty".to_string(),
        });
      }
      if ext.starts_with('.') {
        return Err(ConfigError::Invalid {
          key: "extensions".to_string(),
          message: format!("extension '{}' should not include leading dot", ext),
        });
      }
    }

    for pattern in &self.ignore {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(ConfigError::Invalid {
          key: "ignore".to_string(),
          message: format!("invalid glob pattern '{}': {}", pattern, e),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSEFIX_CONFIG` environment variable
/// 3. `.licensefix.toml` in `base_dir`
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, base_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
