//! # Configuration Module
//!
//! Optional settings shared by the three tools: which files each pass picks
//! up, the name of the private partition in generated include trees, and how
//! many files are processed concurrently.
//!
//! Configuration can be specified in a `.headerkit.toml` file in the current
//! directory, via the `HEADERKIT_CONFIG` environment variable, or with
//! `--config`. Every key is optional; an absent file means the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerkit.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERKIT_CONFIG";

/// Settings for `add-license`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
  /// File extensions (without the leading dot) that receive a banner.
  #[serde(default = "LicenseConfig::default_extensions")]
  pub extensions: Vec<String>,
}

impl LicenseConfig {
  fn default_extensions() -> Vec<String> {
    ["h", "hpp", "cpp", "cc"].iter().map(|s| s.to_string()).collect()
  }
}

impl Default for LicenseConfig {
  fn default() -> Self {
    Self {
      extensions: Self::default_extensions(),
    }
  }
}

/// Settings for `add-private-warning`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PrivateWarningConfig {
  /// File name suffixes that mark a private header.
  #[serde(default = "PrivateWarningConfig::default_suffixes")]
  pub suffixes: Vec<String>,
}

impl PrivateWarningConfig {
  fn default_suffixes() -> Vec<String> {
    vec!["_p.h".to_string(), "_p.hpp".to_string()]
  }
}

impl Default for PrivateWarningConfig {
  fn default() -> Self {
    Self {
      suffixes: Self::default_suffixes(),
    }
  }
}

/// Settings for `gen-include`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GenIncludeConfig {
  /// Header extensions (without the leading dot) to mirror.
  #[serde(default = "GenIncludeConfig::default_extensions")]
  pub extensions: Vec<String>,

  /// Name of the subdirectory that receives private headers.
  #[serde(default = "GenIncludeConfig::default_private_dir")]
  pub private_dir: String,
}

impl GenIncludeConfig {
  fn default_extensions() -> Vec<String> {
    vec!["h".to_string(), "hpp".to_string()]
  }

  fn default_private_dir() -> String {
    "private".to_string()
  }
}

impl Default for GenIncludeConfig {
  fn default() -> Self {
    Self {
      extensions: Self::default_extensions(),
      private_dir: Self::default_private_dir(),
    }
  }
}

/// Main configuration struct, loaded from `.headerkit.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Number of files processed concurrently. Defaults to the CPU count.
  #[serde(default)]
  pub jobs: Option<usize>,

  #[serde(default)]
  pub license: LicenseConfig,

  #[serde(default, rename = "private-warning")]
  pub private_warning: PrivateWarningConfig,

  #[serde(default, rename = "gen-include")]
  pub gen_include: GenIncludeConfig,
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

  /// A setting has an unusable value.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `jobs` is not zero
  /// - extension and suffix lists are non-empty and free of empty entries
  /// - extensions don't include the leading dot
  /// - `private-dir` is a single non-empty path component
  fn validate(&self) -> Result<(), ConfigError> {
    if self.jobs == Some(0) {
      return Err(invalid("jobs", "must be at least 1"));
    }

    validate_extensions("license.extensions", &self.license.extensions)?;
    validate_extensions("gen-include.extensions", &self.gen_include.extensions)?;

    if self.private_warning.suffixes.is_empty() {
      return Err(invalid("private-warning.suffixes", "list cannot be empty"));
    }
    if self.private_warning.suffixes.iter().any(|s| s.is_empty()) {
      return Err(invalid("private-warning.suffixes", "suffix cannot be empty"));
    }

    let private_dir = &self.gen_include.private_dir;
    if private_dir.is_empty() || private_dir.contains(['/', '\\']) || private_dir == "." || private_dir == ".." {
      return Err(invalid(
        "gen-include.private-dir",
        "must be a single directory name",
      ));
    }

    Ok(())
  }
}

fn invalid(key: &str, message: &str) -> ConfigError {
  ConfigError::InvalidValue {
    key: key.to_string(),
    message: message.to_string(),
  }
}

fn validate_extensions(key: &str, extensions: &[String]) -> Result<(), ConfigError> {
  if extensions.is_empty() {
    return Err(invalid(key, "list cannot be empty"));
  }
  for ext in extensions {
    if ext.is_empty() {
      return Err(invalid(key, "extension cannot be empty"));
    }
    if ext.starts_with('.') {
      return Err(ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("extension '{ext}' should not include leading dot"),
      });
    }
  }
  Ok(())
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERKIT_CONFIG` environment variable
/// 3. `.headerkit.toml` in `search_dir`
///
/// An explicit path is returned even when it does not exist, so that loading
/// reports the missing file instead of silently running with defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
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

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or the defaults when there is
/// none.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `search_dir` - Directory searched for `.headerkit.toml`
/// * `no_config` - If true, skip discovery and use defaults
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
