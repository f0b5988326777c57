//! Configuration Loader - File Loading, Overrides and Validation
//!
//! Handles loading `config.toml`, applying environment overrides,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};

use super::AppConfig;

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding `storage.data_file`.
pub const DATA_FILE_ENV: &str = "TRADE_JOURNAL_DATA_FILE";
/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "TRADE_JOURNAL_CONFIG";

/// Load, override and validate configuration.
///
/// A missing file is not an error: defaults are used instead.
///
/// # Errors
/// Returns detailed error if:
/// - File exists but can't be read
/// - TOML parsing fails
/// - An environment override is malformed
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  load_config_with(path, |key| std::env::var(key).ok())
}

/// Whether `path` names a config file; when it does not, defaults apply.
pub fn config_file_exists(path: &str) -> bool {
  Path::new(path).exists()
}

/// [`load_config`] with an injectable environment lookup.
pub fn load_config_with(
  path: &str,
  env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
  let mut config = if config_file_exists(path) {
    let path = Path::new(path);
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)?
  } else {
    AppConfig::default()
  };

  apply_env_overrides(&mut config, env)?;
  validate_config(&config)?;

  Ok(config)
}

/// Parse configuration from TOML text without overrides or validation.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  toml::from_str(content).context("Failed to parse config.toml")
}

fn apply_env_overrides(
  config: &mut AppConfig,
  env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
  if let Some(port) = env(PORT_ENV) {
    config.server.port = port
      .trim()
      .parse()
      .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
  }

  if let Some(data_file) = env(DATA_FILE_ENV) {
    config.storage.data_file = data_file;
  }

  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(config.server.port > 0, "server.port must be non-zero");
  anyhow::ensure!(
    !config.server.host.trim().is_empty(),
    "server.host must not be empty"
  );
  anyhow::ensure!(
    !config.storage.data_file.trim().is_empty(),
    "storage.data_file must not be empty"
  );
  anyhow::ensure!(
    !config.web.index_file.trim().is_empty(),
    "web.index_file must not be empty"
  );
  anyhow::ensure!(
    !config.logging.level.trim().is_empty(),
    "logging.level must not be empty"
  );

  Ok(())
}
