//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides. Every section is optional; a
//! missing file or section falls back to the defaults below.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// HTTP listener.
  #[serde(default)]
  pub server: ServerConfig,
  /// Trade document location.
  #[serde(default)]
  pub storage: StorageConfig,
  /// Front-end assets.
  #[serde(default)]
  pub web: WebConfig,
  /// Tracing output.
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind host.
  #[serde(default = "default_host")]
  pub host: String,
  /// Bind port. Overridden by the `PORT` environment variable.
  #[serde(default = "default_port")]
  pub port: u16,
}

impl ServerConfig {
  /// `host:port` string for the TCP listener.
  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
    }
  }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  /// Path of the JSON trade document.
  #[serde(default = "default_data_file")]
  pub data_file: String,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      data_file: default_data_file(),
    }
  }
}

/// Static front-end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
  /// Directory served for non-API paths.
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
  /// Entry document returned for any path without a matching asset.
  #[serde(default = "default_index_file")]
  pub index_file: String,
}

impl Default for WebConfig {
  fn default() -> Self {
    Self {
      static_dir: default_static_dir(),
      index_file: default_index_file(),
    }
  }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// One JSON object per line.
  #[default]
  Json,
  /// Human-readable, for local runs.
  Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Log level filter (trace, debug, info, warn, error). `RUST_LOG` wins.
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Output format.
  #[serde(default)]
  pub format: LogFormat,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      format: LogFormat::default(),
    }
  }
}

// Default value functions for serde

fn default_host() -> String {
  "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
  3000
}

fn default_data_file() -> String {
  "data/trades.json".to_string()
}

fn default_static_dir() -> String {
  "public".to_string()
}

fn default_index_file() -> String {
  "index.html".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}
