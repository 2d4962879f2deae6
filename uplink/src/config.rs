//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The file path defaults to `config.yaml` but can be specified
//! via the `-f` flag or the `UPLINK_CONFIG` environment variable.
//!
//! ## Loading priority
//!
//! Sources are merged in order (later sources override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `UPLINK_`
//!
//! For nested values, use double underscores: `UPLINK_HEALTH__INTERVAL=10s`
//! sets `health.interval`. Durations accept humantime strings (`"5s"`,
//! `"2m 30s"`).
//!
//! ## Example
//!
//! ```yaml
//! api_base_url: "https://api.example.com"
//! request_timeout: 30s
//! health:
//!   path: /health
//!   interval: 30s
//!   timeout: 5s
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "UPLINK_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the backing API (e.g. "https://api.example.com")
    pub api_base_url: Url,
    /// Timeout applied to auth gateway requests
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Backend health monitor configuration
    pub health: HealthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse("http://localhost:3001").expect("default API base URL is valid"),
            request_timeout: Duration::from_secs(30),
            health: HealthConfig::default(),
        }
    }
}

/// Health monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Path of the health endpoint, relative to `api_base_url`
    pub path: String,
    /// How often to probe
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Per-probe timeout; expiry cancels the in-flight request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load configuration from the YAML file and `UPLINK_` environment
    /// overrides.
    pub fn load(args: &Args) -> Result<Self, Error> {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("UPLINK_").split("__"))
            .extract()
            .map_err(|e| Error::Internal {
                operation: format!("load configuration: {e}"),
            })
    }

    /// Absolute URL of the health endpoint.
    pub fn health_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            self.health.path.trim_start_matches('/')
        )
    }
}
