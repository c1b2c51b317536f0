use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paths::{config_json_path, config_toml_path};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Settings for talking to the docy API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn parse_env_number<T: std::str::FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring {name}={value:?}: not a number");
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Config {
    /// Load from `~/.docy/config.json`, falling back to `./config.toml`,
    /// then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_sources(&config_json_path(), &config_toml_path());
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Read the first config file that exists and parses. The JSON file wins
    /// over the TOML file; a broken file is skipped with a warning.
    pub fn from_sources(json_path: &Path, toml_path: &Path) -> Self {
        if json_path.exists() {
            match std::fs::read_to_string(json_path)
                .map_err(|e| e.to_string())
                .and_then(|content| serde_json::from_str::<Config>(&content).map_err(|e| e.to_string()))
            {
                Ok(config) => {
                    log::debug!("Loaded config from {}", json_path.display());
                    return config;
                }
                Err(err) => log::warn!("Failed to load {}: {}", json_path.display(), err),
            }
        }

        if toml_path.exists() {
            match std::fs::read_to_string(toml_path)
                .map_err(|e| e.to_string())
                .and_then(|content| toml::from_str::<Config>(&content).map_err(|e| e.to_string()))
            {
                Ok(config) => {
                    log::debug!("Loaded config from {}", toml_path.display());
                    return config;
                }
                Err(err) => log::warn!("Failed to load {}: {}", toml_path.display(), err),
            }
        }

        Config::default()
    }

    /// Override fields from environment variables, looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = var("DOCY_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(http_proxy) = var("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = var("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(timeout) = var("DOCY_TIMEOUT_SECS") {
            if let Some(timeout) = parse_env_number("DOCY_TIMEOUT_SECS", &timeout) {
                self.timeout_secs = timeout;
            }
        }
        if let Some(retries) = var("DOCY_MAX_RETRIES") {
            if let Some(retries) = parse_env_number("DOCY_MAX_RETRIES", &retries) {
                self.max_retries = retries;
            }
        }
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
