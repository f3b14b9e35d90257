use serde::{Deserialize, Serialize};
use sheet_source::FetchOptions;
use std::{env, path::PathBuf, time::Duration};

use crate::theme::ThemeMode;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV_VAR: &str = "SHEET_TUI_ENDPOINT";

/// Application configuration loaded from sheet-tui.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

fn default_endpoint() -> String {
    "https://excel-api-ob9u.onrender.com/functions".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    8 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            theme: ThemeMode::default(),
            timeout_secs: default_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl Config {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        const CONFIG_FILE: &str = "sheet-tui.toml";

        // Try current directory first
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::debug!("Loaded config from {}", CONFIG_FILE);
                    return config;
                }
                Err(e) => log::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e),
            }
        }

        // Try home directory
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home).join(format!(".{}", CONFIG_FILE));
            if let Ok(content) = std::fs::read_to_string(&home_config) {
                match toml::from_str(&content) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", home_config.display());
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring invalid {}: {}", home_config.display(), e),
                }
            }
        }

        log::debug!("Using default config");
        Self::default()
    }

    /// Endpoint to fetch from, honoring the environment override
    pub fn resolved_endpoint(&self) -> String {
        match env::var(ENDPOINT_ENV_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => endpoint,
            _ => self.endpoint.clone(),
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_response_bytes: self.max_response_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.theme, ThemeMode::Light);
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let config: Config = toml::from_str(
            r#"
            endpoint = "http://localhost:8080/functions"
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/functions");
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let result: Result<Config, _> = toml::from_str(r#"theme = "solarized""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_options_clamp_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            max_response_bytes: 1024,
            ..Config::default()
        };
        let options = config.fetch_options();
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert_eq!(options.max_response_bytes, 1024);
    }
}
