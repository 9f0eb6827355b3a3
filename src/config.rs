/// Service configuration loaded from `ridemon.toml`.
///
/// Every section is optional and falls back to defaults, except the feed
/// base address, which has no sensible default. Secrets such as the Slack
/// hook URL are normally supplied through the environment (or `.env`)
/// rather than committed to the TOML file.

use crate::logging::LogLevel;
use crate::model::MonitorError;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./ridemon.toml";

/// Env var naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "RIDEMON_CONFIG";

/// Env var overriding `queue_times.base_address`.
pub const BASE_ADDRESS_ENV: &str = "QUEUE_TIMES_BASE_ADDRESS";

/// Env var overriding `slack.hook_url`.
pub const HOOK_URL_ENV: &str = "SLACK_HOOK_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub queue_times: QueueTimesConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueTimesConfig {
    /// Park feed URL, e.g. `https://queue-times.com/parks/1/`.
    #[serde(default)]
    pub base_address: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_minutes")]
    pub poll_interval_minutes: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub hook_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_enabled")]
    pub enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub console_timestamps: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_minutes() -> u64 {
    5
}

fn default_api_enabled() -> bool {
    true
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for QueueTimesConfig {
    fn default() -> Self {
        Self {
            base_address: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: default_poll_interval_minutes(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: default_api_enabled(),
            bind_address: default_bind_address(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            console_timestamps: false,
        }
    }
}

impl Config {
    /// Parses a TOML document without touching the environment.
    pub fn from_toml_str(text: &str) -> Result<Self, MonitorError> {
        toml::from_str(text).map_err(|e| MonitorError::Configuration(e.to_string()))
    }

    /// Loads `path` if it exists (defaults otherwise), then applies env overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| {
                MonitorError::Configuration(format!("reading {}: {}", path.display(), e))
            })?;
            Self::from_toml_str(&text)?
        } else {
            Self::default()
        };

        config.apply_overrides(env::var(BASE_ADDRESS_ENV).ok(), env::var(HOOK_URL_ENV).ok());
        Ok(config)
    }

    /// Loads `.env`, then the file named by `RIDEMON_CONFIG` or the default path.
    pub fn from_env() -> Result<Self, MonitorError> {
        dotenv::dotenv().ok();
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Non-blank override values replace the file's values.
    pub fn apply_overrides(&mut self, base_address: Option<String>, hook_url: Option<String>) {
        if let Some(base) = base_address.filter(|v| !v.trim().is_empty()) {
            self.queue_times.base_address = base;
        }
        if let Some(hook) = hook_url.filter(|v| !v.trim().is_empty()) {
            self.slack.hook_url = Some(hook);
        }
    }

    /// Startup checks that don't need the network.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.queue_times.base_address.trim().is_empty() {
            return Err(MonitorError::Configuration(
                "queue_times.base_address is empty".to_string(),
            ));
        }
        if self.monitor.poll_interval_minutes == 0 {
            return Err(MonitorError::Configuration(
                "monitor.poll_interval_minutes must be at least 1".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.poll_interval_minutes * 60)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.queue_times.timeout_secs)
    }

    pub fn log_level(&self) -> Result<LogLevel, MonitorError> {
        self.logging.level.parse()
    }
}
