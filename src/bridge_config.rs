use reqwest::Url;
use std::time::Duration;

/// Address of the Unity Editor listener when nothing else is configured
pub const DEFAULT_UNITY_URL: &str = "http://localhost:8765";

/// Budget for one round trip to the Unity Editor listener
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const UNITY_URL_ENV: &str = "UNITY_MCP_URL";
pub const VALIDATE_ARGUMENTS_ENV: &str = "UNITY_MCP_VALIDATE_ARGUMENTS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid Unity listener URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Invalid value '{value}' for {name}, expected true or false")]
    InvalidFlag { name: &'static str, value: String },
}

/// Runtime settings of the bridge. Read once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub unity_url: String,
    pub timeout: Duration,
    /// Check arguments against the tool schema before forwarding them
    pub validate_arguments: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            unity_url: DEFAULT_UNITY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            validate_arguments: false,
        }
    }
}

impl BridgeConfig {
    /// Builds the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(UNITY_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.unity_url = parse_url(url.trim())?;
        }

        if let Some(flag) = lookup(VALIDATE_ARGUMENTS_ENV).filter(|v| !v.trim().is_empty()) {
            config.validate_arguments = parse_flag(VALIDATE_ARGUMENTS_ENV, &flag)?;
        }

        Ok(config)
    }

    pub fn with_unity_url(mut self, url: impl Into<String>) -> Self {
        self.unity_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_validation(mut self, validate_arguments: bool) -> Self {
        self.validate_arguments = validate_arguments;
        self
    }
}

fn parse_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        scheme => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}
