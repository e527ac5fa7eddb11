use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Flat environment variables honoured on top of the layered sources, mapped
/// to the config key they override
const LEGACY_ENV_OVERRIDES: [(&str, &str); 7] = [
    ("OPENAI_API_KEY", "openai.api_key"),
    ("OPENAI_MODEL", "openai.model"),
    ("OPENAI_BASE_URL", "openai.base_url"),
    ("SERPAPI_KEY", "serpapi.api_key"),
    ("SERPAPI_BASE_URL", "serpapi.base_url"),
    ("PARSE_CACHE_TTL_MS", "cache.parse_ttl_ms"),
    ("HD_CACHE_TTL_MS", "cache.search_ttl_ms"),
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub openai: OpenAiConfig,
    pub serpapi: SerpApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Per-endpoint cache lifetimes, in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub parse_ttl_ms: u64,
    pub search_ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerpApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub engine: String,
    pub country: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            parse_ttl_ms: 300_000,    // 5 minutes
            search_ttl_ms: 3_600_000, // 1 hour
        }
    }
}

impl CacheConfig {
    pub fn parse_ttl(&self) -> Duration {
        Duration::from_millis(self.parse_ttl_ms)
    }

    pub fn search_ttl(&self) -> Duration {
        Duration::from_millis(self.search_ttl_ms)
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    /// The credential, treating an empty value as absent
    pub fn credential(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://serpapi.com".to_string(),
            engine: "home_depot".to_string(),
            country: "us".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SerpApiConfig {
    /// The credential, treating an empty value as absent
    pub fn credential(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads `config/default`, `config/local`, `APP__*` variables and the
    /// flat legacy variables, later sources winning
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::load`] with the legacy variables read through `lookup`
    pub fn load_with_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_ENV_OVERRIDES {
            let value = lookup(variable).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }
}
