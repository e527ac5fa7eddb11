//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, LogFormat, LoggingConfig, OpenAiConfig, SerpApiConfig, ServerConfig,
};
