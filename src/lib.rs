//! Build List API
//!
//! Turns a free-text build plan into a priced materials list:
//! - Materials extraction through an LLM, memoized per plan and model
//! - Home Depot product search through SerpAPI, memoized per query and store
//! - Per-request cache bypass that still refreshes the cache

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::{OpenAiConfig, SerpApiConfig};
use domain::{Cache, LlmProvider, Material, ProductSearchProvider};
use infrastructure::{
    cache::{InMemoryCache, InMemoryCacheConfig},
    http_client::HttpClient,
    llm::OpenAiProvider,
    search::SerpApiProvider,
    services::{PlanParserService, ProductSearchService},
};
use tracing::{info, warn};

/// Create the application state from default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration.
///
/// An integration without a credential is left out; its endpoint then
/// reports the missing key on every request.
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let plan_parser = create_plan_parser(config)?;
    let product_search = create_product_search(config)?;

    Ok(AppState::new(plan_parser, product_search))
}

/// Plan parser wired to OpenAI, if a key is configured
pub fn create_plan_parser(config: &AppConfig) -> anyhow::Result<Option<Arc<PlanParserService>>> {
    let Some(llm) = create_openai_provider(&config.openai)? else {
        warn!("OPENAI_API_KEY not configured; plan parsing disabled");
        return Ok(None);
    };

    let cache: Arc<dyn Cache<Vec<Material>>> = Arc::new(InMemoryCache::with_config(
        InMemoryCacheConfig::default()
            .with_name("parse")
            .with_ttl(config.cache.parse_ttl()),
    ));

    info!(
        model = %config.openai.model,
        ttl_ms = config.cache.parse_ttl_ms,
        "Plan parser ready"
    );

    Ok(Some(Arc::new(PlanParserService::with_model(
        llm,
        cache,
        config.openai.model.clone(),
    ))))
}

fn create_product_search(config: &AppConfig) -> anyhow::Result<Option<Arc<ProductSearchService>>> {
    let Some(provider) = create_serpapi_provider(&config.serpapi)? else {
        warn!("SERPAPI_KEY not configured; product search disabled");
        return Ok(None);
    };

    let cache: Arc<dyn Cache<serde_json::Value>> = Arc::new(InMemoryCache::with_config(
        InMemoryCacheConfig::default()
            .with_name("search")
            .with_ttl(config.cache.search_ttl()),
    ));

    info!(ttl_ms = config.cache.search_ttl_ms, "Product search ready");

    Ok(Some(Arc::new(ProductSearchService::new(provider, cache))))
}

fn create_openai_provider(config: &OpenAiConfig) -> anyhow::Result<Option<Arc<dyn LlmProvider>>> {
    let Some(api_key) = config.credential() else {
        return Ok(None);
    };

    let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
    info!(base_url = %config.base_url, "Using OpenAI provider");

    Ok(Some(Arc::new(OpenAiProvider::with_base_url(
        client,
        api_key,
        config.base_url.as_str(),
    ))))
}

fn create_serpapi_provider(
    config: &SerpApiConfig,
) -> anyhow::Result<Option<Arc<dyn ProductSearchProvider>>> {
    let Some(api_key) = config.credential() else {
        return Ok(None);
    };

    let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
    info!(base_url = %config.base_url, engine = %config.engine, "Using SerpAPI provider");

    Ok(Some(Arc::new(
        SerpApiProvider::with_base_url(client, api_key, config.base_url.as_str())
            .with_engine(config.engine.as_str())
            .with_country(config.country.as_str()),
    )))
}
