use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, ProductQuery, ProductSearchProvider};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_SERPAPI_ENGINE: &str = "home_depot";
pub const DEFAULT_SERPAPI_COUNTRY: &str = "us";

/// SerpAPI shopping search (Home Depot engine by default)
#[derive(Debug)]
pub struct SerpApiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    engine: String,
    country: String,
}

impl<C: HttpClientTrait> SerpApiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPAPI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            engine: DEFAULT_SERPAPI_ENGINE.to_string(),
            country: DEFAULT_SERPAPI_COUNTRY.to_string(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }

    fn query_params<'a>(&'a self, query: &'a ProductQuery) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![
            ("engine", self.engine.as_str()),
            ("q", query.query.as_str()),
            ("country", self.country.as_str()),
        ];

        if let Some(ref zip) = query.store.store_zip {
            params.push(("store_zip", zip.as_str()));
        }

        if let Some(ref id) = query.store.store_id {
            params.push(("store_id", id.as_str()));
        }

        params.push(("api_key", self.api_key.as_str()));
        params
    }
}

#[async_trait]
impl<C: HttpClientTrait> ProductSearchProvider for SerpApiProvider<C> {
    async fn search(&self, query: &ProductQuery) -> Result<Value, DomainError> {
        let url = self.search_url();
        let response = self.client.get_json(&url, &self.query_params(query)).await?;

        // SerpAPI reports search failures in the body, sometimes with a 200
        if let Some(error) = response.get("error").and_then(Value::as_str) {
            return Err(DomainError::provider("serpapi", error));
        }

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "serpapi"
    }
}
