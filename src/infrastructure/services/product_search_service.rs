//! Batched product search, memoized per query and store

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::cache::{Cache, Fingerprinted};
use crate::domain::search::{Estimate, ProductQuery, ProductSearchProvider, StoreContext};
use crate::domain::DomainError;

/// Looks up every query of a materials list concurrently
pub struct ProductSearchService {
    provider: Arc<dyn ProductSearchProvider>,
    cache: Arc<dyn Cache<Value>>,
}

impl ProductSearchService {
    pub fn new(provider: Arc<dyn ProductSearchProvider>, cache: Arc<dyn Cache<Value>>) -> Self {
        Self { provider, cache }
    }

    /// Raw provider responses, one per query and in query order.
    ///
    /// Queries run concurrently; the first failure fails the whole batch and
    /// nothing partial is returned. Results that completed before the failure
    /// stay cached.
    pub async fn search_all(
        &self,
        queries: &[String],
        store: &StoreContext,
        bypass: bool,
    ) -> Result<Vec<Value>, DomainError> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            provider = self.provider.provider_name(),
            queries = queries.len(),
            bypass,
            "Searching products"
        );

        let lookups = queries
            .iter()
            .map(|q| self.search_one(ProductQuery::new(q.as_str(), store.clone()), bypass));

        try_join_all(lookups).await
    }

    /// Searches then reduces the responses to first products and a total
    pub async fn estimate(
        &self,
        queries: &[String],
        store: &StoreContext,
        bypass: bool,
    ) -> Result<Estimate, DomainError> {
        let responses = self.search_all(queries, store, bypass).await?;
        Ok(Estimate::from_responses(&responses))
    }

    async fn search_one(&self, query: ProductQuery, bypass: bool) -> Result<Value, DomainError> {
        let fingerprint = query.fingerprint();

        if !bypass {
            if let Some(response) = self.cache.read(fingerprint.as_str()) {
                debug!(fingerprint = %fingerprint.digest(), "Search cache hit");
                return Ok(response);
            }
            debug!(fingerprint = %fingerprint.digest(), "Search cache miss");
        }

        let response = self
            .provider
            .search(&query)
            .await
            .inspect_err(|e| warn!(fingerprint = %fingerprint.digest(), error = %e, "Product search failed"))?;

        self.cache.write(fingerprint.as_str(), response.clone());
        Ok(response)
    }
}

impl fmt::Debug for ProductSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductSearchService")
            .field("provider", &self.provider.provider_name())
            .field("cache", &self.cache)
            .finish()
    }
}
