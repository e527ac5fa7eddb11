use async_trait::async_trait;
use serde_json::Value;

use super::ProductQuery;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Shopping search backend. Returns the provider's raw JSON response.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductSearchProvider: Send + Sync {
    async fn search(&self, query: &ProductQuery) -> Result<Value, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
