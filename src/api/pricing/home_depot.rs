//! Home Depot product search handlers

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde_json::Value;
use tracing::debug;

use crate::api::middleware::CacheBypass;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SearchProductsRequest};
use crate::domain::Estimate;
use crate::infrastructure::services::ProductSearchService;

/// The product search service, required before the body is read so a
/// missing `SERPAPI_KEY` is reported whatever the request carries
#[derive(Debug, Clone)]
pub struct RequireProductSearch(pub Arc<ProductSearchService>);

impl FromRequestParts<AppState> for RequireProductSearch {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let search = state.product_search()?;
        Ok(Self(search))
    }
}

/// POST /api/home-depot
///
/// Raw search responses, one per item and in item order.
pub async fn search_products(
    RequireProductSearch(search): RequireProductSearch,
    CacheBypass(bypass): CacheBypass,
    Json(request): Json<SearchProductsRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let queries = request.queries();

    debug!(queries = queries.len(), bypass, "Searching Home Depot");

    let results = search.search_all(queries, &request.store, bypass).await?;

    Ok(Json(results))
}

/// POST /api/home-depot/estimate
pub async fn estimate_products(
    RequireProductSearch(search): RequireProductSearch,
    CacheBypass(bypass): CacheBypass,
    Json(request): Json<SearchProductsRequest>,
) -> Result<Json<Estimate>, ApiError> {
    let queries = request.queries();

    debug!(queries = queries.len(), bypass, "Estimating Home Depot total");

    let estimate = search.estimate(queries, &request.store, bypass).await?;

    Ok(Json(estimate))
}
