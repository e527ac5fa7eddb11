//! Per-request cache bypass switch

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, Uri, request::Parts},
};

pub const CACHE_BUST_HEADER: &str = "x-cache-bust";

/// Whether the caller asked to skip cached values for this request.
///
/// Set by `?cache=0`, `?cache=false` or the `x-cache-bust: 1` header. A
/// bypassed request still refreshes the cache with its fresh result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheBypass(pub bool);

impl CacheBypass {
    pub fn from_request(uri: &Uri, headers: &HeaderMap) -> Self {
        Self(query_disables_cache(uri) || header_busts_cache(headers))
    }

    pub fn is_set(self) -> bool {
        self.0
    }
}

impl<S> FromRequestParts<S> for CacheBypass
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_request(&parts.uri, &parts.headers))
    }
}

/// First `cache` query parameter is `0` or `false`
fn query_disables_cache(uri: &Uri) -> bool {
    let Ok(Query(params)) = Query::<Vec<(String, String)>>::try_from_uri(uri) else {
        return false;
    };

    params
        .iter()
        .find(|(name, _)| name == "cache")
        .is_some_and(|(_, value)| value == "0" || value == "false")
}

fn header_busts_cache(headers: &HeaderMap) -> bool {
    headers
        .get(CACHE_BUST_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "1")
}
