//! Product search provider implementations

mod serpapi;

pub use serpapi::{
    DEFAULT_SERPAPI_BASE_URL, DEFAULT_SERPAPI_COUNTRY, DEFAULT_SERPAPI_ENGINE, SerpApiProvider,
};
