//! API middleware components

pub mod cache_bypass;
pub mod logging;

pub use cache_bypass::CacheBypass;
pub use logging::logging_middleware;
