//! Infrastructure layer - External service implementations

pub mod cache;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod search;
pub mod services;
