//! Request, response and error types shared by the handlers

pub mod error;
pub mod json;
pub mod requests;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use requests::{ParsePlanRequest, SearchProductsRequest};
