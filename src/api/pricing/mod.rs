//! Build list pricing endpoints

pub mod home_depot;
pub mod plan;

use axum::{Router, routing::post};

use super::state::AppState;

/// Create the pricing router
pub fn create_pricing_router() -> Router<AppState> {
    Router::new()
        .route("/api", post(plan::parse_plan))
        .route("/api/home-depot", post(home_depot::search_products))
        .route("/api/home-depot/estimate", post(home_depot::estimate_products))
}
