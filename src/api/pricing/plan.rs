//! Build plan parsing handler

use axum::extract::State;
use tracing::debug;

use crate::api::middleware::CacheBypass;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ParsePlanRequest};
use crate::domain::Material;

/// POST /api
pub async fn parse_plan(
    State(state): State<AppState>,
    CacheBypass(bypass): CacheBypass,
    Json(request): Json<ParsePlanRequest>,
) -> Result<Json<Vec<Material>>, ApiError> {
    let parser = state.plan_parser()?;

    debug!(plan_len = request.build_plan.len(), bypass, "Parsing build plan");

    let materials = parser.parse(&request.build_plan, bypass).await?;

    Ok(Json(materials))
}
