//! Community wellness routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::CandidateResult;

/// Users with sustained weekly commenting activity
pub async fn candidates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CandidateResult>>> {
    info!("Wellness candidates requested");

    let candidates = state.wellness.call().await?;

    Ok(Json(candidates))
}
