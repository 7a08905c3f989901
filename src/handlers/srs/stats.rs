use axum::{extract::State, Json};

use crate::data::models::{SrsResult, SrsStats};
use crate::handlers::extract::QueryParams;
use crate::handlers::ClockParams;
use crate::state::AppState;

pub async fn stats(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ClockParams>,
) -> SrsResult<Json<SrsStats>> {
    Ok(Json(state.service.stats(params.now())?))
}
