use axum::{extract::State, Json};

use crate::data::models::{DailyCountsResponse, SrsResult, UpcomingResponse, WordListResponse};
use crate::handlers::extract::QueryParams;
use crate::handlers::{ClockParams, OverdueParams, WindowParams};
use crate::state::AppState;

pub async fn due(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ClockParams>,
) -> SrsResult<Json<WordListResponse>> {
    let words = state.service.due_words(params.now())?;
    Ok(Json(WordListResponse { words }))
}

pub async fn overdue(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<OverdueParams>,
) -> SrsResult<Json<WordListResponse>> {
    let now = params.now.unwrap_or_else(chrono::Utc::now);
    let words = state.service.overdue_words(now, params.grace)?;
    Ok(Json(WordListResponse { words }))
}

pub async fn upcoming(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<WindowParams>,
) -> SrsResult<Json<UpcomingResponse>> {
    let now = params.now.unwrap_or_else(chrono::Utc::now);
    let upcoming = state.service.upcoming_words(now, params.days())?;
    Ok(Json(UpcomingResponse { upcoming }))
}

pub async fn daily_upcoming(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<WindowParams>,
) -> SrsResult<Json<DailyCountsResponse>> {
    let now = params.now.unwrap_or_else(chrono::Utc::now);
    let daily_counts = state.service.daily_upcoming(now, params.days())?;
    Ok(Json(DailyCountsResponse { daily_counts }))
}
