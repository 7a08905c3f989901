use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::data::models::{
    AddWordRequest, NextReviewInfo, ReviewEvent, ReviewPreviewResponse, SrsResult,
    WordListResponse, WordResponse,
};
use crate::handlers::extract::{JsonBody, PathParam, QueryParams};
use crate::handlers::{ClockParams, SearchParams};
use crate::state::AppState;

pub async fn list_words(State(state): State<AppState>) -> SrsResult<Json<WordListResponse>> {
    let words = state.service.list_words()?;
    Ok(Json(WordListResponse { words }))
}

pub async fn add_word(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AddWordRequest>,
) -> SrsResult<Json<WordResponse>> {
    let word = state.service.add_word(payload, chrono::Utc::now())?;
    Ok(Json(WordResponse {
        word,
        message: "Word added successfully".into(),
    }))
}

pub async fn delete_word(
    State(state): State<AppState>,
    PathParam(word_id): PathParam<i32>,
) -> SrsResult<Json<Value>> {
    state.service.delete_word(word_id)?;
    Ok(Json(json!({ "message": "Word deleted successfully" })))
}

pub async fn search_words(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> SrsResult<Json<WordListResponse>> {
    let words = state.service.search(&params.q)?;
    Ok(Json(WordListResponse { words }))
}

pub async fn next_review(
    State(state): State<AppState>,
    PathParam(word_id): PathParam<i32>,
    QueryParams(params): QueryParams<ClockParams>,
) -> SrsResult<Json<NextReviewInfo>> {
    Ok(Json(state.service.next_review_info(word_id, params.now())?))
}

pub async fn review_preview(
    State(state): State<AppState>,
    PathParam(word_id): PathParam<i32>,
    QueryParams(params): QueryParams<ClockParams>,
) -> SrsResult<Json<ReviewPreviewResponse>> {
    let preview = state.service.review_preview(word_id, params.now())?;
    Ok(Json(ReviewPreviewResponse { preview }))
}

pub async fn history(
    State(state): State<AppState>,
    PathParam(word_id): PathParam<i32>,
) -> SrsResult<Json<Vec<ReviewEvent>>> {
    Ok(Json(state.service.word_history(word_id)?))
}
