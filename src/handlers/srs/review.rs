use axum::{extract::State, Json};

use crate::data::models::{ReviewRequest, SrsResult, WordResponse};
use crate::handlers::extract::JsonBody;
use crate::state::AppState;

pub async fn submit_review(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReviewRequest>,
) -> SrsResult<Json<WordResponse>> {
    let word = state
        .service
        .submit_review(payload.word_id, payload.quality, chrono::Utc::now())?;
    Ok(Json(WordResponse {
        word,
        message: "Review completed".into(),
    }))
}
