use axum::{extract::State, Json};
use tower_sessions::Session;

use crate::data::models::SrsResult;
use crate::features::srs::{SessionCommand, SessionView};
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::utils::{clear_review_session, load_review_session, save_review_session};

pub async fn view_session(session: Session) -> SrsResult<Json<SessionView>> {
    let review = load_review_session(&session).await?;
    Ok(Json(SessionView::of(&review, None)))
}

/// Applies one controller command and stores the resulting state.
///
/// The state is stored even when the command fails, since a failed rating
/// may still have dropped a word that no longer exists.
pub async fn command_session(
    State(state): State<AppState>,
    session: Session,
    JsonBody(command): JsonBody<SessionCommand>,
) -> SrsResult<Json<SessionView>> {
    let mut review = load_review_session(&session).await?;
    let committed = review.apply(command, &state.service, chrono::Utc::now());

    if command == SessionCommand::Abandon {
        clear_review_session(&session).await?;
    } else {
        save_review_session(&session, &review).await?;
    }
    log::debug!("Review session now {}", review.state().name());

    Ok(Json(SessionView::of(&review, committed?)))
}
