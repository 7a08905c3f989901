use tower_sessions::Session;

use crate::data::models::SrsResult;
use crate::features::srs::ReviewSession;

const REVIEW_SESSION_KEY: &str = "review_session";

/// Loads the browser's review session, or a fresh idle one.
pub async fn load_review_session(session: &Session) -> SrsResult<ReviewSession> {
    let stored = session
        .get::<ReviewSession>(REVIEW_SESSION_KEY)
        .await
        .map_err(|e| {
            log::error!("Failed to read review session: {}", e);
            e
        })?;
    Ok(stored.unwrap_or_default())
}

pub async fn save_review_session(session: &Session, review: &ReviewSession) -> SrsResult<()> {
    session.insert(REVIEW_SESSION_KEY, review).await?;
    Ok(())
}

pub async fn clear_review_session(session: &Session) -> SrsResult<()> {
    session.remove::<ReviewSession>(REVIEW_SESSION_KEY).await?;
    Ok(())
}
