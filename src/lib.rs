pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod state;
pub mod utils;

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::handlers::{health, srs};
use crate::state::AppState;

pub use crate::db::DbPool;

/// Assembles the HTTP surface: `/api/*` plus the static front end.
pub fn build_app(state: AppState, config: &Config) -> Router {
    // Sessions configuration
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(false);

    let sr_router = Router::new()
        .route("/words", get(srs::words::list_words).post(srs::words::add_word))
        .route("/words/{id}", delete(srs::words::delete_word))
        .route("/words/{id}/next-review", get(srs::words::next_review))
        .route("/words/{id}/review-preview", get(srs::words::review_preview))
        .route("/words/{id}/history", get(srs::words::history))
        .route("/search", get(srs::words::search_words))
        .route("/due", get(srs::schedule::due))
        .route("/overdue", get(srs::schedule::overdue))
        .route("/upcoming", get(srs::schedule::upcoming))
        .route("/daily-upcoming", get(srs::schedule::daily_upcoming))
        .route("/review", post(srs::review::submit_review))
        .route("/stats", get(srs::stats::stats))
        .route(
            "/session",
            get(srs::session::view_session).post(srs::session::command_session),
        );

    let api_router = Router::new()
        .route("/test", get(health::health))
        .nest("/sr", sr_router)
        .layer(cors_layer(&config.cors_origins));

    Router::new()
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(session_layer)
        .layer(middleware::from_fn(log_requests))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed();
    if status.is_server_error() {
        log::warn!("{} {} -> {} ({:?})", method, uri, status, elapsed);
    } else {
        log::debug!("{} {} -> {} ({:?})", method, uri, status, elapsed);
    }
    response
}
