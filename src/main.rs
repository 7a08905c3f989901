use anyhow::Context;
use tokio::net::TcpListener;

use vocab_srs::{
    build_app,
    config::Config,
    db,
    features::srs::SrsService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .init();

    log::info!(
        "Starting with database {:?}, overdue grace {}d, pool size {}",
        config.database_url,
        config.overdue_grace_days,
        config.db_pool_size
    );

    // Database configuration
    let pool = db::build_pool(&config.database_url, config.db_pool_size)
        .with_context(|| format!("failed to open database {:?}", config.database_url))?;
    db::run_migrations(&pool).context("failed to create schema")?;

    let service = SrsService::new(pool, config.overdue_grace_days);
    let app = build_app(AppState::new(service), &config);

    // Start server
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    log::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
