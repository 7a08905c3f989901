use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::features::srs::due::MAX_WINDOW_DAYS;

/// Runtime configuration, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub static_dir: String,
    pub overdue_grace_days: i64,
    pub db_pool_size: u32,
    pub debug_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "vocabulary.db".into(),
            bind_addr: "0.0.0.0:5000".into(),
            cors_origins: vec![
                "http://localhost:5173".into(),
                "http://localhost:3000".into(),
            ],
            static_dir: "static".into(),
            overdue_grace_days: 1,
            db_pool_size: 8,
            debug_logs: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origins,
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            overdue_grace_days: parse_var("OVERDUE_GRACE_DAYS", defaults.overdue_grace_days)?,
            db_pool_size: parse_var("DB_POOL_SIZE", defaults.db_pool_size)?,
            debug_logs: env::var("DEBUG_LOGS").map(|v| v == "1").unwrap_or(defaults.debug_logs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the service would otherwise fail on at request time.
    pub fn validate(&self) -> Result<()> {
        let max_grace = MAX_WINDOW_DAYS as i64;
        if !(0..=max_grace).contains(&self.overdue_grace_days) {
            anyhow::bail!(
                "OVERDUE_GRACE_DAYS must be between 0 and {}, got {}",
                max_grace,
                self.overdue_grace_days
            );
        }
        if self.db_pool_size == 0 {
            anyhow::bail!("DB_POOL_SIZE must be at least 1");
        }
        Ok(())
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.debug_logs { "debug" } else { "info" }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
