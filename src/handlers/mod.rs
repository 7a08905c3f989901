pub mod extract;
pub mod health;
pub mod srs;

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Query parameters shared by the read endpoints.
///
/// `now` pins the clock (RFC 3339); it defaults to the server time.
#[derive(Debug, Default, Deserialize)]
pub struct ClockParams {
    pub now: Option<DateTime<Utc>>,
}

impl ClockParams {
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OverdueParams {
    pub now: Option<DateTime<Utc>>,
    pub grace: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    pub now: Option<DateTime<Utc>>,
    pub days: Option<u32>,
}

impl WindowParams {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
