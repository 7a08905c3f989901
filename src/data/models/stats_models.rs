use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Quality;

/// Aggregated review statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrsStats {
    pub total_words: i64,
    pub due_count: i64,
    pub overdue_count: i64,
    /// Reviews committed on the current calendar day.
    pub completed_reviews: i64,
    /// Every review ever logged, including those of deleted words.
    pub total_reviews: i64,
    pub average_quality: f64,
    /// Percentage of reviews rated Good or Easy, one decimal.
    pub retention_rate: f64,
    pub streak_days: u32,
    pub last_review_date: Option<NaiveDate>,
}

/// One bucket of the due forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyCountsResponse {
    pub daily_counts: Vec<DailyCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpcomingResponse {
    pub upcoming: Vec<super::WordRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextReviewInfo {
    pub word_id: i32,
    pub due_at: DateTime<Utc>,
    pub interval_days: i32,
    pub is_due: bool,
    /// Whole days until due; zero or negative once due.
    pub days_until_due: i64,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// What a rating would do, without committing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPreview {
    pub quality: Quality,
    pub label: String,
    pub interval_days: i32,
    pub due_at: DateTime<Utc>,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewPreviewResponse {
    pub preview: Vec<ReviewPreview>,
}
