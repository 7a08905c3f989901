use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::review_events;

/// Self-assessed recall quality for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Quality {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Again => "Again",
            Quality::Hard => "Hard",
            Quality::Good => "Good",
            Quality::Easy => "Easy",
        }
    }

    /// Counts towards retention.
    pub fn is_success(self) -> bool {
        self >= Quality::Good
    }
}

impl TryFrom<i32> for Quality {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Quality::Again),
            1 => Ok(Quality::Hard),
            2 => Ok(Quality::Good),
            3 => Ok(Quality::Easy),
            other => Err(other),
        }
    }
}

impl From<Quality> for i32 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

/// Append-only log entry written for every committed review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub id: i32,
    pub word_id: i32,
    pub quality: Quality,
    pub reviewed_at: DateTime<Utc>,
    pub interval_days: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = review_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewEventRow {
    pub id: i32,
    pub word_id: i32,
    pub quality: i32,
    pub reviewed_at: NaiveDateTime,
    pub interval_days: i32,
}

impl TryFrom<ReviewEventRow> for ReviewEvent {
    type Error = i32;

    fn try_from(row: ReviewEventRow) -> Result<Self, Self::Error> {
        Ok(ReviewEvent {
            id: row.id,
            word_id: row.word_id,
            quality: Quality::try_from(row.quality)?,
            reviewed_at: row.reviewed_at.and_utc(),
            interval_days: row.interval_days,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = review_events)]
pub struct NewReviewEvent {
    pub word_id: i32,
    pub quality: i32,
    pub reviewed_at: NaiveDateTime,
    pub interval_days: i32,
}

/// Request payload for submitting a review. Quality stays a raw integer so
/// out-of-range values are reported with their word id.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub word_id: i32,
    pub quality: i32,
}
