use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::srs::scheduler::DEFAULT_EASE_FACTOR;
use crate::schema::words;

/// A vocabulary item together with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: i32,
    pub word: String,
    pub translation: String,
    pub example: String,
    pub word_type: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub ease_factor: f64,
    pub interval_days: i32,
    /// Consecutive reviews not rated "Again".
    pub repetitions: i32,
    pub due_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl WordRecord {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

/// Row as stored in the `words` table. Timestamps are UTC.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = words)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WordRow {
    pub id: i32,
    pub word: String,
    pub translation: String,
    pub example: String,
    pub word_type: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub due_at: NaiveDateTime,
    pub last_reviewed_at: Option<NaiveDateTime>,
}

impl From<WordRow> for WordRecord {
    fn from(row: WordRow) -> Self {
        WordRecord {
            id: row.id,
            word: row.word,
            translation: row.translation,
            example: row.example,
            word_type: row.word_type,
            notes: row.notes,
            created_at: row.created_at.and_utc(),
            ease_factor: row.ease_factor,
            interval_days: row.interval_days,
            repetitions: row.repetitions,
            due_at: row.due_at.and_utc(),
            last_reviewed_at: row.last_reviewed_at.map(|t| t.and_utc()),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = words)]
pub struct NewWord<'a> {
    pub word: &'a str,
    pub translation: &'a str,
    pub example: &'a str,
    pub word_type: &'a str,
    pub notes: &'a str,
    pub created_at: NaiveDateTime,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub due_at: NaiveDateTime,
}

impl<'a> NewWord<'a> {
    /// A never-reviewed word, due immediately.
    pub fn from_request(req: &'a AddWordRequest, now: DateTime<Utc>) -> Self {
        let now = now.naive_utc();
        NewWord {
            word: &req.word,
            translation: &req.translation,
            example: &req.example,
            word_type: &req.word_type,
            notes: &req.notes,
            created_at: now,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
            due_at: now,
        }
    }
}

/// Scheduling columns rewritten by a review. Lexical content is never touched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = words)]
#[diesel(treat_none_as_null = true)]
pub struct ScheduleChangeset {
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub due_at: NaiveDateTime,
    pub last_reviewed_at: Option<NaiveDateTime>,
}

impl From<&WordRecord> for ScheduleChangeset {
    fn from(record: &WordRecord) -> Self {
        ScheduleChangeset {
            ease_factor: record.ease_factor,
            interval_days: record.interval_days,
            repetitions: record.repetitions,
            due_at: record.due_at.naive_utc(),
            last_reviewed_at: record.last_reviewed_at.map(|t| t.naive_utc()),
        }
    }
}

/// Request payload for adding a word
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddWordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Word is required"))]
    pub word: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Translation is required"))]
    pub translation: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub example: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub word_type: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: String,
}

impl AddWordRequest {
    /// Trims every field; a whitespace-only word counts as missing.
    pub fn trimmed(self) -> Self {
        AddWordRequest {
            word: self.word.trim().to_string(),
            translation: self.translation.trim().to_string(),
            example: self.example.trim().to_string(),
            word_type: self.word_type.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordResponse {
    pub word: WordRecord,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<WordRecord>,
}
