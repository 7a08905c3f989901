#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use vocab_srs::data::models::{AddWordRequest, WordRecord};
use vocab_srs::db;
use vocab_srs::features::srs::SrsService;

/// A service over a fresh SQLite file. Keep the `TempDir` alive for the
/// duration of the test.
pub fn service() -> (SrsService, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary.db");
    let pool = db::build_pool(path.to_str().unwrap(), 4).unwrap();
    db::run_migrations(&pool).unwrap();
    (SrsService::new(pool, 1), dir)
}

pub fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

pub fn add(service: &SrsService, word: &str, translation: &str, at: DateTime<Utc>) -> WordRecord {
    service
        .add_word(
            AddWordRequest {
                word: word.into(),
                translation: translation.into(),
                ..Default::default()
            },
            at,
        )
        .unwrap()
}
