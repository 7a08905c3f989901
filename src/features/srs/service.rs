use chrono::{DateTime, Utc};
use diesel::prelude::*;
use validator::Validate;

use crate::data::models::{
    AddWordRequest, DailyCount, NewReviewEvent, NewWord, NextReviewInfo, Quality, ReviewEvent,
    ReviewPreview, ScheduleChangeset, SrsError, SrsResult, SrsStats, WordRecord,
};
use crate::data::repositories::{ReviewRepository, WordRepository};
use crate::db::{DbConn, DbPool};
use crate::features::srs::due::{self, DueQuery};
use crate::features::srs::locks::ReviewLocks;
use crate::features::srs::scheduler;
use crate::features::srs::stats::{self, WordCounts};

/// Entry point for every vocabulary and review operation.
///
/// Cheap to clone: the pool and the lock set are shared.
#[derive(Clone)]
pub struct SrsService {
    pool: DbPool,
    locks: ReviewLocks,
    overdue_grace_days: i64,
}

impl SrsService {
    pub fn new(pool: DbPool, overdue_grace_days: i64) -> Self {
        Self {
            pool,
            locks: ReviewLocks::new(),
            overdue_grace_days,
        }
    }

    pub fn overdue_grace_days(&self) -> i64 {
        self.overdue_grace_days
    }

    pub fn locks(&self) -> &ReviewLocks {
        &self.locks
    }

    fn conn(&self) -> SrsResult<DbConn> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            SrsError::Pool(e)
        })
    }

    pub fn list_words(&self) -> SrsResult<Vec<WordRecord>> {
        let mut conn = self.conn()?;
        Ok(WordRepository::list_all(&mut conn)?)
    }

    pub fn get_word(&self, word_id: i32) -> SrsResult<WordRecord> {
        let mut conn = self.conn()?;
        WordRepository::find(&mut conn, word_id)?.ok_or(SrsError::UnknownWord(word_id))
    }

    pub fn add_word(&self, request: AddWordRequest, now: DateTime<Utc>) -> SrsResult<WordRecord> {
        let request = request.trimmed();
        request.validate()?;

        let mut conn = self.conn()?;
        let record = WordRepository::insert(&mut conn, &NewWord::from_request(&request, now))?;
        log::info!("Added word {} ({:?})", record.id, record.word);
        Ok(record)
    }

    /// Removes the word. Its review events stay in the log for statistics.
    pub fn delete_word(&self, word_id: i32) -> SrsResult<()> {
        let mut conn = self.conn()?;
        if WordRepository::delete(&mut conn, word_id)? {
            log::info!("Deleted word {}", word_id);
            Ok(())
        } else {
            Err(SrsError::UnknownWord(word_id))
        }
    }

    /// Case-insensitive substring match on word, translation and example.
    /// An empty query matches every word.
    pub fn search(&self, query: &str) -> SrsResult<Vec<WordRecord>> {
        let needle = query.trim().to_lowercase();
        let words = self.list_words()?;
        if needle.is_empty() {
            return Ok(words);
        }
        Ok(words
            .into_iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&needle)
                    || w.translation.to_lowercase().contains(&needle)
                    || w.example.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn word_history(&self, word_id: i32) -> SrsResult<Vec<ReviewEvent>> {
        let mut conn = self.conn()?;
        let events = ReviewRepository::list_for_word(&mut conn, word_id)?;
        if events.is_empty() && WordRepository::find(&mut conn, word_id)?.is_none() {
            return Err(SrsError::UnknownWord(word_id));
        }
        Ok(events)
    }

    /// Validates a raw quality value and commits the review.
    pub fn submit_review(
        &self,
        word_id: i32,
        quality: i32,
        now: DateTime<Utc>,
    ) -> SrsResult<WordRecord> {
        let quality =
            Quality::try_from(quality).map_err(|quality| SrsError::InvalidQuality { word_id, quality })?;
        self.review(word_id, quality, now)
    }

    /// Reschedules the word and appends its review event in one transaction.
    ///
    /// Fails with `ConcurrentReview` while another review of the same word is
    /// in flight. Nothing is written unless both the word update and the log
    /// append succeed.
    pub fn review(&self, word_id: i32, quality: Quality, now: DateTime<Utc>) -> SrsResult<WordRecord> {
        let Some(_guard) = self.locks.try_acquire(word_id) else {
            log::warn!(
                "Rejected review of word {} (quality {}): review already in flight",
                word_id,
                quality.value()
            );
            return Err(SrsError::ConcurrentReview {
                word_id,
                quality: quality.value(),
            });
        };

        let mut conn = self.conn()?;
        // Write lock is taken at BEGIN; other writers queue on busy_timeout
        let updated = conn.immediate_transaction::<_, SrsError, _>(|conn| {
            let current =
                WordRepository::find(conn, word_id)?.ok_or(SrsError::UnknownWord(word_id))?;
            let next = scheduler::next_state(&current, quality, now);

            if !WordRepository::update_schedule(conn, word_id, &ScheduleChangeset::from(&next))? {
                return Err(SrsError::UnknownWord(word_id));
            }
            ReviewRepository::append(
                conn,
                &NewReviewEvent {
                    word_id,
                    quality: quality.value(),
                    reviewed_at: now.naive_utc(),
                    interval_days: next.interval_days,
                },
            )?;
            Ok(next)
        });

        match &updated {
            Ok(record) => log::info!(
                "Reviewed word {} as {}: interval {}d, ease {:.2}, due {}",
                word_id,
                quality.label(),
                record.interval_days,
                record.ease_factor,
                record.due_at
            ),
            Err(e @ (SrsError::Database(_) | SrsError::Pool(_))) => {
                log::error!("Review of word {} failed: {}", word_id, e)
            }
            Err(_) => {}
        }
        updated
    }

    pub fn review_preview(&self, word_id: i32, now: DateTime<Utc>) -> SrsResult<Vec<ReviewPreview>> {
        let record = self.get_word(word_id)?;
        Ok(scheduler::preview(&record, now))
    }

    pub fn next_review_info(&self, word_id: i32, now: DateTime<Utc>) -> SrsResult<NextReviewInfo> {
        let record = self.get_word(word_id)?;
        Ok(NextReviewInfo {
            word_id: record.id,
            due_at: record.due_at,
            interval_days: record.interval_days,
            is_due: record.is_due(now),
            days_until_due: (record.due_at - now).num_days(),
            last_reviewed_at: record.last_reviewed_at,
        })
    }

    pub fn due_words(&self, now: DateTime<Utc>) -> SrsResult<Vec<WordRecord>> {
        let mut conn = self.conn()?;
        let words = DueQuery::due(&mut conn, now)?;
        log::debug!("{} words due at {}", words.len(), now);
        Ok(words)
    }

    /// Overdue words; `grace_days` defaults to the configured grace.
    pub fn overdue_words(
        &self,
        now: DateTime<Utc>,
        grace_days: Option<i64>,
    ) -> SrsResult<Vec<WordRecord>> {
        let mut conn = self.conn()?;
        DueQuery::overdue(&mut conn, now, grace_days.unwrap_or(self.overdue_grace_days))
    }

    pub fn overdue_cutoff(&self, now: DateTime<Utc>) -> SrsResult<DateTime<Utc>> {
        due::overdue_cutoff(now, self.overdue_grace_days)
    }

    pub fn upcoming_words(&self, now: DateTime<Utc>, days: u32) -> SrsResult<Vec<WordRecord>> {
        let mut conn = self.conn()?;
        DueQuery::upcoming(&mut conn, now, days)
    }

    pub fn daily_upcoming(&self, now: DateTime<Utc>, days: u32) -> SrsResult<Vec<DailyCount>> {
        let mut conn = self.conn()?;
        DueQuery::daily_counts(&mut conn, now, days)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SrsResult<SrsStats> {
        let cutoff = self.overdue_cutoff(now)?;
        let mut conn = self.conn()?;

        // One read transaction so counts and log come from the same snapshot
        let (counts, events) = conn.transaction::<_, SrsError, _>(|conn| {
            let counts = WordCounts {
                total_words: WordRepository::count_all(conn)?,
                due_count: WordRepository::count_due_at_or_before(conn, now.naive_utc())?,
                overdue_count: WordRepository::count_due_before(conn, cutoff.naive_utc())?,
            };
            Ok((counts, ReviewRepository::list_all(conn)?))
        })?;

        Ok(stats::aggregate(counts, &events, now))
    }

    pub fn total_reviews(&self) -> SrsResult<i64> {
        let mut conn = self.conn()?;
        Ok(ReviewRepository::count(&mut conn)?)
    }
}
