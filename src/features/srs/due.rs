//! Due-set queries: what is due now, what is overdue, and the daily forecast.
//!
//! Each query is a single read against the store, so it observes either the
//! old or the new state of a word whose review commits concurrently.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use diesel::SqliteConnection;

use crate::data::models::{DailyCount, SrsError, SrsResult, WordRecord};
use crate::data::repositories::WordRepository;

/// Longest forecast or upcoming window accepted, in days.
pub const MAX_WINDOW_DAYS: u32 = 365;

pub struct DueQuery;

impl DueQuery {
    /// Words with `due_at <= now`, earliest due first.
    pub fn due(conn: &mut SqliteConnection, now: DateTime<Utc>) -> SrsResult<Vec<WordRecord>> {
        Ok(WordRepository::due_at_or_before(conn, now.naive_utc())?)
    }

    /// Due words whose `due_at` lies more than `grace_days` before `now`.
    pub fn overdue(
        conn: &mut SqliteConnection,
        now: DateTime<Utc>,
        grace_days: i64,
    ) -> SrsResult<Vec<WordRecord>> {
        let cutoff = overdue_cutoff(now, grace_days)?;
        Ok(WordRepository::due_before(conn, cutoff.naive_utc())?)
    }

    /// Words not yet due that become due within the next `days` days.
    pub fn upcoming(
        conn: &mut SqliteConnection,
        now: DateTime<Utc>,
        days: u32,
    ) -> SrsResult<Vec<WordRecord>> {
        check_window(days)?;
        let until = now + Duration::days(days as i64);
        Ok(WordRepository::due_between(conn, now.naive_utc(), until.naive_utc())?)
    }

    /// Per-day due counts for `days` calendar days starting today (UTC).
    pub fn daily_counts(
        conn: &mut SqliteConnection,
        now: DateTime<Utc>,
        days: u32,
    ) -> SrsResult<Vec<DailyCount>> {
        check_window(days)?;
        let today = now.date_naive();
        let end = (today + Duration::days(days as i64)).and_hms_opt(0, 0, 0);
        let Some(end) = end else {
            return Err(SrsError::Validation("forecast window out of range".into()));
        };

        let due_ats: Vec<DateTime<Utc>> = WordRepository::due_timestamps_before(conn, end)?
            .into_iter()
            .map(|t| t.and_utc())
            .collect();
        Ok(bucket_by_day(&due_ats, today, days))
    }
}

/// Instant before which a due word counts as overdue.
pub fn overdue_cutoff(now: DateTime<Utc>, grace_days: i64) -> SrsResult<DateTime<Utc>> {
    if !(0..=MAX_WINDOW_DAYS as i64).contains(&grace_days) {
        return Err(SrsError::Validation(format!(
            "grace must be between 0 and {} days, got {}",
            MAX_WINDOW_DAYS, grace_days
        )));
    }
    Ok(now - Duration::days(grace_days))
}

/// Groups due timestamps into one bucket per calendar day. Days without
/// due words are present with a zero count; anything due before `today`
/// is folded into today's bucket.
pub fn bucket_by_day(due_ats: &[DateTime<Utc>], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    let mut counts: Vec<DailyCount> = (0..days as i64)
        .map(|offset| DailyCount {
            date: today + Duration::days(offset),
            count: 0,
        })
        .collect();

    for due_at in due_ats {
        let offset = (due_at.date_naive() - today).num_days().max(0);
        if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| counts.get_mut(i)) {
            bucket.count += 1;
        }
    }

    counts
}

fn check_window(days: u32) -> SrsResult<()> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(SrsError::Validation(format!(
            "days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS, days
        )));
    }
    Ok(())
}
