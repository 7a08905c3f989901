//! Review statistics, recomputed from the full review log on every call.
//!
//! The mean is taken from an exact integer sum of qualities, so it does not
//! drift however long the history grows.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::data::models::{ReviewEvent, SrsStats};

/// Word counts taken from the store at the same `now` as the review log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCounts {
    pub total_words: i64,
    pub due_count: i64,
    pub overdue_count: i64,
}

pub fn aggregate(counts: WordCounts, events: &[ReviewEvent], now: DateTime<Utc>) -> SrsStats {
    let today = now.date_naive();
    let review_days: BTreeSet<NaiveDate> =
        events.iter().map(|e| e.reviewed_at.date_naive()).collect();

    SrsStats {
        total_words: counts.total_words,
        due_count: counts.due_count,
        overdue_count: counts.overdue_count,
        completed_reviews: events
            .iter()
            .filter(|e| e.reviewed_at.date_naive() == today)
            .count() as i64,
        total_reviews: events.len() as i64,
        average_quality: average_quality(events),
        retention_rate: retention_rate(events),
        streak_days: streak_days(&review_days, today),
        last_review_date: events.iter().map(|e| e.reviewed_at).max().map(|t| t.date_naive()),
    }
}

/// Arithmetic mean of every logged quality, 0.0 for an empty log.
pub fn average_quality(events: &[ReviewEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let sum: i64 = events.iter().map(|e| e.quality.value() as i64).sum();
    sum as f64 / events.len() as f64
}

/// Percentage of reviews rated Good or Easy, rounded to one decimal.
pub fn retention_rate(events: &[ReviewEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let successes = events.iter().filter(|e| e.quality.is_success()).count();
    let rate = successes as f64 / events.len() as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Consecutive days with at least one review, ending today or yesterday.
pub fn streak_days(review_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);
    let mut day = if review_days.contains(&today) {
        today
    } else if review_days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    while review_days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::Quality;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 20, 18, 0, 0).unwrap()
    }

    fn event(days_ago: i64, quality: Quality) -> ReviewEvent {
        ReviewEvent {
            id: 0,
            word_id: 1,
            quality,
            reviewed_at: now() - Duration::days(days_ago),
            interval_days: 1,
        }
    }

    fn days(offsets: &[i64]) -> BTreeSet<NaiveDate> {
        offsets
            .iter()
            .map(|d| now().date_naive() - Duration::days(*d))
            .collect()
    }

    #[test]
    fn streak_counts_back_from_today() {
        assert_eq!(streak_days(&days(&[0, 1, 2, 5]), now().date_naive()), 3);
    }

    #[test]
    fn streak_may_end_yesterday() {
        assert_eq!(streak_days(&days(&[1, 2]), now().date_naive()), 2);
    }

    #[test]
    fn streak_breaks_on_missing_day() {
        assert_eq!(streak_days(&days(&[2, 3, 4]), now().date_naive()), 0);
        assert_eq!(streak_days(&BTreeSet::new(), now().date_naive()), 0);
    }

    #[test]
    fn empty_log_gives_zeroed_stats() {
        let stats = aggregate(WordCounts::default(), &[], now());
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_quality, 0.0);
        assert_eq!(stats.retention_rate, 0.0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.last_review_date, None);
    }

    #[test]
    fn aggregate_reads_the_whole_log() {
        let events = vec![
            event(0, Quality::Good),
            event(0, Quality::Again),
            event(1, Quality::Easy),
            event(3, Quality::Hard),
        ];
        let counts = WordCounts {
            total_words: 3,
            due_count: 2,
            overdue_count: 1,
        };
        let stats = aggregate(counts, &events, now());

        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.total_reviews, 4);
        assert_eq!(stats.completed_reviews, 2);
        assert!((stats.average_quality - 1.5).abs() < 1e-12);
        assert_eq!(stats.retention_rate, 50.0);
        assert_eq!(stats.streak_days, 2);
        assert_eq!(stats.last_review_date, Some(now().date_naive()));
    }

    #[test]
    fn mean_matches_exact_value_over_long_history() {
        let events: Vec<ReviewEvent> = (0..200_000)
            .map(|i| event(0, if i % 3 == 0 { Quality::Easy } else { Quality::Hard }))
            .collect();

        // Naive incremental update, for comparison only
        let mut running = 0.0_f64;
        for (n, e) in events.iter().enumerate() {
            running = (running * n as f64 + e.quality.value() as f64) / (n as f64 + 1.0);
        }

        let exact = (66_667.0 * 3.0 + 133_333.0 * 1.0) / 200_000.0;
        assert_eq!(average_quality(&events), exact);
        assert!((running - exact).abs() < 1e-6);
    }

    #[test]
    fn retention_rounds_to_one_decimal() {
        let events = vec![
            event(0, Quality::Good),
            event(0, Quality::Hard),
            event(0, Quality::Hard),
        ];
        assert_eq!(retention_rate(&events), 33.3);
    }
}
