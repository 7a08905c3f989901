//! SM-2 style scheduler over four quality ratings.
//!
//! Ratings are 0 (Again), 1 (Hard), 2 (Good) and 3 (Easy). A word starts in
//! the learning phase, where the first two successful reviews use fixed
//! intervals of 1 and 6 days. After that intervals grow by a multiplier that
//! depends on the rating and, for Good and Easy, on the word's ease factor.
//!
//! Everything here is pure: the caller supplies `now`, so the same record,
//! quality and clock always produce the same result.

use chrono::{DateTime, Duration, Utc};

use crate::data::models::{Quality, ReviewPreview, WordRecord};

/// Ease factor never drops below this floor
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Interval after an "Again" rating
pub const AGAIN_INTERVAL_DAYS: i32 = 1;

/// Fixed intervals for the first successful reviews, indexed by repetitions.
pub const LEARNING_STEPS: [i32; 2] = [1, 6];

pub const MAX_INTERVAL_DAYS: i32 = 36_500;

const AGAIN_EASE_PENALTY: f64 = 0.20;
const HARD_EASE_PENALTY: f64 = 0.15;
const EASY_EASE_BONUS: f64 = 0.15;

const HARD_MULTIPLIER: f64 = 1.2;
const EASY_MULTIPLIER: f64 = 1.3;

/// Computes the state of `record` after it is rated `quality` at `now`.
///
/// Lexical content and identity are copied unchanged.
pub fn next_state(record: &WordRecord, quality: Quality, now: DateTime<Utc>) -> WordRecord {
    let ease_factor = next_ease_factor(record.ease_factor, quality);

    let (interval_days, repetitions) = match quality {
        Quality::Again => (AGAIN_INTERVAL_DAYS, 0),
        _ => (
            next_interval(record, quality, ease_factor),
            record.repetitions.saturating_add(1),
        ),
    };

    WordRecord {
        ease_factor,
        interval_days,
        repetitions,
        due_at: now + Duration::days(interval_days as i64),
        last_reviewed_at: Some(now),
        ..record.clone()
    }
}

/// One preview per rating, in rating order.
pub fn preview(record: &WordRecord, now: DateTime<Utc>) -> Vec<ReviewPreview> {
    Quality::ALL
        .iter()
        .map(|&quality| {
            let next = next_state(record, quality, now);
            ReviewPreview {
                quality,
                label: quality.label().to_string(),
                interval_days: next.interval_days,
                due_at: next.due_at,
                display: format_interval(next.interval_days),
            }
        })
        .collect()
}

fn next_ease_factor(current: f64, quality: Quality) -> f64 {
    let adjusted = match quality {
        Quality::Again => current - AGAIN_EASE_PENALTY,
        Quality::Hard => current - HARD_EASE_PENALTY,
        Quality::Good => current,
        Quality::Easy => current + EASY_EASE_BONUS,
    };
    // Two decimals keep stored values stable across long histories
    let rounded = (adjusted * 100.0).round() / 100.0;
    rounded.max(MIN_EASE_FACTOR)
}

fn next_interval(record: &WordRecord, quality: Quality, ease_factor: f64) -> i32 {
    if let Some(&step) = usize::try_from(record.repetitions)
        .ok()
        .and_then(|reps| LEARNING_STEPS.get(reps))
    {
        return step;
    }

    let base = record.interval_days.max(1);
    let multiplier = match quality {
        Quality::Hard => HARD_MULTIPLIER,
        Quality::Good => ease_factor,
        Quality::Easy => ease_factor * EASY_MULTIPLIER,
        Quality::Again => return AGAIN_INTERVAL_DAYS,
    };

    let grown = (base as f64 * multiplier).round() as i64;
    grown
        .max(base as i64 + 1)
        .min(MAX_INTERVAL_DAYS as i64) as i32
}

/// Format an interval in days to a compact string
pub fn format_interval(days: i32) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
