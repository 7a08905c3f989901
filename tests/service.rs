//! Store-backed tests driving `SrsService` against a temporary SQLite file.

mod common;

use std::thread;

use chrono::Duration;

use common::{add, clock};
use vocab_srs::data::models::{AddWordRequest, DailyCount, Quality, SrsError};

#[test]
fn added_words_are_due_immediately_and_listed_in_insertion_order() {
    let (service, _dir) = common::service();
    let first = add(&service, "ciao", "hello", clock());
    let second = add(&service, "gatto", "cat", clock());

    assert_eq!(first.repetitions, 0);
    assert_eq!(first.interval_days, 0);
    assert_eq!(first.ease_factor, 2.5);
    assert_eq!(first.due_at, clock());
    assert!(first.last_reviewed_at.is_none());

    let ids: Vec<i32> = service.list_words().unwrap().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(service.due_words(clock()).unwrap().len(), 2);
}

#[test]
fn missing_word_or_translation_is_rejected_without_writing() {
    let (service, _dir) = common::service();
    let err = service
        .add_word(
            AddWordRequest {
                word: "   ".into(),
                translation: "hello".into(),
                ..Default::default()
            },
            clock(),
        )
        .unwrap_err();
    assert!(matches!(err, SrsError::Validation(ref msg) if msg.contains("Word is required")));

    let err = service
        .add_word(
            AddWordRequest {
                word: "ciao".into(),
                ..Default::default()
            },
            clock(),
        )
        .unwrap_err();
    assert!(matches!(err, SrsError::Validation(ref msg) if msg.contains("Translation is required")));

    assert!(service.list_words().unwrap().is_empty());
}

#[test]
fn review_moves_word_out_of_due_set_and_logs_an_event() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());

    let updated = service.submit_review(word.id, 2, clock()).unwrap();
    assert_eq!(updated.repetitions, 1);
    assert_eq!(updated.interval_days, 1);
    assert_eq!(updated.due_at, clock() + Duration::days(1));
    assert_eq!(updated.last_reviewed_at, Some(clock()));
    assert_eq!(updated.word, "ciao");

    assert_eq!(service.get_word(word.id).unwrap(), updated);
    assert!(service.due_words(clock()).unwrap().is_empty());

    let history = service.word_history(word.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].quality, Quality::Good);
    assert_eq!(history[0].interval_days, 1);

    let later = clock() + Duration::days(1);
    let second = service.submit_review(word.id, 2, later).unwrap();
    assert_eq!(second.interval_days, 6);
    assert_eq!(second.repetitions, 2);
}

#[test]
fn invalid_quality_and_unknown_word_leave_store_untouched() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());

    let err = service.submit_review(word.id, 4, clock()).unwrap_err();
    assert!(matches!(err, SrsError::InvalidQuality { quality: 4, .. }));
    let err = service.submit_review(word.id, -1, clock()).unwrap_err();
    assert!(matches!(err, SrsError::InvalidQuality { quality: -1, .. }));

    let err = service.submit_review(word.id + 100, 2, clock()).unwrap_err();
    assert!(matches!(err, SrsError::UnknownWord(_)));

    assert_eq!(service.total_reviews().unwrap(), 0);
    assert_eq!(service.get_word(word.id).unwrap(), word);
}

#[test]
fn overdue_is_a_subset_of_due_beyond_the_grace() {
    let (service, _dir) = common::service();
    let old = add(&service, "ciao", "hello", clock() - Duration::days(10));
    let fresh = add(&service, "gatto", "cat", clock());
    add(&service, "cane", "dog", clock() + Duration::days(3));

    let due: Vec<i32> = service.due_words(clock()).unwrap().iter().map(|w| w.id).collect();
    assert_eq!(due, vec![old.id, fresh.id]);

    let overdue = service.overdue_words(clock(), None).unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, old.id);

    // due_at == now is due but never overdue
    let overdue = service.overdue_words(clock(), Some(0)).unwrap();
    assert!(overdue.iter().all(|w| w.id != fresh.id));

    assert!(service.overdue_words(clock(), Some(11)).unwrap().is_empty());
    assert!(matches!(
        service.overdue_words(clock(), Some(-1)),
        Err(SrsError::Validation(_))
    ));
}

#[test]
fn daily_forecast_reports_every_day_including_zeros() {
    let (service, _dir) = common::service();
    add(&service, "ciao", "hello", clock() - Duration::days(10));
    add(&service, "gatto", "cat", clock());
    add(&service, "cane", "dog", clock() + Duration::days(3));
    add(&service, "casa", "house", clock() + Duration::days(30));

    let counts = service.daily_upcoming(clock(), 7).unwrap();
    let values: Vec<i64> = counts.iter().map(|c| c.count).collect();
    assert_eq!(values, vec![2, 0, 0, 1, 0, 0, 0]);
    assert_eq!(
        counts[0],
        DailyCount {
            date: clock().date_naive(),
            count: 2
        }
    );

    assert!(matches!(service.daily_upcoming(clock(), 0), Err(SrsError::Validation(_))));
    assert!(matches!(service.daily_upcoming(clock(), 366), Err(SrsError::Validation(_))));
}

#[test]
fn upcoming_lists_words_not_yet_due_within_window() {
    let (service, _dir) = common::service();
    add(&service, "gatto", "cat", clock());
    let soon = add(&service, "cane", "dog", clock() + Duration::days(3));
    add(&service, "casa", "house", clock() + Duration::days(30));

    let upcoming = service.upcoming_words(clock(), 7).unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, soon.id);
}

#[test]
fn stats_reflect_the_review_log() {
    let (service, _dir) = common::service();
    let ciao = add(&service, "ciao", "hello", clock() - Duration::days(10));
    let gatto = add(&service, "gatto", "cat", clock());
    add(&service, "cane", "dog", clock() - Duration::days(3));

    service.review(ciao.id, Quality::Good, clock() - Duration::days(1)).unwrap();
    service.review(gatto.id, Quality::Again, clock()).unwrap();

    let stats = service.stats(clock()).unwrap();
    assert_eq!(stats.total_words, 3);
    // ciao is due again today, cane has been due for three days
    assert_eq!(stats.due_count, 2);
    assert_eq!(stats.overdue_count, 1);
    assert_eq!(stats.total_reviews, 2);
    assert_eq!(stats.completed_reviews, 1);
    assert_eq!(stats.average_quality, 1.0);
    assert_eq!(stats.retention_rate, 50.0);
    assert_eq!(stats.streak_days, 2);
    assert_eq!(stats.last_review_date, Some(clock().date_naive()));
}

#[test]
fn deleted_words_keep_their_review_events() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());
    service.review(word.id, Quality::Easy, clock()).unwrap();

    service.delete_word(word.id).unwrap();
    assert!(matches!(service.get_word(word.id), Err(SrsError::UnknownWord(_))));
    assert!(matches!(service.delete_word(word.id), Err(SrsError::UnknownWord(_))));

    assert_eq!(service.word_history(word.id).unwrap().len(), 1);
    let stats = service.stats(clock()).unwrap();
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.total_reviews, 1);
    assert_eq!(stats.average_quality, 3.0);

    assert!(matches!(service.word_history(word.id + 1), Err(SrsError::UnknownWord(_))));
}

#[test]
fn review_of_a_word_in_flight_is_rejected() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());

    let guard = service.locks().try_acquire(word.id).unwrap();
    let err = service.review(word.id, Quality::Good, clock()).unwrap_err();
    assert!(matches!(err, SrsError::ConcurrentReview { quality: 2, .. }));
    assert!(err.is_retryable());
    assert_eq!(service.total_reviews().unwrap(), 0);
    drop(guard);

    service.review(word.id, Quality::Good, clock()).unwrap();
    assert_eq!(service.total_reviews().unwrap(), 1);
}

#[test]
fn concurrent_reviews_of_distinct_words_all_commit() {
    let (service, _dir) = common::service();
    let ids: Vec<i32> = (0..8)
        .map(|i| add(&service, &format!("parola{}", i), "word", clock()).id)
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let service = service.clone();
            thread::spawn(move || service.review(id, Quality::Good, clock()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(service.total_reviews().unwrap(), ids.len() as i64);
    assert!(service.due_words(clock()).unwrap().is_empty());
}

#[test]
fn reads_during_reviews_see_whole_records() {
    let (service, _dir) = common::service();
    let original = add(&service, "ciao", "hello", clock());
    let id = original.id;

    let reader = {
        let service = service.clone();
        thread::spawn(move || {
            let mut seen = Vec::new();
            let mut due_seen = Vec::new();
            for _ in 0..200 {
                seen.push(service.get_word(id).unwrap());
                due_seen.extend(service.due_words(clock()).unwrap());
                let stats = service.stats(clock()).unwrap();
                assert!(stats.due_count == 0 || stats.due_count == 1);
            }
            (seen, due_seen)
        })
    };

    let mut states = vec![original.clone()];
    for day in 0..10 {
        let at = clock() + Duration::days(day);
        states.push(service.review(id, Quality::Good, at).unwrap());
    }
    let (seen, due_seen) = reader.join().unwrap();

    for record in &seen {
        assert!(states.contains(record), "partial record observed: {:?}", record);
    }
    // Only the never-reviewed state is due at the start clock
    for record in &due_seen {
        assert_eq!(record, &original);
    }
    assert_eq!(service.get_word(id).unwrap(), states[states.len() - 1]);
    assert_eq!(service.total_reviews().unwrap(), 10);
}

#[test]
fn total_reviews_matches_number_of_successful_reviews() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());
    let mut at = clock();
    for quality in [2, 2, 0, 1, 3, 9, 2] {
        let _ = service.submit_review(word.id, quality, at);
        at += Duration::days(1);
    }
    assert_eq!(service.total_reviews().unwrap(), 6);
}

#[test]
fn search_matches_any_text_field_case_insensitively() {
    let (service, _dir) = common::service();
    add(&service, "ciao", "hello", clock());
    let gatto = add(&service, "gatto", "cat", clock());
    let cane = add(&service, "cane", "dog", clock());

    let found: Vec<i32> = service.search("CA").unwrap().iter().map(|w| w.id).collect();
    assert_eq!(found, vec![gatto.id, cane.id]);
    assert_eq!(service.search("").unwrap().len(), 3);
    assert!(service.search("zebra").unwrap().is_empty());
}

#[test]
fn preview_does_not_commit() {
    let (service, _dir) = common::service();
    let word = add(&service, "ciao", "hello", clock());

    let preview = service.review_preview(word.id, clock()).unwrap();
    let intervals: Vec<i32> = preview.iter().map(|p| p.interval_days).collect();
    assert_eq!(intervals, vec![1, 1, 1, 1]);
    assert_eq!(service.get_word(word.id).unwrap(), word);
    assert_eq!(service.total_reviews().unwrap(), 0);

    let info = service.next_review_info(word.id, clock()).unwrap();
    assert!(info.is_due);
    assert_eq!(info.days_until_due, 0);
}
