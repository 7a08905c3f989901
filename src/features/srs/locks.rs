use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Tracks words with a review in flight. At most one rating per word may be
/// in progress; distinct words never contend.
#[derive(Debug, Clone, Default)]
pub struct ReviewLocks {
    in_flight: Arc<Mutex<HashSet<i32>>>,
}

impl ReviewLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `word_id`, or returns `None` when another review holds it.
    pub fn try_acquire(&self, word_id: i32) -> Option<ReviewGuard> {
        if lock(&self.in_flight).insert(word_id) {
            Some(ReviewGuard {
                in_flight: Arc::clone(&self.in_flight),
                word_id,
            })
        } else {
            None
        }
    }

    pub fn is_held(&self, word_id: i32) -> bool {
        lock(&self.in_flight).contains(&word_id)
    }
}

/// Releases the claim on drop, including on early return with an error.
#[derive(Debug)]
pub struct ReviewGuard {
    in_flight: Arc<Mutex<HashSet<i32>>>,
    word_id: i32,
}

impl Drop for ReviewGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.word_id);
    }
}

// The set stays consistent even if a holder panicked.
fn lock(set: &Mutex<HashSet<i32>>) -> MutexGuard<'_, HashSet<i32>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
