//! Review session controller.
//!
//! A session walks a snapshot of the due set one word at a time:
//! `Idle -> Presenting -> Revealed -> (rated) -> Idle/Presenting ... -> Empty`.
//! Every rating is committed on its own as it is submitted, so abandoning a
//! session never undoes work already saved.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::models::{Quality, SrsError, SrsResult, WordRecord};
use crate::features::srs::service::SrsService;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    /// Word shown, answer hidden.
    Presenting { word: WordRecord },
    /// Answer shown, waiting for a rating.
    Revealed { word: WordRecord },
    /// Nothing left to review until the due set is reloaded.
    Empty,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Presenting { .. } => "presenting",
            SessionState::Revealed { .. } => "revealed",
            SessionState::Empty => "empty",
        }
    }
}

/// Commands accepted by [`ReviewSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Reload the due set and present the first word.
    Start,
    /// Present the next queued word.
    Next,
    Reveal,
    Rate { quality: i32 },
    /// Drop the local queue. Committed ratings stay committed.
    Abandon,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSession {
    state: SessionState,
    queue: VecDeque<WordRecord>,
    overdue_ids: HashSet<i32>,
    due_count: usize,
    overdue_count: usize,
    completed: usize,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn due_count(&self) -> usize {
        self.due_count
    }

    pub fn overdue_count(&self) -> usize {
        self.overdue_count
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Replaces the local queue with `due` (earliest first) and presents the
    /// first word. Words due before `overdue_cutoff` count as overdue.
    pub fn load(&mut self, due: Vec<WordRecord>, overdue_cutoff: DateTime<Utc>) {
        self.overdue_ids = due
            .iter()
            .filter(|w| w.due_at < overdue_cutoff)
            .map(|w| w.id)
            .collect();
        self.overdue_count = self.overdue_ids.len();
        self.due_count = due.len();
        self.queue = due.into();
        self.state = SessionState::Idle;
        self.advance();
    }

    /// Moves from `Idle` or `Empty` to the next queued word.
    pub fn next(&mut self) -> SrsResult<()> {
        match self.state {
            SessionState::Idle | SessionState::Empty => {
                self.advance();
                Ok(())
            }
            _ => Err(self.invalid("present the next word")),
        }
    }

    pub fn reveal(&mut self) -> SrsResult<()> {
        match std::mem::take(&mut self.state) {
            SessionState::Presenting { word } => {
                self.state = SessionState::Revealed { word };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("reveal"))
            }
        }
    }

    /// Rates the revealed word through `commit` and moves on.
    ///
    /// If `commit` fails the session stays on the revealed word so the same
    /// rating can be retried, except when the word no longer exists: then it
    /// is dropped and the next word is presented.
    pub fn rate<F>(&mut self, quality: i32, commit: F) -> SrsResult<WordRecord>
    where
        F: FnOnce(i32, Quality) -> SrsResult<WordRecord>,
    {
        let word_id = match &self.state {
            SessionState::Revealed { word } => word.id,
            _ => return Err(self.invalid("rate")),
        };
        let quality = Quality::try_from(quality)
            .map_err(|quality| SrsError::InvalidQuality { word_id, quality })?;

        let updated = match commit(word_id, quality) {
            Ok(updated) => updated,
            Err(SrsError::UnknownWord(id)) => {
                self.forget(word_id);
                self.advance();
                return Err(SrsError::UnknownWord(id));
            }
            Err(e) => return Err(e),
        };

        self.completed += 1;
        self.forget(word_id);
        self.advance();

        Ok(updated)
    }

    /// Re-reads the presented word through `lookup`. Words deleted or
    /// already reviewed elsewhere since the session loaded are skipped; the
    /// word that stays is replaced by its stored state.
    pub fn refresh<F>(&mut self, now: DateTime<Utc>, mut lookup: F) -> SrsResult<()>
    where
        F: FnMut(i32) -> SrsResult<WordRecord>,
    {
        loop {
            let word_id = match &self.state {
                SessionState::Presenting { word } => word.id,
                _ => return Ok(()),
            };
            match lookup(word_id) {
                Ok(current) if current.is_due(now) => {
                    self.state = SessionState::Presenting { word: current };
                    return Ok(());
                }
                Ok(_) | Err(SrsError::UnknownWord(_)) => {
                    log::debug!("Skipping word {}: no longer due", word_id);
                    self.forget(word_id);
                    self.advance();
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn abandon(&mut self) {
        *self = ReviewSession::new();
    }

    /// Runs one command against `service`. Returns the committed record for
    /// `Rate`.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        service: &SrsService,
        now: DateTime<Utc>,
    ) -> SrsResult<Option<WordRecord>> {
        let result = match command {
            SessionCommand::Start => service.due_words(now).and_then(|due| {
                let cutoff = service.overdue_cutoff(now)?;
                self.load(due, cutoff);
                Ok(None)
            }),
            SessionCommand::Next => self.next().map(|_| None),
            SessionCommand::Reveal => self.reveal().map(|_| None),
            SessionCommand::Rate { quality } => self
                .rate(quality, |word_id, quality| service.review(word_id, quality, now))
                .map(Some),
            SessionCommand::Abandon => {
                self.abandon();
                Ok(None)
            }
        };

        // A stale word is only a display problem; keep the command's outcome
        if let Err(e) = self.refresh(now, |word_id| service.get_word(word_id)) {
            log::warn!("Could not refresh presented word: {}", e);
        }
        result
    }

    fn advance(&mut self) {
        self.state = match self.queue.pop_front() {
            Some(word) => SessionState::Presenting { word },
            None => SessionState::Empty,
        };
    }

    /// Removes `word_id` from the queue and the remaining counters.
    fn forget(&mut self, word_id: i32) {
        self.due_count = self.due_count.saturating_sub(1);
        if self.overdue_ids.remove(&word_id) {
            self.overdue_count = self.overdue_count.saturating_sub(1);
        }
        self.queue.retain(|w| w.id != word_id);
    }

    fn invalid(&self, action: &'static str) -> SrsError {
        SrsError::InvalidSessionAction {
            action,
            state: self.state.name(),
        }
    }
}

/// What the client may see of a session. The answer is withheld until the
/// word is revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub state: String,
    pub word_id: Option<i32>,
    pub word: Option<String>,
    pub word_type: Option<String>,
    pub answer: Option<WordRecord>,
    pub remaining: usize,
    pub due_count: usize,
    pub overdue_count: usize,
    pub completed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review: Option<WordRecord>,
}

impl SessionView {
    pub fn of(session: &ReviewSession, last_review: Option<WordRecord>) -> Self {
        let (shown, answer) = match session.state() {
            SessionState::Presenting { word } => (Some(word), None),
            SessionState::Revealed { word } => (Some(word), Some(word.clone())),
            SessionState::Idle | SessionState::Empty => (None, None),
        };
        SessionView {
            state: session.state().name().to_string(),
            word_id: shown.map(|w| w.id),
            word: shown.map(|w| w.word.clone()),
            word_type: shown.map(|w| w.word_type.clone()),
            answer,
            remaining: session.remaining(),
            due_count: session.due_count(),
            overdue_count: session.overdue_count(),
            completed: session.completed(),
            last_review,
        }
    }
}
