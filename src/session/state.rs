use tracing::{
    debug,
    info,
};

use super::score::{
    self,
    SessionResult,
};
use crate::core::{
    KanfudaError,
    KanjiRecord,
    SessionConfig,
};

/// One card's progress. `revealed` never reverts; `is_correct` is meaningful
/// only once `revealed` is true.
#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub kanji: KanjiRecord,
    pub revealed: bool,
    pub is_correct: bool,
}

impl ReviewEntry {
    fn new(kanji: KanjiRecord) -> Self {
        Self { kanji, revealed: false, is_correct: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Current card face up, not yet graded.
    Ready,
    /// Current card graded, details showing.
    Revealed,
    Finished,
}

/// Outcome of an `advance` call.
#[derive(Debug)]
pub enum Advance {
    Next,
    Finished(SessionResult),
}

/// Walks the sampled card sequence: grade, advance, finish. Each card is
/// visited exactly once, in sampled order; there is no backward navigation
/// and no re-grading.
#[derive(Debug)]
pub struct ReviewSession {
    config: SessionConfig,
    entries: Vec<ReviewEntry>,
    cursor: usize,
    phase: SessionPhase,
}

impl ReviewSession {
    pub fn new(config: SessionConfig, cards: Vec<KanjiRecord>) -> Result<Self, KanfudaError> {
        if cards.is_empty() {
            return Err(KanfudaError::EmptySession);
        }

        let entries: Vec<ReviewEntry> = cards.into_iter().map(ReviewEntry::new).collect();
        info!(cards = entries.len(), mode = %config.mode, "review session started");

        Ok(Self { config, entries, cursor: 0, phase: SessionPhase::Ready })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Zero-based index of the active card.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The active card; `None` once the session is finished.
    pub fn current(&self) -> Option<&ReviewEntry> {
        if self.phase == SessionPhase::Finished {
            None
        } else {
            self.entries.get(self.cursor)
        }
    }

    /// Progress the way the review screen shows it: "3 / 10".
    pub fn progress_text(&self) -> String {
        format!("{} / {}", (self.cursor + 1).min(self.entries.len()), self.entries.len())
    }

    /// Record the user's self-grade on the active card and reveal it.
    /// One-shot: grading a revealed card is not part of the contract.
    pub fn grade(&mut self, is_correct: bool) -> Result<(), KanfudaError> {
        if self.phase != SessionPhase::Ready {
            return Err(KanfudaError::GradeUnavailable);
        }

        let entry = &mut self.entries[self.cursor];
        entry.is_correct = is_correct;
        entry.revealed = true;
        self.phase = SessionPhase::Revealed;

        debug!(index = self.cursor, is_correct, character = %entry.kanji.character, "card graded");
        Ok(())
    }

    /// Move past the revealed card. On the last card the session finishes and
    /// yields its terminal `SessionResult`.
    pub fn advance(&mut self) -> Result<Advance, KanfudaError> {
        if self.phase != SessionPhase::Revealed {
            return Err(KanfudaError::AdvanceUnavailable);
        }

        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.phase = SessionPhase::Ready;
            return Ok(Advance::Next);
        }

        self.phase = SessionPhase::Finished;
        let result = score::summarize(self.config, &self.entries);
        info!(
            correct = result.correct_count,
            total = result.total_count,
            percent = result.percent(),
            "review session finished"
        );
        Ok(Advance::Finished(result))
    }
}
