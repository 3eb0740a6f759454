use serde::{
    Deserialize,
    Serialize,
};

use super::state::ReviewEntry;
use crate::core::{
    Difficulty,
    KanjiRecord,
    SessionConfig,
    StudyMode,
};

/// One reviewed card as the results stage consumes it: the record plus how
/// the user graded it, in review order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedKanji {
    #[serde(flatten)]
    pub kanji: KanjiRecord,
    pub is_correct: bool,
}

/// Terminal snapshot of a finished session. No owner mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub mode: StudyMode,
    pub difficulty: Difficulty,
    pub correct_count: usize,
    pub total_count: usize,
    pub reviewed: Vec<ReviewedKanji>,
}

impl SessionResult {
    /// Display percentage. An empty session reads as 0% rather than
    /// dividing by zero, even though the sampler never produces one.
    pub fn percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        ((self.correct_count as f64 / self.total_count as f64) * 100.0).round() as u32
    }

    /// Config for an identical rerun; count pinned to what was reviewed.
    pub fn review_again(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            difficulty: self.difficulty,
            requested_count: self.total_count.max(1),
        }
    }
}

/// Reduce the finished entry sequence into its summary, preserving review
/// order.
pub fn summarize(config: SessionConfig, entries: &[ReviewEntry]) -> SessionResult {
    let reviewed: Vec<ReviewedKanji> = entries
        .iter()
        .map(|entry| ReviewedKanji { kanji: entry.kanji.clone(), is_correct: entry.is_correct })
        .collect();
    let correct_count = reviewed.iter().filter(|card| card.is_correct).count();

    SessionResult {
        mode: config.mode,
        difficulty: config.difficulty,
        correct_count,
        total_count: reviewed.len(),
        reviewed,
    }
}
