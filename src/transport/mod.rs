use tracing::warn;

use crate::{
    core::{
        models::clamp_card_count,
        Difficulty,
        KanfudaError,
        SessionConfig,
        StudyMode,
    },
    session::{
        ReviewedKanji,
        SessionResult,
    },
};

/// What the selection stage hands to the review stage. Everything is a
/// string, the way URL-style navigation params arrive; `to_config` is the
/// typed boundary so nothing past it sees raw tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewParams {
    pub mode: String,
    pub difficulty: String,
    pub count: String,
}

impl ReviewParams {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            mode: config.mode.as_str().to_string(),
            difficulty: config.difficulty.token(),
            count: config.requested_count.to_string(),
        }
    }

    pub fn to_config(&self) -> Result<SessionConfig, KanfudaError> {
        let mode = StudyMode::parse(&self.mode)?;
        let difficulty = Difficulty::parse(mode, &self.difficulty)?;
        let count: usize = self.count.trim().parse().map_err(|_| {
            KanfudaError::InvalidParameter { name: "count", value: self.count.clone() }
        })?;

        SessionConfig::new(mode, difficulty, clamp_card_count(count))
    }
}

/// What the review stage hands to the results stage: summary counts plus the
/// reviewed cards as a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsParams {
    pub mode: String,
    pub difficulty: String,
    pub correct: String,
    pub total: String,
    pub reviewed_kanji: String,
}

impl ResultsParams {
    pub fn from_result(result: &SessionResult) -> Result<Self, KanfudaError> {
        Ok(Self {
            mode: result.mode.as_str().to_string(),
            difficulty: result.difficulty.token(),
            correct: result.correct_count.to_string(),
            total: result.total_count.to_string(),
            reviewed_kanji: serde_json::to_string(&result.reviewed)?,
        })
    }

    /// The reviewed cards. A malformed payload degrades to an empty list so
    /// the results view renders instead of crashing.
    pub fn reviewed(&self) -> Vec<ReviewedKanji> {
        match serde_json::from_str(&self.reviewed_kanji) {
            Ok(reviewed) => reviewed,
            Err(error) => {
                warn!(%error, "failed to parse reviewed kanji payload");
                Vec::new()
            }
        }
    }

    pub fn counts(&self) -> (usize, usize) {
        let correct = self.correct.trim().parse().unwrap_or(0);
        let total = self.total.trim().parse().unwrap_or(0);
        (correct, total)
    }

    /// Score the way the results screen displays it, guarded against a zero
    /// total.
    pub fn score_percent(&self) -> u32 {
        let (correct, total) = self.counts();
        if total == 0 {
            return 0;
        }
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}
