use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::errors::KanfudaError;

/// Smallest count a front-end should offer.
pub const MIN_CARD_COUNT: usize = 5;
/// Largest count a front-end should offer.
pub const MAX_CARD_COUNT: usize = 50;
pub const CARD_COUNT_STEP: usize = 5;
pub const DEFAULT_CARD_COUNT: usize = 10;

/// Snap a requested count onto the 5..=50 step-5 scale the selection UI uses.
pub fn clamp_card_count(count: usize) -> usize {
    let snapped = ((count + CARD_COUNT_STEP / 2) / CARD_COUNT_STEP) * CARD_COUNT_STEP;
    snapped.clamp(MIN_CARD_COUNT, MAX_CARD_COUNT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyMode {
    Jouyou,
    Jlpt,
    Frequency,
}

impl StudyMode {
    pub const ALL: [StudyMode; 3] = [StudyMode::Jouyou, StudyMode::Jlpt, StudyMode::Frequency];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyMode::Jouyou => "jouyou",
            StudyMode::Jlpt => "jlpt",
            StudyMode::Frequency => "frequency",
        }
    }

    /// Modes form a closed set; anything else is a programming/config error
    /// rather than a user mistake.
    pub fn parse(token: &str) -> Result<Self, KanfudaError> {
        match token.trim().to_lowercase().as_str() {
            "jouyou" => Ok(StudyMode::Jouyou),
            "jlpt" => Ok(StudyMode::Jlpt),
            "frequency" => Ok(StudyMode::Frequency),
            _ => Err(KanfudaError::UnsupportedMode(token.to_string())),
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed counterpart of the mode-dependent difficulty token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Grade(u8),
    Secondary,
    Jlpt(u8),
    Top(u16),
}

impl Difficulty {
    /// Parse a token in the context of its mode. Tokens from another mode are
    /// rejected here so the session core never sees an incoherent pair.
    pub fn parse(mode: StudyMode, token: &str) -> Result<Self, KanfudaError> {
        let invalid = || KanfudaError::InvalidDifficulty { mode, token: token.to_string() };
        let normalized = token.trim().to_lowercase();

        let difficulty = match mode {
            StudyMode::Jouyou => {
                if normalized == "secondary" {
                    Difficulty::Secondary
                } else {
                    let grade = normalized
                        .strip_prefix("grade-")
                        .and_then(|g| g.parse::<u8>().ok())
                        .ok_or_else(invalid)?;
                    if !(1..=6).contains(&grade) {
                        return Err(invalid());
                    }
                    Difficulty::Grade(grade)
                }
            }
            StudyMode::Jlpt => {
                let level = normalized
                    .strip_prefix('n')
                    .and_then(|l| l.parse::<u8>().ok())
                    .ok_or_else(invalid)?;
                if !(1..=5).contains(&level) {
                    return Err(invalid());
                }
                Difficulty::Jlpt(level)
            }
            StudyMode::Frequency => match normalized.as_str() {
                "top-100" => Difficulty::Top(100),
                "top-500" => Difficulty::Top(500),
                _ => return Err(invalid()),
            },
        };

        Ok(difficulty)
    }

    /// The wire/URL form: `grade-3`, `secondary`, `n5`, `top-100`.
    pub fn token(&self) -> String {
        match self {
            Difficulty::Grade(grade) => format!("grade-{grade}"),
            Difficulty::Secondary => "secondary".to_string(),
            Difficulty::Jlpt(level) => format!("n{level}"),
            Difficulty::Top(size) => format!("top-{size}"),
        }
    }

    /// Human label the way the selection screen shows it.
    pub fn label(&self) -> String {
        match self {
            Difficulty::Grade(grade) => format!("Grade {grade}"),
            Difficulty::Secondary => "Secondary School".to_string(),
            Difficulty::Jlpt(level) => format!("N{level}"),
            Difficulty::Top(size) => format!("Top {size}"),
        }
    }

    /// The difficulty catalog offered for a mode, in display order.
    pub fn options(mode: StudyMode) -> Vec<Difficulty> {
        match mode {
            StudyMode::Jouyou => {
                let mut options: Vec<Difficulty> = (1..=6).map(Difficulty::Grade).collect();
                options.push(Difficulty::Secondary);
                options
            }
            StudyMode::Jlpt => (1..=5).rev().map(Difficulty::Jlpt).collect(),
            StudyMode::Frequency => vec![Difficulty::Top(100), Difficulty::Top(500)],
        }
    }

    pub fn belongs_to(&self, mode: StudyMode) -> bool {
        matches!(
            (mode, self),
            (StudyMode::Jouyou, Difficulty::Grade(_))
                | (StudyMode::Jouyou, Difficulty::Secondary)
                | (StudyMode::Jlpt, Difficulty::Jlpt(_))
                | (StudyMode::Frequency, Difficulty::Top(_))
        )
    }

    /// Band size for frequency difficulties, `None` otherwise.
    pub fn band_size(&self) -> Option<usize> {
        match self {
            Difficulty::Top(size) => Some(*size as usize),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// One character's study metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanjiRecord {
    pub character: String,
    #[serde(default)]
    pub on_readings: Vec<String>,
    #[serde(default)]
    pub kun_readings: Vec<String>,
    #[serde(default)]
    pub meanings: Vec<String>,
    pub stroke_count: u32,
    #[serde(default)]
    pub frequency_rank: Option<u32>,
}

impl KanjiRecord {
    pub fn on_readings_text(&self) -> String {
        join_or(&self.on_readings, "、 ", "None")
    }

    pub fn kun_readings_text(&self) -> String {
        join_or(&self.kun_readings, "、 ", "None")
    }

    pub fn meanings_text(&self) -> String {
        join_or(&self.meanings, ", ", "No meanings available")
    }
}

fn join_or(parts: &[String], separator: &str, fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(separator)
    }
}

/// Immutable once a review begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: StudyMode,
    pub difficulty: Difficulty,
    pub requested_count: usize,
}

impl SessionConfig {
    pub fn new(
        mode: StudyMode,
        difficulty: Difficulty,
        requested_count: usize,
    ) -> Result<Self, KanfudaError> {
        if !difficulty.belongs_to(mode) {
            return Err(KanfudaError::InvalidDifficulty { mode, token: difficulty.token() });
        }
        if requested_count == 0 {
            return Err(KanfudaError::InvalidParameter {
                name: "count",
                value: requested_count.to_string(),
            });
        }

        Ok(Self { mode, difficulty, requested_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(StudyMode::parse("jouyou").unwrap(), StudyMode::Jouyou);
        assert_eq!(StudyMode::parse(" JLPT ").unwrap(), StudyMode::Jlpt);
        assert_eq!(StudyMode::parse("frequency").unwrap(), StudyMode::Frequency);
        assert!(matches!(
            StudyMode::parse("kyouiku"),
            Err(KanfudaError::UnsupportedMode(token)) if token == "kyouiku"
        ));
    }

    #[test]
    fn test_difficulty_token_round_trip() {
        for mode in StudyMode::ALL {
            for difficulty in Difficulty::options(mode) {
                let reparsed = Difficulty::parse(mode, &difficulty.token()).unwrap();
                assert_eq!(reparsed, difficulty);
                assert!(reparsed.belongs_to(mode));
            }
        }
    }

    #[test]
    fn test_difficulty_rejects_cross_mode_tokens() {
        assert!(Difficulty::parse(StudyMode::Jouyou, "n3").is_err());
        assert!(Difficulty::parse(StudyMode::Jlpt, "grade-2").is_err());
        assert!(Difficulty::parse(StudyMode::Frequency, "secondary").is_err());
        assert!(Difficulty::parse(StudyMode::Jouyou, "grade-7").is_err());
        assert!(Difficulty::parse(StudyMode::Jlpt, "n6").is_err());
        assert!(Difficulty::parse(StudyMode::Frequency, "top-1000").is_err());
    }

    #[test]
    fn test_difficulty_catalogs() {
        let jouyou = Difficulty::options(StudyMode::Jouyou);
        assert_eq!(jouyou.len(), 7);
        assert_eq!(jouyou[0].label(), "Grade 1");
        assert_eq!(jouyou[6].label(), "Secondary School");

        // JLPT is offered easiest first.
        let jlpt = Difficulty::options(StudyMode::Jlpt);
        assert_eq!(jlpt[0], Difficulty::Jlpt(5));
        assert_eq!(jlpt[4], Difficulty::Jlpt(1));

        let frequency = Difficulty::options(StudyMode::Frequency);
        assert_eq!(frequency, vec![Difficulty::Top(100), Difficulty::Top(500)]);
    }

    #[test]
    fn test_clamp_card_count() {
        assert_eq!(clamp_card_count(0), MIN_CARD_COUNT);
        assert_eq!(clamp_card_count(10), 10);
        assert_eq!(clamp_card_count(12), 10);
        assert_eq!(clamp_card_count(13), 15);
        assert_eq!(clamp_card_count(200), MAX_CARD_COUNT);
    }

    #[test]
    fn test_reveal_text_fallbacks() {
        let record = KanjiRecord {
            character: "水".to_string(),
            on_readings: vec!["スイ".to_string()],
            kun_readings: vec!["みず".to_string(), "みず-".to_string()],
            meanings: Vec::new(),
            stroke_count: 4,
            frequency_rank: Some(223),
        };

        assert_eq!(record.on_readings_text(), "スイ");
        assert_eq!(record.kun_readings_text(), "みず、 みず-");
        assert_eq!(record.meanings_text(), "No meanings available");
    }

    #[test]
    fn test_session_config_validation() {
        let config =
            SessionConfig::new(StudyMode::Jouyou, Difficulty::Grade(3), DEFAULT_CARD_COUNT)
                .unwrap();
        assert_eq!(config.requested_count, 10);

        assert!(SessionConfig::new(StudyMode::Jouyou, Difficulty::Jlpt(3), 10).is_err());
        assert!(SessionConfig::new(StudyMode::Jlpt, Difficulty::Jlpt(3), 0).is_err());
    }
}
