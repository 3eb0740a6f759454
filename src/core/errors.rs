use thiserror::Error;

use crate::core::models::{
    Difficulty,
    StudyMode,
};

#[derive(Error, Debug)]
pub enum KanfudaError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("HTTP error {status} from {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Request error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No kanji received for {mode} {difficulty}")]
    EmptyResult { mode: StudyMode, difficulty: Difficulty },

    #[error("Unsupported study mode: {0}")]
    UnsupportedMode(String),

    #[error("'{token}' is not a {mode} difficulty")]
    InvalidDifficulty { mode: StudyMode, token: String },

    #[error("Invalid {name}: '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("A review session needs at least one card")]
    EmptySession,

    #[error("Grading is only available on an unrevealed card")]
    GradeUnavailable,

    #[error("Advancing is only available on a revealed card")]
    AdvanceUnavailable,
}

impl From<std::io::Error> for KanfudaError {
    fn from(error: std::io::Error) -> Self {
        KanfudaError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for KanfudaError {
    fn from(error: reqwest::Error) -> Self {
        KanfudaError::Reqwest(Box::new(error))
    }
}
