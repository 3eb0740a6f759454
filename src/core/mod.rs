pub mod errors;
pub mod models;

pub use errors::KanfudaError;
pub use models::{ Difficulty, KanjiRecord, SessionConfig, StudyMode };
