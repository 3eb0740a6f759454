pub mod api;
pub mod core;
pub mod session;
pub mod transport;

pub use crate::{
    api::KanjiApiClient,
    core::{
        Difficulty,
        KanfudaError,
        KanjiRecord,
        SessionConfig,
        StudyMode,
    },
    session::{
        ReviewSession,
        SessionLoader,
        SessionResult,
    },
};
