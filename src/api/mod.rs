pub mod client;
pub mod types;

pub use client::{ KanjiApiClient, DEFAULT_BASE_URL };
