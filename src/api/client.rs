use std::time::Duration;

use reqwest::Client;
use tracing::{
    debug,
    info,
    warn,
};

use super::types::KanjiListResponse;
use crate::core::{
    Difficulty,
    KanfudaError,
    KanjiRecord,
    StudyMode,
};

pub const DEFAULT_BASE_URL: &str = "https://japanese-kanji-api.onrender.com";

// The upstream service is a free tier that can take a while to spin up, but a
// hung request must not pin a session in Loading forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over the kanji lookup service. One attempt per call, no
/// caching; retrying is the caller's (user's) decision.
pub struct KanjiApiClient {
    client: Client,
    base_url: String,
}

impl KanjiApiClient {
    pub fn new() -> Result<Self, KanfudaError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, KanfudaError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch the candidate pool for a mode/difficulty pair. Resolves to a
    /// non-empty list or fails; an empty upstream list is an error, never a
    /// silently empty session.
    pub async fn fetch_candidates(
        &self,
        mode: StudyMode,
        difficulty: Difficulty,
    ) -> Result<Vec<KanjiRecord>, KanfudaError> {
        let url = format!("{}{}", self.base_url, endpoint(mode, difficulty)?);
        debug!(%url, %mode, %difficulty, "fetching kanji list");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(KanfudaError::Http { status: response.status(), url });
        }

        let body: KanjiListResponse = response.json().await?;

        let mut candidates = Vec::with_capacity(body.kanjis.len());
        for raw in body.kanjis {
            if raw.kanji.is_empty() {
                warn!(unicode = %raw.unicode, "skipping API record without a character");
                continue;
            }
            candidates.push(KanjiRecord::from(raw));
        }

        if candidates.is_empty() {
            return Err(KanfudaError::EmptyResult { mode, difficulty });
        }

        info!(count = candidates.len(), %mode, %difficulty, "received kanji candidates");
        Ok(candidates)
    }
}

/// Path construction is pure so it can be tested without a server.
pub fn endpoint(mode: StudyMode, difficulty: Difficulty) -> Result<String, KanfudaError> {
    match (mode, difficulty) {
        (StudyMode::Jouyou, Difficulty::Grade(grade)) => Ok(format!("/api/list/jouyou/{grade}")),
        (StudyMode::Jouyou, Difficulty::Secondary) => Ok("/api/list/jouyou/secondary".to_string()),
        (StudyMode::Jlpt, Difficulty::Jlpt(level)) => {
            // The API has no N5 list, so N5 sessions reuse the N4 list.
            // Inherited product decision, revisit if upstream ever adds N5.
            let level = if level == 5 { 4 } else { level };
            Ok(format!("/api/list/jlpt/{level}"))
        }
        // Frequency bands are cut client-side from the full jouyou list.
        (StudyMode::Frequency, Difficulty::Top(_)) => Ok("/api/list/jouyou/".to_string()),
        (mode, difficulty) => {
            Err(KanfudaError::InvalidDifficulty { mode, token: difficulty.token() })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{
            Read,
            Write,
        },
        net::TcpListener,
        thread,
    };

    use super::*;

    /// Minimal one-shot HTTP server so fetches run against a real socket
    /// without a mocking dependency.
    fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buffer = [0u8; 4096];
                let _ = stream.read(&mut buffer);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_candidates_decodes_the_list() {
        let body = r#"{
            "kanjis": [{
                "kanji": "水",
                "stroke_count": "4",
                "freq": "223",
                "meanings": { "en": ["water"] },
                "readings": { "ja_on": ["スイ"], "ja_kun": ["みず"] }
            }]
        }"#;
        let base_url = serve_once("200 OK", body);

        let client = KanjiApiClient::with_base_url(&base_url).unwrap();
        let candidates =
            client.fetch_candidates(StudyMode::Jouyou, Difficulty::Grade(1)).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].character, "水");
        assert_eq!(candidates[0].frequency_rank, Some(223));
    }

    #[tokio::test]
    async fn test_fetch_candidates_maps_http_failure() {
        let base_url = serve_once("500 Internal Server Error", "{}");

        let client = KanjiApiClient::with_base_url(&base_url).unwrap();
        let error =
            client.fetch_candidates(StudyMode::Jlpt, Difficulty::Jlpt(3)).await.unwrap_err();

        assert!(matches!(error, KanfudaError::Http { status, .. } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_candidates_never_resolves_empty() {
        let base_url = serve_once("200 OK", r#"{ "kanjis": [] }"#);

        let client = KanjiApiClient::with_base_url(&base_url).unwrap();
        let error =
            client.fetch_candidates(StudyMode::Jouyou, Difficulty::Secondary).await.unwrap_err();

        assert!(matches!(
            error,
            KanfudaError::EmptyResult { mode: StudyMode::Jouyou, difficulty: Difficulty::Secondary }
        ));
    }

    #[tokio::test]
    async fn test_fetch_treats_missing_kanjis_field_as_empty() {
        let base_url = serve_once("200 OK", "{}");

        let client = KanjiApiClient::with_base_url(&base_url).unwrap();
        let error =
            client.fetch_candidates(StudyMode::Frequency, Difficulty::Top(100)).await.unwrap_err();

        assert!(matches!(error, KanfudaError::EmptyResult { .. }));
    }

    #[test]
    fn test_jouyou_endpoints() {
        assert_eq!(
            endpoint(StudyMode::Jouyou, Difficulty::Grade(3)).unwrap(),
            "/api/list/jouyou/3"
        );
        assert_eq!(
            endpoint(StudyMode::Jouyou, Difficulty::Secondary).unwrap(),
            "/api/list/jouyou/secondary"
        );
    }

    #[test]
    fn test_jlpt_endpoints_remap_n5() {
        assert_eq!(endpoint(StudyMode::Jlpt, Difficulty::Jlpt(5)).unwrap(), "/api/list/jlpt/4");
        assert_eq!(endpoint(StudyMode::Jlpt, Difficulty::Jlpt(4)).unwrap(), "/api/list/jlpt/4");
        assert_eq!(endpoint(StudyMode::Jlpt, Difficulty::Jlpt(1)).unwrap(), "/api/list/jlpt/1");
    }

    #[test]
    fn test_frequency_mode_fetches_full_jouyou_list() {
        assert_eq!(
            endpoint(StudyMode::Frequency, Difficulty::Top(100)).unwrap(),
            "/api/list/jouyou/"
        );
        assert_eq!(
            endpoint(StudyMode::Frequency, Difficulty::Top(500)).unwrap(),
            "/api/list/jouyou/"
        );
    }

    #[test]
    fn test_incoherent_pair_is_rejected() {
        assert!(matches!(
            endpoint(StudyMode::Jlpt, Difficulty::Top(100)),
            Err(KanfudaError::InvalidDifficulty { .. })
        ));
    }
}
