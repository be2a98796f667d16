//! Remote dictionary lookup for the lookup panel.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a word.";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    word: &'a str,
}

/// Lookup panel state. Each request gets an id; results for older ids are
/// dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Pending {
        request_id: u64,
        word: String,
    },
    Found(LookupResult),
    NotFound(String),
    Failed(String),
}

impl LookupStatus {
    pub fn pending_id(&self) -> Option<u64> {
        match self {
            LookupStatus::Pending { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }
}

/// Trimmed query, or the inline message to show instead.
pub fn validate_query(input: &str) -> Result<&str, &'static str> {
    let word = input.trim();
    if word.is_empty() {
        Err(EMPTY_QUERY_MESSAGE)
    } else {
        Ok(word)
    }
}

/// POST `{word}` to `endpoint`. `Ok(None)` means the service had no entry.
pub async fn lookup_word(
    endpoint: String,
    word: String,
    timeout: Duration,
) -> SyncResult<Option<LookupResult>> {
    let client = reqwest::Client::builder()
        .user_agent(format!("cinelingua/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|err| SyncError::LookupFailed(format!("client setup: {err}")))?;

    debug!(%endpoint, %word, "Sending lookup request");
    let response = client
        .post(&endpoint)
        .json(&LookupRequest { word: &word })
        .send()
        .await
        .map_err(|err| SyncError::LookupFailed(err.to_string()))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        info!(%word, "No lookup entry");
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(SyncError::LookupFailed(format!(
            "lookup service returned status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|err| SyncError::LookupFailed(err.to_string()))?;
    parse_lookup_body(&body)
}

/// Decode a lookup response body; `null` is a miss.
pub fn parse_lookup_body(body: &str) -> SyncResult<Option<LookupResult>> {
    serde_json::from_str::<Option<LookupResult>>(body)
        .map_err(|err| SyncError::LookupFailed(format!("unreadable response: {err}")))
}
