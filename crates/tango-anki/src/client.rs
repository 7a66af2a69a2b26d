use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

const API_VERSION: u32 = 6;

/// Minimal AnkiConnect client: version probe, deck creation, note insertion
#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

/// Basic-model note as AnkiConnect expects it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note<'a> {
    pub deck_name: &'a str,
    pub model_name: &'a str,
    pub fields: NoteFields<'a>,
    pub tags: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoteFields<'a> {
    pub front: &'a str,
    pub back: &'a str,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// AnkiConnect API version; fails when Anki is not running
    pub async fn check_connection(&self) -> Result<u32> {
        self.invoke("version", json!({})).await
    }

    /// Create a deck; the existing id comes back if it is already there
    pub async fn create_deck(&self, deck: &str) -> Result<u64> {
        self.invoke("createDeck", json!({ "deck": deck })).await
    }

    /// Add a note, returning its id. Duplicates are rejected by Anki.
    pub async fn add_note(&self, note: &Note<'_>) -> Result<u64> {
        self.invoke("addNote", json!({ "note": note }))
            .await
            .with_context(|| format!("addNote to {}", note.deck_name))
    }

    async fn invoke<T: DeserializeOwned>(&self, action: &str, params: serde_json::Value) -> Result<T> {
        let request = AnkiRequest {
            action,
            version: API_VERSION,
            params,
        };

        let response: AnkiResponse<T> = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to AnkiConnect")?
            .json()
            .await
            .context("Failed to parse AnkiConnect response")?;

        response.into_result()
    }
}

#[derive(Serialize)]
struct AnkiRequest<'a> {
    action: &'a str,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        match (self.error, self.result) {
            (Some(error), _) => anyhow::bail!("AnkiConnect error: {}", error),
            (None, Some(result)) => Ok(result),
            (None, None) => anyhow::bail!("AnkiConnect returned null result"),
        }
    }
}
