use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck_prefix() -> String {
    "Japanese::News".to_string()
}

fn default_model() -> String {
    "Basic".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnkiConfig {
    /// Push decks to Anki after resolving
    pub enabled: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Decks are named `{deck_prefix}::N1` .. `{deck_prefix}::N5`
    #[serde(default = "default_deck_prefix")]
    pub deck_prefix: String,
    /// Note type; must have Front and Back fields
    #[serde(default = "default_model")]
    pub model: String,
}

impl AnkiConfig {
    /// Override fields from `ANKI_URL` and `ANKI_DECK_PREFIX`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ANKI_URL") {
            self.url = url;
        }
        if let Some(prefix) = var("ANKI_DECK_PREFIX") {
            self.deck_prefix = prefix;
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            deck_prefix: default_deck_prefix(),
            model: default_model(),
        }
    }
}
