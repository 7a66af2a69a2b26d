use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::dictionary::DictionaryConfig;

pub mod anki;
pub mod dictionary;

fn default_output() -> String {
    "decks.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub anki: AnkiConfig,

    /// Where the resolved decks are written as JSON
    #[serde(default = "default_output")]
    pub output: String,
}

impl Config {
    /// Layer environment overrides over whatever was loaded.
    ///
    /// `var` looks a variable up; the binary reads the process environment.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.dictionary.apply_env(&var);
        self.anki.apply_env(&var);
        if let Some(output) = var("TANGO_OUTPUT") {
            self.output = output;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            anki: AnkiConfig::default(),
            output: default_output(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tango_core::resolver::NarrowingPolicy;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"dictionary": {"path": "jmdict.json", "narrowing": "written_forms_or_readings"},
                "anki": {"enabled": true}}"#,
        )
        .unwrap();

        assert_eq!(config.dictionary.path, "jmdict.json");
        assert_eq!(config.dictionary.narrowing, NarrowingPolicy::WrittenFormsOrReadings);
        assert!(!config.dictionary.normalize_queries);
        assert!(config.anki.enabled);
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.output, "decks.json");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: Config = serde_json::from_str(
            r#"{"dictionary": {"path": "file.json"}, "output": "file-decks.json",
                "anki": {"deck_prefix": "FromFile"}}"#,
        )
        .unwrap();
        let vars: HashMap<&str, &str> = [
            ("TANGO_DICTIONARY", "env.json"),
            ("ANKI_URL", "http://anki:8765"),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dictionary.path, "env.json");
        assert_eq!(config.anki.url, "http://anki:8765");
        // Unset variables leave file values alone
        assert_eq!(config.output, "file-decks.json");
        assert_eq!(config.anki.deck_prefix, "FromFile");
    }

    #[test]
    fn test_default_narrowing_is_written_forms() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.dictionary.narrowing, NarrowingPolicy::WrittenForms);
        assert_eq!(config.dictionary.path, "wwwjdic.json");
        assert!(!config.anki.enabled);
    }
}
