use serde::{Deserialize, Serialize};
use tango_core::resolver::NarrowingPolicy;

fn default_path() -> String {
    "wwwjdic.json".to_string()
}

fn default_normalize_queries() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// JMdict JSON file
    #[serde(default = "default_path")]
    pub path: String,
    /// Merged over the main dictionary, later files win by entry id
    #[serde(default)]
    pub additional_paths: Vec<String>,
    /// NFKC-normalize words before lookup
    #[serde(default = "default_normalize_queries")]
    pub normalize_queries: bool,
    #[serde(default)]
    pub narrowing: NarrowingPolicy,
}

impl DictionaryConfig {
    /// Override fields from `TANGO_DICTIONARY`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TANGO_DICTIONARY") {
            self.path = path;
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            additional_paths: vec![],
            normalize_queries: default_normalize_queries(),
            narrowing: NarrowingPolicy::default(),
        }
    }
}
