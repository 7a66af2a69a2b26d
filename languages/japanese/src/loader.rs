use std::path::Path;

use tango_core::dictionary::{DictionaryEntry, DictionaryLoader};
use tango_core::error::LoadError;

use crate::dictionary::parse_entries;

/// Reads JMdict JSON files in either supported layout
pub struct JMdictLoader;

impl DictionaryLoader for JMdictLoader {
    fn load_from_file(&self, path: &Path) -> Result<Vec<DictionaryEntry>, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading JMdict from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let entries = parse_entries(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", entries.len());
        Ok(entries)
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["jmdict-xml2json".to_string(), "jmdict-simplified".to_string()]
    }
}
