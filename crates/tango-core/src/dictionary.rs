use std::collections::HashMap;
use std::path::Path;

use crate::error::LoadError;

/// Position of an entry in the loaded dictionary
pub type EntryIndex = usize;

/// One lexical record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Source identifier (JMdict `ent_seq`), used for merging only
    pub id: Option<String>,
    /// Kanji forms, empty for kana-only words
    pub written_forms: Vec<String>,
    /// Kana readings, never empty once loaded
    pub readings: Vec<String>,
    pub senses: Vec<Sense>,
}

/// One meaning of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sense {
    pub glosses: Vec<String>,
    pub part_of_speech: Vec<String>,
    pub misc: Vec<String>,
    pub field: Vec<String>,
    /// Free-text usage notes
    pub info: Vec<String>,
}

impl DictionaryEntry {
    pub fn has_written_form(&self, form: &str) -> bool {
        self.written_forms.iter().any(|f| f == form)
    }

    pub fn has_reading(&self, reading: &str) -> bool {
        self.readings.iter().any(|r| r == reading)
    }

    /// Forms shown to an operator choosing between entries
    pub fn display_forms(&self) -> String {
        if self.written_forms.is_empty() {
            self.readings.join(", ")
        } else {
            self.written_forms.join(", ")
        }
    }
}

/// Merge two dictionaries.
///
/// An entry of `additional` whose id already exists replaces the base entry in
/// place; everything else is appended in order.
pub fn merge_entries(mut base: Vec<DictionaryEntry>, additional: Vec<DictionaryEntry>) -> Vec<DictionaryEntry> {
    let mut positions: HashMap<String, usize> = base
        .iter()
        .enumerate()
        .filter_map(|(idx, e)| e.id.clone().map(|id| (id, idx)))
        .collect();

    for entry in additional {
        match entry.id.as_ref().and_then(|id| positions.get(id)) {
            Some(&idx) => base[idx] = entry,
            None => {
                if let Some(id) = &entry.id {
                    positions.insert(id.clone(), base.len());
                }
                base.push(entry);
            }
        }
    }

    base
}

/// Load dictionaries from files
pub trait DictionaryLoader {
    /// Load entries from file path, in file order
    fn load_from_file(&self, path: &Path) -> Result<Vec<DictionaryEntry>, LoadError>;

    /// Supported file formats
    fn supported_formats(&self) -> Vec<String>;
}

/// Renders an entry's senses into the card's definition text
pub trait GlossFormatter: Send + Sync {
    /// Marked-up gloss stored on the flashcard
    fn format(&self, entry: &DictionaryEntry) -> String;

    /// Plain-text gloss for terminal display
    fn summary(&self, entry: &DictionaryEntry) -> String {
        strip_markup(&self.format(entry))
    }
}

/// Remove bold tags and turn sense separators into line breaks
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "")
        .replace("</b>", "")
        .replace('|', "\n")
}
