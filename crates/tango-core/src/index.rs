use std::collections::HashMap;
use std::path::Path;

use crate::dictionary::{DictionaryEntry, DictionaryLoader, EntryIndex, merge_entries};
use crate::error::LoadError;

/// Read-only dictionary with inverted indices over written forms and readings
#[derive(Debug, Default)]
pub struct DictionaryIndex {
    entries: Vec<DictionaryEntry>,
    written_index: HashMap<String, Vec<EntryIndex>>,
    reading_index: HashMap<String, Vec<EntryIndex>>,
}

impl DictionaryIndex {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        let mut written_index: HashMap<String, Vec<EntryIndex>> = HashMap::new();
        let mut reading_index: HashMap<String, Vec<EntryIndex>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            for form in &entry.written_forms {
                push_unique(written_index.entry(form.clone()).or_default(), idx);
            }
            for reading in &entry.readings {
                push_unique(reading_index.entry(reading.clone()).or_default(), idx);
            }
        }

        tracing::debug!(
            entries = entries.len(),
            written_forms = written_index.len(),
            readings = reading_index.len(),
            "Built dictionary index"
        );

        Self {
            entries,
            written_index,
            reading_index,
        }
    }

    /// Entries listing `form` among their written forms, in dictionary order
    pub fn entries_containing_written_form(&self, form: &str) -> &[EntryIndex] {
        self.written_index
            .get(form)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entries listing `reading` among their readings, in dictionary order
    pub fn entries_containing_reading(&self, reading: &str) -> &[EntryIndex] {
        self.reading_index
            .get(reading)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entry(&self, idx: EntryIndex) -> Option<&DictionaryEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the main dictionary plus any additional ones and build the index.
///
/// A broken additional dictionary is skipped with a warning, except for
/// structural errors, which abort the load like they do for the main file.
pub fn load_index(
    loader: &dyn DictionaryLoader,
    path: &Path,
    additional_paths: &[String],
) -> Result<DictionaryIndex, LoadError> {
    tracing::info!(
        "Loading dictionary {} (formats: {})",
        path.display(),
        loader.supported_formats().join(", ")
    );
    let mut entries = loader.load_from_file(path)?;

    for extra in additional_paths {
        match loader.load_from_file(Path::new(extra)) {
            Ok(additional) => {
                tracing::info!("Merging additional dictionary from: {}", extra);
                entries = merge_entries(entries, additional);
            }
            Err(e @ LoadError::StructuralMismatch { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!("Failed to load dictionary from {}: {}", extra, e);
            }
        }
    }

    Ok(DictionaryIndex::new(entries))
}

// Entries are visited in ascending order, so a duplicate form within one
// entry can only collide with the last pushed index.
fn push_unique(list: &mut Vec<EntryIndex>, idx: EntryIndex) {
    if list.last() != Some(&idx) {
        list.push(idx);
    }
}
