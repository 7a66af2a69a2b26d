use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::jlpt::JlptLevel;

/// Vocabulary extracted from a batch of articles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// One source article and its tagged words, keyed by level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    #[serde(default, deserialize_with = "merge_level_lists")]
    pub vocabulary: BTreeMap<JlptLevel, Vec<WordOccurrence>>,
}

// `N1` and `jlpt-n1` name the same level; their lists are concatenated in
// document order instead of the later key replacing the earlier one.
fn merge_level_lists<'de, D>(deserializer: D) -> Result<BTreeMap<JlptLevel, Vec<WordOccurrence>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LevelListsVisitor;

    impl<'de> Visitor<'de> for LevelListsVisitor {
        type Value = BTreeMap<JlptLevel, Vec<WordOccurrence>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from JLPT level to word lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut levels: Self::Value = BTreeMap::new();
            while let Some((level, words)) = map.next_entry::<JlptLevel, Vec<WordOccurrence>>()? {
                levels.entry(level).or_default().extend(words);
            }
            Ok(levels)
        }
    }

    deserializer.deserialize_map(LevelListsVisitor)
}

/// A word as it appeared in the article markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOccurrence {
    pub surface: String,
    /// Furigana, absent when the source rendered none
    #[serde(default)]
    pub reading: Option<String>,
}

impl WordOccurrence {
    pub fn new(surface: impl Into<String>, reading: Option<&str>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.map(str::to_string),
        }
    }
}

/// One occurrence of a word, tied to its level and source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyItem<'a> {
    pub surface: &'a str,
    pub reading: Option<&'a str>,
    pub level: JlptLevel,
    pub source: &'a str,
}

impl Corpus {
    /// Items in resolution order: level (N1 first), then article, then position in article
    pub fn items(&self) -> impl Iterator<Item = VocabularyItem<'_>> + '_ {
        JlptLevel::ALL.into_iter().flat_map(move |level| {
            self.articles.iter().flat_map(move |article| {
                article
                    .vocabulary
                    .get(&level)
                    .into_iter()
                    .flatten()
                    .map(move |word| VocabularyItem {
                        surface: &word.surface,
                        reading: word.reading.as_deref(),
                        level,
                        source: &article.url,
                    })
            })
        })
    }

    pub fn item_count(&self) -> usize {
        self.articles
            .iter()
            .map(|a| a.vocabulary.values().map(Vec::len).sum::<usize>())
            .sum()
    }
}

/// Final output unit: one card per resolved occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    /// Surface form as observed in the article
    pub term: String,
    /// Reading as observed in the article
    pub reading: Option<String>,
    /// Formatted gloss of the resolved entry
    pub definition: String,
    /// Article URL
    pub source: String,
}

/// Flashcard records partitioned by level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decks(BTreeMap<JlptLevel, Vec<FlashcardRecord>>);

impl Decks {
    /// Every level present, each deck empty
    pub fn new() -> Self {
        Self(JlptLevel::ALL.into_iter().map(|l| (l, Vec::new())).collect())
    }

    pub fn push(&mut self, level: JlptLevel, record: FlashcardRecord) {
        self.0.entry(level).or_default().push(record);
    }

    pub fn deck(&self, level: JlptLevel) -> &[FlashcardRecord] {
        self.0.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (JlptLevel, &[FlashcardRecord])> {
        self.0.iter().map(|(level, cards)| (*level, cards.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl Default for Decks {
    fn default() -> Self {
        Self::new()
    }
}
