//! JMdict JSON documents.
//!
//! Two layouts are understood:
//! - the xml2json conversion of `JMdict_e.xml`: an array of `entry` objects where
//!   any child may be a single value or a list (optionally double-encoded as a
//!   JSON string);
//! - jmdict-simplified: `{"words": [...]}`.
//!
//! Both are normalized into [`DictionaryEntry`] here so nothing downstream has
//! to care about the source shape.

use serde::{Deserialize, Deserializer};
use tango_core::dictionary::{DictionaryEntry, Sense};
use tango_core::error::LoadError;

use crate::tags;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    // Tried first so a list of bare strings is never read as one element
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(value.map(OneOrMany::into_vec).unwrap_or_default())
}

// xml2json layout

#[derive(Debug, Deserialize)]
struct XmlEntry {
    #[serde(default)]
    ent_seq: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    k_ele: Vec<KanjiElement>,
    #[serde(default, deserialize_with = "one_or_many")]
    r_ele: Vec<ReadingElement>,
    #[serde(default, deserialize_with = "one_or_many")]
    sense: Vec<XmlSense>,
}

#[derive(Debug, Deserialize)]
struct KanjiElement {
    keb: String,
}

#[derive(Debug, Deserialize)]
struct ReadingElement {
    reb: String,
}

#[derive(Debug, Deserialize)]
struct XmlSense {
    #[serde(default, deserialize_with = "one_or_many")]
    gloss: Vec<XmlGloss>,
    #[serde(default, deserialize_with = "one_or_many")]
    pos: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    misc: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    field: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    s_inf: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum XmlGloss {
    Text(String),
    Element {
        #[serde(rename = "#text", default)]
        text: Option<String>,
        #[serde(rename = "@xml:lang", default)]
        lang: Option<String>,
    },
}

impl XmlGloss {
    /// English text; glosses without a language attribute are English
    fn into_english(self) -> Option<String> {
        match self {
            XmlGloss::Text(text) => Some(text),
            XmlGloss::Element { text, lang } => match lang.as_deref() {
                None | Some("eng") => text,
                Some(_) => None,
            },
        }
    }
}

// jmdict-simplified layout

#[derive(Debug, Deserialize)]
struct SimplifiedJson {
    words: Vec<SimplifiedEntry>,
}

#[derive(Debug, Deserialize)]
struct SimplifiedEntry {
    id: String,
    #[serde(default)]
    kanji: Vec<TextElement>,
    #[serde(default)]
    kana: Vec<TextElement>,
    #[serde(default)]
    sense: Vec<SimplifiedSense>,
}

#[derive(Debug, Deserialize)]
struct TextElement {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SimplifiedSense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    misc: Vec<String>,
    #[serde(default)]
    field: Vec<String>,
    #[serde(default)]
    info: Vec<String>,
    #[serde(default)]
    gloss: Vec<SimplifiedGloss>,
}

#[derive(Debug, Deserialize)]
struct SimplifiedGloss {
    lang: String,
    text: String,
}

/// Parse a JMdict document in either layout, keeping file order
pub fn parse_entries(json: &str) -> Result<Vec<DictionaryEntry>, LoadError> {
    match json.trim_start().chars().next() {
        Some('[') => {
            let raw: Vec<XmlEntry> = serde_json::from_str(json)?;
            from_xml_entries(raw)
        }
        Some('{') => {
            let raw: SimplifiedJson = serde_json::from_str(json)?;
            from_simplified_entries(raw.words)
        }
        Some('"') => {
            // Document stored as a JSON string holding the real document
            let inner: String = serde_json::from_str(json)?;
            if inner.trim_start().starts_with('"') {
                return Err(LoadError::InvalidFormat(
                    "dictionary document is encoded more than twice".to_string(),
                ));
            }
            parse_entries(&inner)
        }
        Some(other) => Err(LoadError::InvalidFormat(format!(
            "expected a JSON array, object or string, found {other:?}"
        ))),
        None => Err(LoadError::InvalidFormat("empty dictionary document".to_string())),
    }
}

fn from_xml_entries(raw: Vec<XmlEntry>) -> Result<Vec<DictionaryEntry>, LoadError> {
    let mut entries = Vec::with_capacity(raw.len());

    for (position, entry) in raw.into_iter().enumerate() {
        let senses = entry
            .sense
            .into_iter()
            .map(|s| Sense {
                glosses: s.gloss.into_iter().filter_map(XmlGloss::into_english).collect(),
                part_of_speech: normalize_tags(s.pos),
                misc: normalize_tags(s.misc),
                field: normalize_tags(s.field),
                info: s.s_inf,
            })
            .collect();

        let built = build_entry(
            entry.ent_seq,
            position,
            entry.k_ele.into_iter().map(|k| k.keb).collect(),
            entry.r_ele.into_iter().map(|r| r.reb).collect(),
            senses,
        )?;
        entries.extend(built);
    }

    Ok(entries)
}

fn from_simplified_entries(raw: Vec<SimplifiedEntry>) -> Result<Vec<DictionaryEntry>, LoadError> {
    let mut entries = Vec::with_capacity(raw.len());

    for (position, entry) in raw.into_iter().enumerate() {
        let senses = entry
            .sense
            .into_iter()
            .map(|s| Sense {
                // Only use English glosses
                glosses: s
                    .gloss
                    .into_iter()
                    .filter(|g| g.lang == "eng")
                    .map(|g| g.text)
                    .collect(),
                part_of_speech: normalize_tags(s.part_of_speech),
                misc: normalize_tags(s.misc),
                field: normalize_tags(s.field),
                info: s.info,
            })
            .collect();

        let built = build_entry(
            Some(entry.id),
            position,
            entry.kanji.into_iter().map(|k| k.text).collect(),
            entry.kana.into_iter().map(|k| k.text).collect(),
            senses,
        )?;
        entries.extend(built);
    }

    Ok(entries)
}

fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    raw.iter().map(|t| tags::normalize(t).to_string()).collect()
}

/// Validate and finish one entry; `None` when it has no English sense left
fn build_entry(
    id: Option<String>,
    position: usize,
    written_forms: Vec<String>,
    readings: Vec<String>,
    mut senses: Vec<Sense>,
) -> Result<Option<DictionaryEntry>, LoadError> {
    let label = || id.clone().unwrap_or_else(|| format!("#{position}"));

    if readings.is_empty() {
        return Err(LoadError::StructuralMismatch {
            entry: label(),
            reason: "entry has no readings".to_string(),
        });
    }
    if written_forms.iter().chain(&readings).any(|f| f.trim().is_empty()) {
        return Err(LoadError::StructuralMismatch {
            entry: label(),
            reason: "empty written form or reading".to_string(),
        });
    }

    // A sense without part-of-speech continues the previous one
    for i in 1..senses.len() {
        if senses[i].part_of_speech.is_empty() {
            senses[i].part_of_speech = senses[i - 1].part_of_speech.clone();
        }
    }

    senses.retain(|s| !s.glosses.is_empty());
    if senses.is_empty() {
        tracing::debug!(entry = %label(), "Skipping entry without English senses");
        return Ok(None);
    }

    Ok(Some(DictionaryEntry {
        id,
        written_forms,
        readings,
        senses,
    }))
}
