use serde::{Deserialize, Serialize};
use tango_types::FlashcardRecord;

/// Front/back layout of a note.
///
/// Placeholders: `{term}`, `{reading}`, `{definition}`, `{source}`.
/// Sense separators (`|`) in the definition become `<br>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub model: String,
    pub front_template: String,
    pub back_template: String,
}

impl CardTemplate {
    /// Default vocabulary template with a link back to the article
    pub fn default_japanese(model: String) -> Self {
        Self {
            model,
            front_template: "{term}<br>{reading}".to_string(),
            back_template: "{definition}<br><a href=\"{source}\">Article URL</a>".to_string(),
        }
    }

    /// Create custom template
    pub fn new(model: String, front: String, back: String) -> Self {
        Self {
            model,
            front_template: front,
            back_template: back,
        }
    }

    /// Format the front of the card
    pub fn format_front(&self, record: &FlashcardRecord) -> String {
        fill(&self.front_template, record)
    }

    /// Format the back of the card
    pub fn format_back(&self, record: &FlashcardRecord) -> String {
        fill(&self.back_template, record)
    }
}

fn fill(template: &str, record: &FlashcardRecord) -> String {
    template
        .replace("{term}", &record.term)
        .replace("{reading}", record.reading.as_deref().unwrap_or_default())
        .replace("{definition}", &record.definition.replace('|', "<br>"))
        .replace("{source}", &record.source)
}
