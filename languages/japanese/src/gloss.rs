use tango_core::dictionary::{DictionaryEntry, GlossFormatter};

use crate::tags;

/// Formats JMdict senses for the back of a card.
///
/// `<b>noun (普通名詞):|</b>1. advance; progress (usu. kana)|2. ...`
///
/// The part-of-speech header is repeated only when it changes from the
/// previous sense. Misc and field tags are expanded, usage notes are kept as
/// written.
#[derive(Debug, Clone, Copy, Default)]
pub struct JMdictGlossFormatter;

impl GlossFormatter for JMdictGlossFormatter {
    fn format(&self, entry: &DictionaryEntry) -> String {
        let mut senses = Vec::with_capacity(entry.senses.len());
        let mut previous_pos: Option<&[String]> = None;

        for (num, sense) in entry.senses.iter().enumerate() {
            let mut text = String::new();

            let pos = sense.part_of_speech.as_slice();
            if previous_pos != Some(pos) && !pos.is_empty() {
                let names: Vec<String> = pos.iter().map(|p| tags::display(p)).collect();
                text.push_str(&format!("<b>{}:|</b>", names.join(", ")));
            }
            previous_pos = Some(pos);

            text.push_str(&format!("{}. {}", num + 1, sense.glosses.join("; ")));

            let notes: Vec<String> = sense
                .misc
                .iter()
                .chain(&sense.field)
                .map(|t| tags::display(t))
                .chain(sense.info.iter().cloned())
                .collect();
            if !notes.is_empty() {
                text.push_str(&format!(" ({})", notes.join(", ")));
            }

            senses.push(text);
        }

        senses.join("|")
    }
}
