mod aggregate_tests;

use std::collections::VecDeque;

use crate::dictionary::{DictionaryEntry, EntryIndex, GlossFormatter, Sense};
use crate::tiebreak::{Prompt, TiebreakError, Tiebreaker};

pub(crate) fn entry(written: &[&str], readings: &[&str], gloss: &str) -> DictionaryEntry {
    DictionaryEntry {
        id: None,
        written_forms: written.iter().map(|s| s.to_string()).collect(),
        readings: readings.iter().map(|s| s.to_string()).collect(),
        senses: vec![Sense {
            glosses: vec![gloss.to_string()],
            part_of_speech: vec!["n".to_string()],
            ..Default::default()
        }],
    }
}

/// `<b>n:|</b>1. gloss` per sense, enough to exercise markup stripping
pub(crate) struct PlainFormatter;

impl GlossFormatter for PlainFormatter {
    fn format(&self, entry: &DictionaryEntry) -> String {
        entry
            .senses
            .iter()
            .enumerate()
            .map(|(i, s)| format!("<b>{}:|</b>{}. {}", s.part_of_speech.join(", "), i + 1, s.glosses.join("; ")))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Answers prompts from a script and records what it was asked
#[derive(Default)]
pub(crate) struct ScriptedTiebreaker {
    answers: VecDeque<Result<usize, TiebreakError>>,
    pub asked: Vec<(String, Vec<EntryIndex>)>,
}

impl ScriptedTiebreaker {
    pub fn answering(answers: impl IntoIterator<Item = Result<usize, TiebreakError>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Tiebreaker for ScriptedTiebreaker {
    fn choose(&mut self, prompt: &Prompt<'_>) -> Result<usize, TiebreakError> {
        self.asked.push((
            prompt.query.to_string(),
            prompt.candidates.iter().map(|c| c.index).collect(),
        ));
        self.answers.pop_front().unwrap_or(Err(TiebreakError::InputClosed))
    }
}
