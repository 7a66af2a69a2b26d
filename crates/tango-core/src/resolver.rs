use serde::{Deserialize, Serialize};

use crate::dictionary::{DictionaryEntry, EntryIndex};
use crate::index::DictionaryIndex;

/// Outcome of matching one word against the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(EntryIndex),
    Unresolved,
    /// Several candidates survived; an operator has to pick one
    NeedsDecision(Vec<EntryIndex>),
}

/// How the reading corroborates a candidate when several entries share a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowingPolicy {
    /// The reading must appear among the entry's written forms
    #[default]
    WrittenForms,
    /// The reading may appear among written forms or readings
    WrittenFormsOrReadings,
}

impl NarrowingPolicy {
    /// Whether `entry` survives the narrowing pass for `(primary, secondary)`
    pub fn corroborates(&self, entry: &DictionaryEntry, primary: &str, secondary: &str) -> bool {
        if !entry.has_written_form(primary) {
            return false;
        }
        if primary == secondary {
            return true;
        }
        match self {
            NarrowingPolicy::WrittenForms => entry.has_written_form(secondary),
            NarrowingPolicy::WrittenFormsOrReadings => {
                entry.has_written_form(secondary) || entry.has_reading(secondary)
            }
        }
    }
}

/// Matches a surface form and its reading to a single dictionary entry
#[derive(Clone, Copy)]
pub struct CandidateResolver<'a> {
    index: &'a DictionaryIndex,
    policy: NarrowingPolicy,
}

impl<'a> CandidateResolver<'a> {
    pub fn new(index: &'a DictionaryIndex) -> Self {
        Self {
            index,
            policy: NarrowingPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: NarrowingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn index(&self) -> &'a DictionaryIndex {
        self.index
    }

    /// Resolve `primary`, using `secondary` (its reading) to break ties.
    ///
    /// Written-form matches always win over reading matches. With several
    /// candidates, entries whose forms also carry `secondary` are kept; if that
    /// leaves nothing, the operator chooses among all candidates instead.
    pub fn resolve(&self, primary: &str, secondary: Option<&str>) -> Resolution {
        let secondary = secondary.unwrap_or(primary);

        let mut potential = self.index.entries_containing_written_form(primary);
        if potential.is_empty() {
            potential = self.index.entries_containing_reading(primary);
        }

        match potential {
            [] => Resolution::Unresolved,
            [only] => Resolution::Resolved(*only),
            _ => {
                let likely = self.narrow(potential, primary, secondary);
                match likely.as_slice() {
                    [only] => Resolution::Resolved(*only),
                    [] => Resolution::NeedsDecision(potential.to_vec()),
                    _ => Resolution::NeedsDecision(likely),
                }
            }
        }
    }

    fn narrow(&self, potential: &[EntryIndex], primary: &str, secondary: &str) -> Vec<EntryIndex> {
        potential
            .iter()
            .copied()
            .filter(|&idx| {
                self.index
                    .entry(idx)
                    .is_some_and(|entry| self.policy.corroborates(entry, primary, secondary))
            })
            .collect()
    }
}
