pub mod aggregate;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod preprocess;
pub mod resolver;
pub mod tiebreak;

#[cfg(test)]
mod tests;

pub use aggregate::{ResolutionStats, VocabularyAggregator, resolve_corpus};
pub use dictionary::{DictionaryEntry, DictionaryLoader, EntryIndex, GlossFormatter, Sense, merge_entries};
pub use error::{LoadError, ResolveError};
pub use index::{DictionaryIndex, load_index};
pub use resolver::{CandidateResolver, NarrowingPolicy, Resolution};
pub use tiebreak::{ConsoleTiebreaker, Prompt, TiebreakError, Tiebreaker};
