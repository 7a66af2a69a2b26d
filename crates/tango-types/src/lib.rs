pub mod jlpt;
pub mod types;

pub use jlpt::JlptLevel;
pub use types::{Article, Corpus, Decks, FlashcardRecord, VocabularyItem, WordOccurrence};
