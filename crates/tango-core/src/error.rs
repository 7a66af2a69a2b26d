use crate::dictionary::EntryIndex;
use crate::tiebreak::TiebreakError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Structural mismatch in entry {entry}: {reason}")]
    StructuralMismatch { entry: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Tiebreak failed: {0}")]
    Tiebreak(#[from] TiebreakError),

    #[error("Tiebreaker chose position {position} out of {count} candidates")]
    ChoiceOutOfRange { position: usize, count: usize },

    #[error("Resolved to entry {0}, which is not in the dictionary")]
    UnknownEntry(EntryIndex),
}
