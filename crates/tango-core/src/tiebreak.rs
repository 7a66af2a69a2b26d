use std::io::{BufRead, Write};

use unicode_normalization::UnicodeNormalization;

use crate::dictionary::{DictionaryEntry, EntryIndex};

/// Candidate shown to the operator
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub index: EntryIndex,
    pub entry: &'a DictionaryEntry,
    /// Gloss with markup stripped
    pub summary: String,
}

/// An unresolved choice between dictionary entries
#[derive(Debug, Clone)]
pub struct Prompt<'a> {
    /// Word as it appeared in the article
    pub query: &'a str,
    pub candidates: Vec<Candidate<'a>>,
}

/// Picks one candidate out of a prompt.
///
/// Returns the 0-based position in `prompt.candidates`.
pub trait Tiebreaker {
    fn choose(&mut self, prompt: &Prompt<'_>) -> Result<usize, TiebreakError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TiebreakError {
    /// Input that is not a number at all; the current word is skipped
    #[error("Not a number: {0:?}")]
    MalformedInput(String),

    #[error("Operator input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0-based position
    Chosen(usize),
    /// An integer outside `1..=count`, however large
    OutOfRange,
}

/// Parse a 1-based selection among `count` candidates.
///
/// Full-width digits from a Japanese IME are folded to ASCII first. Any
/// optionally signed run of digits is a number; everything else is malformed.
pub fn parse_selection(line: &str, count: usize) -> Result<Selection, TiebreakError> {
    let trimmed = line.trim();
    let folded: String = trimmed.nfkc().collect();
    let digits = folded.strip_prefix(['+', '-']).unwrap_or(&folded);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TiebreakError::MalformedInput(trimmed.to_string()));
    }

    // Negative and overflowing numbers fail to parse as usize
    match folded.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(Selection::Chosen(n - 1)),
        _ => Ok(Selection::OutOfRange),
    }
}

/// Line-based prompt over any reader/writer pair (stdin/stdout in the binary).
///
/// A number outside the candidate range asks again; anything that is not a
/// number gives up on the word.
pub struct ConsoleTiebreaker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleTiebreaker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn render(&mut self, prompt: &Prompt<'_>) -> std::io::Result<()> {
        writeln!(
            self.output,
            "Multiple matches found. Which definition is most correct for:"
        )?;
        writeln!(self.output, "{}?:", prompt.query)?;
        for (num, candidate) in prompt.candidates.iter().enumerate() {
            writeln!(self.output, "----------[{}]----------", num + 1)?;
            writeln!(self.output, "{}", candidate.entry.display_forms())?;
            for line in candidate.summary.lines() {
                writeln!(self.output, "   {line}")?;
            }
            writeln!(self.output)?;
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> Result<String, TiebreakError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TiebreakError::InputClosed);
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Tiebreaker for ConsoleTiebreaker<R, W> {
    fn choose(&mut self, prompt: &Prompt<'_>) -> Result<usize, TiebreakError> {
        let count = prompt.candidates.len();
        self.render(prompt)?;

        loop {
            let line = self.read_line()?;
            match parse_selection(&line, count)? {
                Selection::Chosen(position) => return Ok(position),
                Selection::OutOfRange => {
                    tracing::debug!(selection = line.trim(), count, "Selection out of range");
                    writeln!(self.output, "Choose a number between 1 and {count}:")?;
                    self.output.flush()?;
                }
            }
        }
    }
}
