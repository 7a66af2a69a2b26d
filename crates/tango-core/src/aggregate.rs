use tango_types::{Corpus, Decks, FlashcardRecord, VocabularyItem};

use crate::dictionary::{DictionaryEntry, EntryIndex, GlossFormatter};
use crate::error::ResolveError;
use crate::index::DictionaryIndex;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::resolver::{CandidateResolver, NarrowingPolicy, Resolution};
use crate::tiebreak::{Candidate, Prompt, TiebreakError, Tiebreaker};

/// Counters for one corpus run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: usize,
    pub unresolved: usize,
    /// Items that needed an operator decision
    pub prompted: usize,
    /// Prompts answered with something that was not a number
    pub declined: usize,
}

/// Resolves every word of a corpus and collects the resolved ones into decks
pub struct VocabularyAggregator<'a, T> {
    resolver: CandidateResolver<'a>,
    formatter: &'a dyn GlossFormatter,
    preprocessor: Box<dyn Preprocessor>,
    tiebreaker: T,
    stats: ResolutionStats,
}

impl<'a, T: Tiebreaker> VocabularyAggregator<'a, T> {
    pub fn new(index: &'a DictionaryIndex, formatter: &'a dyn GlossFormatter, tiebreaker: T) -> Self {
        Self {
            resolver: CandidateResolver::new(index),
            formatter,
            preprocessor: Box::new(DefaultPreprocessor),
            tiebreaker,
            stats: ResolutionStats::default(),
        }
    }

    pub fn narrowing(mut self, policy: NarrowingPolicy) -> Self {
        self.resolver = self.resolver.policy(policy);
        self
    }

    pub fn preprocessor(mut self, preprocessor: Box<dyn Preprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }

    pub fn into_tiebreaker(self) -> T {
        self.tiebreaker
    }

    /// Resolve every item, in corpus order, into per-level decks.
    ///
    /// Words without a dictionary match are left out. Only a failing
    /// tiebreaker (closed input, I/O error) aborts the run.
    pub fn resolve_corpus(&mut self, corpus: &Corpus) -> Result<Decks, ResolveError> {
        let mut decks = Decks::new();

        tracing::info!(
            articles = corpus.articles.len(),
            items = corpus.item_count(),
            "Resolving corpus"
        );

        for item in corpus.items() {
            let Some(entry) = self.resolve_item(&item)? else {
                continue;
            };

            decks.push(
                item.level,
                FlashcardRecord {
                    term: item.surface.to_string(),
                    reading: item.reading.map(str::to_string),
                    definition: self.formatter.format(entry),
                    source: item.source.to_string(),
                },
            );
        }

        tracing::info!(
            resolved = self.stats.resolved,
            unresolved = self.stats.unresolved,
            prompted = self.stats.prompted,
            declined = self.stats.declined,
            "Corpus resolved"
        );

        Ok(decks)
    }

    /// Resolve one item to an entry, asking the tiebreaker when needed
    pub fn resolve_item(&mut self, item: &VocabularyItem<'_>) -> Result<Option<&'a DictionaryEntry>, ResolveError> {
        let primary = self.preprocessor.process(item.surface);
        let secondary = item.reading.map(|r| self.preprocessor.process(r));

        let resolved = match self.resolver.resolve(&primary, secondary.as_deref()) {
            Resolution::Resolved(idx) => Some(idx),
            Resolution::Unresolved => {
                tracing::debug!(surface = item.surface, level = %item.level, "No dictionary match");
                None
            }
            Resolution::NeedsDecision(candidates) => {
                self.stats.prompted += 1;
                self.decide(item.surface, &candidates)?
            }
        };

        let Some(idx) = resolved else {
            self.stats.unresolved += 1;
            return Ok(None);
        };

        let entry = self
            .resolver
            .index()
            .entry(idx)
            .ok_or(ResolveError::UnknownEntry(idx))?;
        tracing::debug!(surface = item.surface, entry = idx, "Resolved");
        self.stats.resolved += 1;

        Ok(Some(entry))
    }

    fn decide(&mut self, query: &str, candidates: &[EntryIndex]) -> Result<Option<EntryIndex>, ResolveError> {
        let index = self.resolver.index();
        let prompt = Prompt {
            query,
            candidates: candidates
                .iter()
                .filter_map(|&idx| {
                    index.entry(idx).map(|entry| Candidate {
                        index: idx,
                        entry,
                        summary: self.formatter.summary(entry),
                    })
                })
                .collect(),
        };

        match self.tiebreaker.choose(&prompt) {
            Ok(position) => prompt
                .candidates
                .get(position)
                .map(|c| Some(c.index))
                .ok_or(ResolveError::ChoiceOutOfRange {
                    position,
                    count: prompt.candidates.len(),
                }),
            Err(TiebreakError::MalformedInput(input)) => {
                tracing::warn!(query, input = %input, "Selection is not a number, skipping word");
                self.stats.declined += 1;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolve a corpus with the default narrowing policy and preprocessing
pub fn resolve_corpus<T: Tiebreaker>(
    corpus: &Corpus,
    index: &DictionaryIndex,
    formatter: &dyn GlossFormatter,
    tiebreaker: T,
) -> Result<Decks, ResolveError> {
    VocabularyAggregator::new(index, formatter, tiebreaker).resolve_corpus(corpus)
}
