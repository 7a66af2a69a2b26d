use std::collections::BTreeMap;
use std::io::Cursor;

use tango_types::{Article, Corpus, FlashcardRecord, JlptLevel, WordOccurrence};

use super::{PlainFormatter, ScriptedTiebreaker, entry};
use crate::aggregate::{ResolutionStats, VocabularyAggregator, resolve_corpus};
use crate::error::ResolveError;
use crate::index::DictionaryIndex;
use crate::preprocess::NfkcPreprocessor;
use crate::tiebreak::{ConsoleTiebreaker, TiebreakError};

fn dictionary() -> DictionaryIndex {
    DictionaryIndex::new(vec![
        entry(&["進行", "進行する"], &["しんこう"], "advance"),
        entry(&["進行", "後退"], &["しんこう"], "progress"),
        entry(&["政府"], &["せいふ"], "government"),
        entry(&["経済"], &["けいざい"], "economy"),
        entry(&[], &["ニュース"], "news"),
    ])
}

fn article(url: &str, words: &[(JlptLevel, &str, Option<&str>)]) -> Article {
    let mut vocabulary: BTreeMap<JlptLevel, Vec<WordOccurrence>> = BTreeMap::new();
    for (level, surface, reading) in words {
        vocabulary
            .entry(*level)
            .or_default()
            .push(WordOccurrence::new(*surface, *reading));
    }
    Article {
        url: url.to_string(),
        vocabulary,
    }
}

fn record(term: &str, reading: Option<&str>, definition: &str, source: &str) -> FlashcardRecord {
    FlashcardRecord {
        term: term.to_string(),
        reading: reading.map(str::to_string),
        definition: definition.to_string(),
        source: source.to_string(),
    }
}

#[test]
fn test_records_keep_source_order() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article(
            "https://news/1",
            &[
                (JlptLevel::N2, "政府", Some("せいふ")),
                (JlptLevel::N2, "経済", None),
                (JlptLevel::N2, "ニュース", None),
            ],
        )],
    };

    let decks = resolve_corpus(&corpus, &index, &PlainFormatter, ScriptedTiebreaker::default()).unwrap();

    assert_eq!(
        decks.deck(JlptLevel::N2),
        &[
            record("政府", Some("せいふ"), "<b>n:|</b>1. government", "https://news/1"),
            record("経済", None, "<b>n:|</b>1. economy", "https://news/1"),
            record("ニュース", None, "<b>n:|</b>1. news", "https://news/1"),
        ]
    );
    assert_eq!(decks.total(), 3);
}

#[test]
fn test_unresolved_items_are_dropped() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article(
            "https://news/1",
            &[
                (JlptLevel::N1, "岸田", Some("きしだ")),
                (JlptLevel::N1, "政府", Some("せいふ")),
            ],
        )],
    };
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, ScriptedTiebreaker::default());

    let decks = aggregator.resolve_corpus(&corpus).unwrap();

    assert_eq!(decks.deck(JlptLevel::N1).len(), 1);
    assert_eq!(decks.deck(JlptLevel::N1)[0].term, "政府");
    assert_eq!(
        aggregator.stats(),
        ResolutionStats {
            resolved: 1,
            unresolved: 1,
            prompted: 0,
            declined: 0,
        }
    );
}

#[test]
fn test_levels_and_articles_are_partitioned() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![
            article(
                "https://news/1",
                &[(JlptLevel::N3, "経済", None), (JlptLevel::N1, "政府", None)],
            ),
            article("https://news/2", &[(JlptLevel::N3, "ニュース", None)]),
        ],
    };

    let decks = resolve_corpus(&corpus, &index, &PlainFormatter, ScriptedTiebreaker::default()).unwrap();

    let n3: Vec<(&str, &str)> = decks
        .deck(JlptLevel::N3)
        .iter()
        .map(|r| (r.term.as_str(), r.source.as_str()))
        .collect();
    assert_eq!(n3, vec![("経済", "https://news/1"), ("ニュース", "https://news/2")]);
    assert_eq!(decks.deck(JlptLevel::N1).len(), 1);
    assert!(decks.deck(JlptLevel::N5).is_empty());
}

#[test]
fn test_ambiguous_item_uses_operator_choice() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article("https://news/1", &[(JlptLevel::N2, "進行", Some("XYZ"))])],
    };
    let tiebreaker = ScriptedTiebreaker::answering([Ok(1)]);
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, tiebreaker);

    let decks = aggregator.resolve_corpus(&corpus).unwrap();

    assert_eq!(decks.deck(JlptLevel::N2)[0].definition, "<b>n:|</b>1. progress");
    // Raw reading from the article, not the dictionary's
    assert_eq!(decks.deck(JlptLevel::N2)[0].reading.as_deref(), Some("XYZ"));
    assert_eq!(aggregator.stats().prompted, 1);

    let tiebreaker = aggregator.into_tiebreaker();
    assert_eq!(tiebreaker.asked, vec![("進行".to_string(), vec![0, 1])]);
}

#[test]
fn test_narrowed_item_never_prompts() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article("https://news/1", &[(JlptLevel::N2, "進行", Some("進行する"))])],
    };
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, ScriptedTiebreaker::default());

    let decks = aggregator.resolve_corpus(&corpus).unwrap();

    assert_eq!(decks.deck(JlptLevel::N2)[0].definition, "<b>n:|</b>1. advance");
    assert!(aggregator.into_tiebreaker().asked.is_empty());
}

#[test]
fn test_malformed_answer_skips_only_that_item() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article(
            "https://news/1",
            &[
                (JlptLevel::N2, "進行", None),
                (JlptLevel::N2, "政府", None),
                (JlptLevel::N2, "進行", None),
            ],
        )],
    };
    let tiebreaker = ScriptedTiebreaker::answering([
        Err(TiebreakError::MalformedInput("abc".to_string())),
        Ok(0),
    ]);
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, tiebreaker);

    let decks = aggregator.resolve_corpus(&corpus).unwrap();

    let terms: Vec<&str> = decks.deck(JlptLevel::N2).iter().map(|r| r.term.as_str()).collect();
    assert_eq!(terms, vec!["政府", "進行"]);
    assert_eq!(aggregator.stats().declined, 1);
    assert_eq!(aggregator.stats().unresolved, 1);
}

#[test]
fn test_closed_input_aborts_run() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article("https://news/1", &[(JlptLevel::N2, "進行", None)])],
    };

    let result = resolve_corpus(&corpus, &index, &PlainFormatter, ScriptedTiebreaker::default());

    assert!(matches!(
        result,
        Err(ResolveError::Tiebreak(TiebreakError::InputClosed))
    ));
}

#[test]
fn test_out_of_range_position_from_tiebreaker() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![article("https://news/1", &[(JlptLevel::N2, "進行", None)])],
    };

    let result = resolve_corpus(
        &corpus,
        &index,
        &PlainFormatter,
        ScriptedTiebreaker::answering([Ok(7)]),
    );

    assert!(matches!(
        result,
        Err(ResolveError::ChoiceOutOfRange { position: 7, count: 2 })
    ));
}

#[test]
fn test_console_answers_are_reproducible() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![
            article(
                "https://news/1",
                &[
                    (JlptLevel::N1, "進行", None),
                    (JlptLevel::N1, "経済", None),
                ],
            ),
            article("https://news/2", &[(JlptLevel::N4, "進行", Some("XYZ"))]),
        ],
    };

    let run = || {
        let console = ConsoleTiebreaker::new(Cursor::new("2\n3\n1\n"), Vec::new());
        let decks = resolve_corpus(&corpus, &index, &PlainFormatter, console).unwrap();
        serde_json::to_string(&decks).unwrap()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.contains("progress"));
    assert!(first.contains("advance"));
}

#[test]
fn test_nfkc_preprocessing_matches_but_records_raw_text() {
    let index = DictionaryIndex::new(vec![entry(&[], &["カタカナ"], "katakana")]);
    let corpus = Corpus {
        articles: vec![article("https://news/1", &[(JlptLevel::N5, "ｶﾀｶﾅ", None)])],
    };

    let plain = resolve_corpus(&corpus, &index, &PlainFormatter, ScriptedTiebreaker::default()).unwrap();
    assert!(plain.deck(JlptLevel::N5).is_empty());

    let decks = VocabularyAggregator::new(&index, &PlainFormatter, ScriptedTiebreaker::default())
        .preprocessor(Box::new(NfkcPreprocessor))
        .resolve_corpus(&corpus)
        .unwrap();
    assert_eq!(decks.deck(JlptLevel::N5)[0].term, "ｶﾀｶﾅ");
}

#[test]
fn test_stats_match_emitted_records() {
    let index = dictionary();
    let corpus = Corpus {
        articles: vec![
            article(
                "https://news/1",
                &[
                    (JlptLevel::N2, "進行", None),
                    (JlptLevel::N2, "岸田", None),
                    (JlptLevel::N3, "経済", None),
                ],
            ),
            article("https://news/2", &[(JlptLevel::N2, "進行", Some("後退"))]),
        ],
    };
    let tiebreaker = ScriptedTiebreaker::answering([Err(TiebreakError::MalformedInput("x".to_string()))]);
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, tiebreaker);

    let decks = aggregator.resolve_corpus(&corpus).unwrap();
    let stats = aggregator.stats();

    assert_eq!(stats.resolved, decks.total());
    assert_eq!(stats.resolved + stats.unresolved, corpus.item_count());
    assert_eq!(stats.resolved, 2);
}

#[test]
fn test_resolve_item_returns_entry() {
    let index = dictionary();
    let mut aggregator = VocabularyAggregator::new(&index, &PlainFormatter, ScriptedTiebreaker::default());
    let item = tango_types::VocabularyItem {
        surface: "政府",
        reading: Some("せいふ"),
        level: JlptLevel::N1,
        source: "https://news/1",
    };

    let entry = aggregator.resolve_item(&item).unwrap().unwrap();

    assert_eq!(entry.written_forms, vec!["政府"]);
    assert_eq!(aggregator.stats().resolved, 1);
}
