use std::io::{BufRead, Write};

use anyhow::Context;
use tango_config::dictionary::DictionaryConfig;
use tango_core::preprocess::{DefaultPreprocessor, NfkcPreprocessor, Preprocessor};
use tango_core::{ConsoleTiebreaker, DictionaryIndex, VocabularyAggregator};
use tango_lang_japanese::JMdictGlossFormatter;
use tango_types::{Corpus, Decks};

/// Resolve the whole corpus, asking the operator on `input`/`output` when a
/// word stays ambiguous. Blocks until every word is settled.
pub fn resolve_decks<R: BufRead, W: Write>(
    corpus: &Corpus,
    index: &DictionaryIndex,
    config: &DictionaryConfig,
    input: R,
    output: W,
) -> anyhow::Result<Decks> {
    let formatter = JMdictGlossFormatter;
    let preprocessor: Box<dyn Preprocessor> = if config.normalize_queries {
        Box::new(NfkcPreprocessor)
    } else {
        Box::new(DefaultPreprocessor)
    };

    let mut aggregator = VocabularyAggregator::new(index, &formatter, ConsoleTiebreaker::new(input, output))
        .narrowing(config.narrowing)
        .preprocessor(preprocessor);

    let decks = aggregator
        .resolve_corpus(corpus)
        .context("Resolution aborted")?;

    let stats = aggregator.stats();
    if stats.declined > 0 {
        tracing::warn!("{} ambiguous words were skipped without a choice", stats.declined);
    }

    Ok(decks)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tango_lang_japanese::parse_entries;
    use tango_types::{Article, JlptLevel, WordOccurrence};

    use super::*;

    const DICTIONARY: &str = r#"[
        {"ent_seq": "1", "k_ele": [{"keb": "進行"}, {"keb": "進行する"}], "r_ele": {"reb": "しんこう"},
         "sense": {"pos": ["n;", "vs;"], "gloss": ["advance", "progress"]}},
        {"ent_seq": "2", "k_ele": [{"keb": "進行"}, {"keb": "後退"}], "r_ele": {"reb": "しんこう"},
         "sense": {"pos": "n;", "gloss": "forward movement"}},
        {"ent_seq": "3", "r_ele": {"reb": "ニュース"}, "sense": {"pos": "n;", "gloss": "news"}}
    ]"#;

    fn corpus() -> Corpus {
        Corpus {
            articles: vec![Article {
                url: "https://news/1".to_string(),
                vocabulary: [(
                    JlptLevel::N2,
                    vec![
                        WordOccurrence::new("進行", Some("しんこう")),
                        WordOccurrence::new("ﾆｭｰｽ", None),
                        WordOccurrence::new("東京", Some("とうきょう")),
                    ],
                )]
                .into_iter()
                .collect(),
            }],
        }
    }

    #[test]
    fn test_resolves_with_console_answers() {
        let index = DictionaryIndex::new(parse_entries(DICTIONARY).unwrap());
        let mut output = Vec::new();

        let decks = resolve_decks(
            &corpus(),
            &index,
            &DictionaryConfig::default(),
            Cursor::new("2\n"),
            &mut output,
        )
        .unwrap();

        let deck = decks.deck(JlptLevel::N2);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].term, "進行");
        assert_eq!(deck[0].definition, "<b>noun (普通名詞):|</b>1. forward movement");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("進行?:"));
        assert!(shown.contains("進行, 後退"));
    }

    #[test]
    fn test_normalized_queries_find_halfwidth_kana() {
        let index = DictionaryIndex::new(parse_entries(DICTIONARY).unwrap());
        let config = DictionaryConfig {
            normalize_queries: true,
            ..DictionaryConfig::default()
        };

        let decks = resolve_decks(&corpus(), &index, &config, Cursor::new("1\n"), Vec::new()).unwrap();

        let terms: Vec<&str> = decks.deck(JlptLevel::N2).iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["進行", "ﾆｭｰｽ"]);
    }

    #[test]
    fn test_closed_input_aborts() {
        let index = DictionaryIndex::new(parse_entries(DICTIONARY).unwrap());

        let result = resolve_decks(&corpus(), &index, &DictionaryConfig::default(), Cursor::new(""), Vec::new());

        assert!(result.is_err());
    }
}
