use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tango_anki::{AnkiConnectClient, CardTemplate};
use tango_config::Config;
use tango_core::NarrowingPolicy;
use tango_lang_japanese::JMdictLoader;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod io;
mod resolve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Narrowing {
    /// Keep candidates whose written forms contain the reading
    WrittenForms,
    /// Also accept candidates whose readings contain it
    WrittenFormsOrReadings,
}

impl From<Narrowing> for NarrowingPolicy {
    fn from(value: Narrowing) -> Self {
        match value {
            Narrowing::WrittenForms => NarrowingPolicy::WrittenForms,
            Narrowing::WrittenFormsOrReadings => NarrowingPolicy::WrittenFormsOrReadings,
        }
    }
}

/// Turn scraped JLPT news vocabulary into per-level flashcard decks
#[derive(Debug, Parser)]
#[command(name = "tango", version)]
struct Cli {
    /// Vocabulary corpus JSON produced by the article scraper
    corpus: PathBuf,

    /// JSON config file
    #[arg(short, long, env = "TANGO_CONFIG")]
    config: Option<PathBuf>,

    /// JMdict JSON file
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Where to write the decks
    #[arg(short, long)]
    output: Option<String>,

    /// Push the decks to AnkiConnect after writing them
    #[arg(long)]
    anki: bool,

    /// NFKC-normalize words before lookup
    #[arg(long)]
    normalize: bool,

    #[arg(long, value_enum)]
    narrowing: Option<Narrowing>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.dictionary {
            config.dictionary.path = path.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(narrowing) = self.narrowing {
            config.dictionary.narrowing = narrowing.into();
        }
        config.dictionary.normalize_queries |= self.normalize;
        config.anki.enabled |= self.anki;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tango=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = io::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    if let Err(e) = run(&cli.corpus, config).await {
        tracing::error!("{e:#}");
        return Err(e);
    }

    Ok(())
}

async fn run(corpus_path: &Path, config: Config) -> anyhow::Result<()> {
    let corpus = io::load_corpus(corpus_path)?;

    let dictionary_path = PathBuf::from(&config.dictionary.path);
    let index = tango_core::load_index(&JMdictLoader, &dictionary_path, &config.dictionary.additional_paths)
        .with_context(|| format!("Failed to load dictionary {}", dictionary_path.display()))?;
    let index = Arc::new(index);

    if !atty::is(atty::Stream::Stdin) {
        tracing::warn!("stdin is not a terminal, ambiguous words will be answered from piped input");
    }

    let dictionary = config.dictionary.clone();
    let decks = tokio::task::spawn_blocking({
        let index = Arc::clone(&index);
        move || {
            resolve::resolve_decks(
                &corpus,
                &index,
                &dictionary,
                std::io::stdin().lock(),
                std::io::stdout(),
            )
        }
    })
    .await
    .context("Resolution task panicked")??;

    io::write_decks(Path::new(&config.output), &decks)?;

    if config.anki.enabled {
        let client = AnkiConnectClient::new(config.anki.url.clone());
        let template = CardTemplate::default_japanese(config.anki.model.clone());
        let summary = tango_anki::export_decks(&client, &template, &config.anki.deck_prefix, &decks)
            .await
            .context("Anki export failed")?;
        tracing::info!(
            added = summary.added,
            failed = summary.failed,
            "Anki export finished"
        );
    }

    Ok(())
}
