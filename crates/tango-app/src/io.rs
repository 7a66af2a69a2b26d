use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use tango_config::Config;
use tango_types::{Corpus, Decks};

/// Load config: defaults, then the JSON file if given, then environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    load_config_with_env(path, |key| env::var(key).ok())
}

fn load_config_with_env(path: Option<&Path>, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
    let mut config: Config = match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            let file = File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => {
            tracing::info!("No config file given, using defaults");
            Config::default()
        }
    };

    config.apply_env(var);
    Ok(config)
}

/// Load the scraped vocabulary
pub fn load_corpus(path: &Path) -> anyhow::Result<Corpus> {
    let file = File::open(path).with_context(|| format!("Failed to open corpus {}", path.display()))?;
    let corpus: Corpus = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid corpus {}", path.display()))?;
    tracing::info!(
        "Loaded {} words from {} articles",
        corpus.item_count(),
        corpus.articles.len()
    );
    Ok(corpus)
}

/// Write decks as pretty JSON, creating parent directories
pub fn write_decks(path: &Path, decks: &Decks) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(decks)?)
        .with_context(|| format!("Failed to write decks to {}", path.display()))?;
    tracing::info!("Wrote {} cards to {}", decks.total(), path.display());
    Ok(())
}
