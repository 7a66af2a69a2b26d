mod client;
mod template;

pub use client::{AnkiConnectClient, Note, NoteFields};
pub use template::CardTemplate;

use anyhow::Result;
use tango_types::{Decks, FlashcardRecord, JlptLevel};

/// Outcome of pushing decks to Anki
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub added: usize,
    pub failed: usize,
}

/// Deck name for a level, e.g. `Japanese::News::N2`
pub fn deck_name(prefix: &str, level: JlptLevel) -> String {
    format!("{prefix}::{level}")
}

/// Add a card to Anki using the provided client and template
pub async fn add_card(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    deck: &str,
    level: JlptLevel,
    record: &FlashcardRecord,
) -> Result<u64> {
    let front = template.format_front(record);
    let back = template.format_back(record);

    let note = Note {
        deck_name: deck,
        model_name: &template.model,
        fields: NoteFields {
            front: &front,
            back: &back,
        },
        tags: &["tango", level.as_str()],
    };

    client.add_note(&note).await
}

/// Push every non-empty deck to Anki.
///
/// A note Anki rejects (usually a duplicate) is logged and counted; failing to
/// create a deck aborts the export.
pub async fn export_decks(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    prefix: &str,
    decks: &Decks,
) -> Result<ExportSummary> {
    let version = client.check_connection().await?;
    tracing::info!("Connected to AnkiConnect (version {})", version);

    let mut summary = ExportSummary::default();

    for (level, records) in decks.iter() {
        if records.is_empty() {
            continue;
        }

        let deck = deck_name(prefix, level);
        client.create_deck(&deck).await?;

        for record in records {
            match add_card(client, template, &deck, level, record).await {
                Ok(note_id) => {
                    tracing::debug!("Added card to Anki: note_id={}", note_id);
                    summary.added += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to add '{}' to {}: {}", record.term, deck, e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!("Exported {} cards to {}", records.len(), deck);
    }

    Ok(summary)
}
