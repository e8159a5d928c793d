//! Batch generation over the cards of a deck.
//!
//! The flashcard collection and the progress indicator belong to the host
//! application; they are reached through [`CardCollection`] and [`Progress`].
//! [`NotesFile`] is a collection backed by a JSON export, used by the CLI.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use crate::renderer::{WallpaperRenderer, single_kanji};
use crate::settings::GenerationSettings;

/// Identifier of a card in the host collection.
pub type CardId = i64;

// ============================================================================
// Host traits
// ============================================================================

/// Read access to the host's cards and notes.
pub trait CardCollection {
    /// Returns the cards matching `query`, in the host's order.
    fn find_cards(&self, query: &str) -> Result<Vec<CardId>>;

    /// Returns the named field of the card's note, if it exists.
    fn note_field(&self, card: CardId, field: &str) -> Option<String>;

    /// Returns the names of all decks, sorted.
    fn decks(&self) -> Vec<String>;
}

/// Coarse progress signals around a batch.
pub trait Progress {
    fn start(&mut self);
    fn finish(&mut self);
}

/// Progress reported through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn start(&mut self) {
        log::info!("generating wallpapers");
    }

    fn finish(&mut self) {
        log::info!("wallpaper generation finished");
    }
}

// ============================================================================
// Report
// ============================================================================

/// A card that produced no wallpaper.
#[derive(Debug)]
pub struct Failure {
    pub card: CardId,
    /// The kanji, if one was read from the note.
    pub kanji: Option<String>,
    pub error: Error,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in card order.
    pub written: Vec<PathBuf>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Renders one wallpaper per matching card and writes them into `out_dir`.
///
/// Cards are processed in the order returned by the collection. A card whose
/// field is missing or not a single character, a kanji missing from the
/// dictionary, or a failed write is recorded in the report and the batch moves
/// on; files already written are left in place. Only a failed card query or an
/// unusable output directory aborts the whole batch.
///
/// `progress` is started before the query and always finished.
pub fn generate(
    collection: &dyn CardCollection,
    settings: &GenerationSettings,
    layout: &LayoutConfig,
    renderer: &WallpaperRenderer<'_>,
    out_dir: &Path,
    progress: &mut dyn Progress,
) -> Result<BatchReport> {
    progress.start();
    let result = run(collection, settings, layout, renderer, out_dir);
    progress.finish();
    result
}

fn run(
    collection: &dyn CardCollection,
    settings: &GenerationSettings,
    layout: &LayoutConfig,
    renderer: &WallpaperRenderer<'_>,
    out_dir: &Path,
) -> Result<BatchReport> {
    std::fs::create_dir_all(out_dir)?;

    let query = settings.card_query();
    let cards = collection.find_cards(&query)?;
    log::info!("{} cards match {query}", cards.len());

    let mut report = BatchReport::default();

    for card in cards {
        let Some(value) = collection.note_field(card, &settings.field) else {
            log::warn!("card {card}: no field named {:?}", settings.field);
            report.failed.push(Failure {
                card,
                kanji: None,
                error: Error::MissingField(settings.field.clone()),
            });
            continue;
        };

        let outcome = single_kanji(&value).and_then(|kanji| {
            renderer.render_to(kanji, layout, settings.max_compounds, out_dir)
        });

        match outcome {
            Ok(path) => report.written.push(path),
            Err(error) => {
                log::warn!("card {card}: skipped {:?}: {error}", value.trim());
                report.failed.push(Failure {
                    card,
                    kanji: Some(value.trim().to_string()),
                    error,
                });
            }
        }
    }

    log::info!(
        "{} wallpapers written, {} skipped",
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}

// ============================================================================
// NotesFile
// ============================================================================

/// One exported card with its note fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedCard {
    pub id: CardId,
    pub deck: String,
    /// Scheduling state such as `new`, `learn`, or `review`.
    #[serde(default)]
    pub state: String,
    pub fields: HashMap<String, String>,
}

/// A card collection read from a JSON export.
///
/// ```json
/// { "cards": [ { "id": 1, "deck": "Kanji", "state": "learn", "fields": { "Kanji": "水" } } ] }
/// ```
///
/// Queries may combine `deck:<name>` (quoted or bare; also matches subdecks)
/// and `is:<state>` terms. Other search syntax is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesFile {
    pub cards: Vec<ExportedCard>,
}

impl NotesFile {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}

enum Term {
    Deck(String),
    State(String),
}

impl Term {
    fn matches(&self, card: &ExportedCard) -> bool {
        match self {
            Term::Deck(name) => {
                let deck = card.deck.to_lowercase();
                deck == *name || deck.starts_with(&format!("{name}::"))
            }
            Term::State(state) => card.state.to_lowercase() == *state,
        }
    }
}

fn parse_query(query: &str) -> Result<Vec<Term>> {
    split_terms(query)
        .into_iter()
        .map(|term| {
            let lower = term.to_lowercase();
            if let Some(name) = lower.strip_prefix("deck:") {
                Ok(Term::Deck(name.to_string()))
            } else if let Some(state) = lower.strip_prefix("is:") {
                Ok(Term::State(state.to_string()))
            } else {
                Err(Error::UnsupportedQuery(term))
            }
        })
        .collect()
}

/// Splits on whitespace outside double quotes and drops the quotes.
fn split_terms(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in query.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}

impl CardCollection for NotesFile {
    fn find_cards(&self, query: &str) -> Result<Vec<CardId>> {
        let terms = parse_query(query)?;
        Ok(self
            .cards
            .iter()
            .filter(|card| terms.iter().all(|term| term.matches(card)))
            .map(|card| card.id)
            .collect())
    }

    fn note_field(&self, card: CardId, field: &str) -> Option<String> {
        let field = field.to_lowercase();
        self.cards
            .iter()
            .find(|c| c.id == card)?
            .fields
            .iter()
            .find(|(name, _)| name.to_lowercase() == field)
            .map(|(_, value)| value.clone())
    }

    fn decks(&self) -> Vec<String> {
        let decks: BTreeSet<&str> = self.cards.iter().map(|card| card.deck.as_str()).collect();
        decks.into_iter().map(str::to_string).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
