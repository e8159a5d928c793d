//! Command-line front end: generate wallpapers for the cards of a deck.
//!
//! ```text
//! kanji-wallpapers --deck Kanji --notes notes.json --dictionary kanjidic \
//!     --compounds compounds.json --font GenEiLateGo.otf --resolution 1024x768
//! ```
//!
//! Set `RUST_LOG` to change verbosity (default `info`).

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use kanji_wallpapers::{
    CancelPrompt, CardCollection, CompoundCache, CustomLayoutPrompt, FixedPrompt, GenerationSettings,
    Kanjidic, LayoutConfig, LogProgress, NotesFile, ResolutionChoice, ThemeSettings,
    WallpaperFont, WallpaperRenderer, default_output_dir, generate, resolve,
};

#[derive(Debug, Parser)]
#[command(version, about = "Generate kanji study wallpapers from a flashcard deck")]
struct Args {
    /// Deck whose cards are used; required unless given by --settings.
    #[arg(long)]
    deck: Option<String>,

    /// JSON export of the collection's cards.
    #[arg(long)]
    notes: PathBuf,

    /// KANJIDIC file with readings.
    #[arg(long)]
    dictionary: PathBuf,

    /// JSON table of compounds per kanji.
    #[arg(long)]
    compounds: PathBuf,

    /// TrueType or OpenType font with Japanese coverage.
    #[arg(long)]
    font: PathBuf,

    /// Note field holding the kanji.
    #[arg(long)]
    field: Option<String>,

    /// Card filter appended to the deck search.
    #[arg(long)]
    card_type: Option<String>,

    /// A preset such as 720x1280, or "custom".
    #[arg(long)]
    resolution: Option<ResolutionChoice>,

    /// Layout JSON used when the resolution is custom.
    #[arg(long)]
    custom_layout: Option<PathBuf>,

    /// Compound lines per wallpaper (1-50).
    #[arg(long)]
    max_compounds: Option<u32>,

    /// Settings JSON; other flags override its values.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output directory [default: <data dir>/kanji_wallpapers].
    #[arg(long)]
    out: Option<PathBuf>,

    /// Background color as hex.
    #[arg(long)]
    background: Option<String>,

    /// Text color as hex.
    #[arg(long)]
    foreground: Option<String>,
}

impl Args {
    fn settings(&self) -> anyhow::Result<GenerationSettings> {
        let mut settings = match (&self.settings, &self.deck) {
            (Some(path), _) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GenerationSettings::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            (None, Some(deck)) => GenerationSettings::new(deck.clone()),
            (None, None) => bail!("either --deck or --settings is required"),
        };

        if let Some(deck) = &self.deck {
            settings.deck = deck.clone();
        }
        if let Some(field) = &self.field {
            settings = settings.with_field(field);
        }
        if let Some(card_type) = &self.card_type {
            settings = settings.with_card_type(card_type);
        }
        if let Some(resolution) = self.resolution {
            settings = settings.with_resolution(resolution);
        }
        if let Some(max) = self.max_compounds {
            settings = settings.with_max_compounds(max);
        }
        if self.background.is_some() || self.foreground.is_some() {
            let theme = ThemeSettings {
                background: self.background.clone().unwrap_or_else(|| settings.theme.background.clone()),
                foreground: self.foreground.clone().unwrap_or_else(|| settings.theme.foreground.clone()),
            };
            settings = settings.with_theme(theme);
        }

        settings.validate()?;
        Ok(settings)
    }

    fn custom_prompt(&self) -> anyhow::Result<Box<dyn CustomLayoutPrompt>> {
        let Some(path) = &self.custom_layout else {
            return Ok(Box::new(CancelPrompt));
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let layout = LayoutConfig::from_json(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        layout.validate()?;
        Ok(Box::new(FixedPrompt(layout)))
    }
}

/// Whether `deck` or one of its subdecks is among `decks`.
fn has_deck(decks: &[String], deck: &str) -> bool {
    let deck = deck.to_lowercase();
    let prefix = format!("{deck}::");
    decks.iter().any(|name| {
        let name = name.to_lowercase();
        name == deck || name.starts_with(&prefix)
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings()?;

    let mut prompt: Box<dyn CustomLayoutPrompt> = match settings.resolution {
        ResolutionChoice::Custom => args.custom_prompt()?,
        ResolutionChoice::Preset(_) => Box::new(CancelPrompt),
    };
    let Some(layout) = resolve(settings.resolution, prompt.as_mut()) else {
        log::info!("no custom layout given, nothing generated");
        return Ok(());
    };

    let font = WallpaperFont::load(&args.font)?;
    let dictionary = Kanjidic::load(&args.dictionary)?;
    let compounds = CompoundCache::from_path(&args.compounds);
    let notes = NotesFile::load(&args.notes)
        .with_context(|| format!("loading {}", args.notes.display()))?;
    let theme = settings.theme.to_theme()?;

    let decks = notes.decks();
    if !has_deck(&decks, &settings.deck) {
        bail!(
            "no deck named {:?}; available decks: {}",
            settings.deck,
            decks.join(", ")
        );
    }

    let renderer = WallpaperRenderer::new(&font, &dictionary, &compounds, theme);
    let out_dir = args.out.clone().unwrap_or_else(default_output_dir);

    let report = generate(
        &notes,
        &settings,
        &layout,
        &renderer,
        &out_dir,
        &mut LogProgress,
    )?;

    for failure in &report.failed {
        log::debug!("card {}: {}", failure.card, failure.error);
    }
    println!(
        "{} wallpapers written to {}",
        report.written.len(),
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_names_match_like_queries() {
        let decks = vec!["Kanji::N5".to_string(), "Vocab".to_string()];
        assert!(has_deck(&decks, "kanji"));
        assert!(has_deck(&decks, "Kanji::N5"));
        assert!(has_deck(&decks, "VOCAB"));
        assert!(!has_deck(&decks, "Kan"));
        assert!(!has_deck(&decks, "Grammar"));
    }

    #[test]
    fn blank_settings_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"deck": "Kanji", "field": " ", "cardType": ""}"#).unwrap();

        let args = Args::parse_from([
            "kanji-wallpapers",
            "--settings",
            path.to_str().unwrap(),
            "--notes",
            "notes.json",
            "--dictionary",
            "kanjidic",
            "--compounds",
            "compounds.json",
            "--font",
            "font.otf",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.field, "kanji");
        assert_eq!(settings.card_query(), "\"deck:Kanji\" is:learn");
    }
}
