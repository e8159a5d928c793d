//! kanji-wallpapers: study wallpapers for the kanji of a flashcard deck
//!
//! Each wallpaper shows one kanji in a large font, its kun and on readings,
//! and a list of common compounds, laid out for a chosen screen resolution.
//!
//! # Example
//!
//! ```
//! use kanji_wallpapers::{
//!     plan_wallpaper, CompoundCache, CompoundEntry, CompoundTable, GlyphMetrics, KanjiEntry,
//!     Preset, TextRole,
//! };
//! use std::collections::HashMap;
//!
//! // Metrics for a font whose ink starts exactly at the origin.
//! struct Flush;
//! impl GlyphMetrics for Flush {
//!     fn left_bearing(&self, _text: &str, _size: u32) -> i32 {
//!         0
//!     }
//! }
//!
//! let mut dictionary = HashMap::new();
//! dictionary.insert("水".to_string(), KanjiEntry::new(["みず"], ["スイ"]));
//!
//! let compounds = CompoundCache::preloaded(CompoundTable::from_iter([(
//!     "水",
//!     CompoundEntry::new("水道", "すいどう", "4", "water supply"),
//! )]));
//!
//! let layout = Preset::Phone720x1280.layout();
//! let plan = plan_wallpaper("水", &layout, 8, &Flush, &dictionary, &compounds)?;
//!
//! let line = plan.compound_runs().next().unwrap();
//! assert_eq!(line.text, "水道 (すいどう) : (N4) water supply");
//! assert_eq!(plan.runs_with(TextRole::OnReadings).next().unwrap().text, "スイ");
//! # Ok::<(), kanji_wallpapers::Error>(())
//! ```
//!
//! # Batches
//!
//! [`generate`] walks the cards of a [`CardCollection`] and writes one PNG
//! per kanji; [`NotesFile`] provides a collection read from a JSON export.

mod batch;
mod compounds;
mod dictionary;
mod error;
mod layer;
mod layout;
mod renderer;
mod settings;

pub use batch::{
    BatchReport, CardCollection, CardId, ExportedCard, Failure, LogProgress, NotesFile, Progress,
    generate,
};
pub use compounds::{CompoundCache, CompoundEntry, CompoundTable};
pub use dictionary::{KanjiDictionary, KanjiEntry, Kanjidic};
pub use error::{Error, Result};
pub use layer::text::{rasterize, to_hex};
pub use layer::{
    CompoundsLayer, DEFAULT_MAX_COMPOUNDS, GlyphMetrics, KUN_READINGS_MAX_CHARS, KanjiGlyphLayer,
    LayerEffect, READING_SEPARATOR, ReadingsLayer, RenderContext, TextPlan, TextRole, TextRun,
    Theme, WallpaperFont,
};
pub use layout::{
    CancelPrompt, CustomLayoutPrompt, FixedPrompt, LayoutConfig, MAX_LAYOUT_VALUE,
    MIN_LAYOUT_VALUE, Preset, ResolutionChoice, resolve,
};
pub use renderer::{Wallpaper, WallpaperRenderer, file_name_for, plan_wallpaper, single_kanji};
pub use settings::{
    DEFAULT_CARD_TYPE, DEFAULT_FIELD, GenerationSettings, MAX_COMPOUNDS_LIMIT, OUTPUT_DIR_NAME,
    ThemeSettings, default_output_dir,
};
