//! Wallpaper rendering: plan the text, rasterize it, persist the PNG.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::compounds::CompoundCache;
use crate::dictionary::KanjiDictionary;
use crate::error::{Error, Result};
use crate::layer::text::rasterize;
use crate::layer::{
    CompoundsLayer, GlyphMetrics, KanjiGlyphLayer, LayerEffect, ReadingsLayer, RenderContext,
    TextPlan, Theme, WallpaperFont,
};
use crate::layout::LayoutConfig;

// ============================================================================
// Wallpaper
// ============================================================================

/// A rendered wallpaper for one kanji.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallpaper {
    pub kanji: String,
    pub image: RgbImage,
}

impl Wallpaper {
    /// The output file name, `wallpaper_<kanji>.png`.
    pub fn file_name(&self) -> String {
        file_name_for(&self.kanji)
    }

    /// Encodes the image as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Writes the PNG into `dir` and returns its path.
    ///
    /// The write is not atomic; an interrupted write may leave a partial file.
    pub fn persist(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        let png = self.to_png()?;
        std::fs::write(&path, png)?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }
}

/// The output file name for `kanji`.
pub fn file_name_for(kanji: &str) -> String {
    format!("wallpaper_{kanji}.png")
}

/// Trims `text` and checks that it is exactly one character.
pub fn single_kanji(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Ok(trimmed),
        _ => Err(Error::InvalidKanji(text.to_string())),
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Builds the text plan for one kanji.
///
/// Runs are produced in drawing order: the kanji, its kun and on readings,
/// then up to `max_compounds` compound lines. Fails with
/// [`Error::KanjiNotFound`] if the dictionary has no entry; a kanji without
/// compounds simply gets no compound lines.
pub fn plan_wallpaper(
    kanji: &str,
    layout: &LayoutConfig,
    max_compounds: u32,
    metrics: &dyn GlyphMetrics,
    dictionary: &dyn KanjiDictionary,
    compounds: &CompoundCache,
) -> Result<TextPlan> {
    let mut ctx = RenderContext::new(kanji, layout, metrics);

    KanjiGlyphLayer.place(&mut ctx);

    let entry = dictionary
        .lookup(kanji)
        .ok_or_else(|| Error::KanjiNotFound(kanji.to_string()))?;
    log::debug!(
        "{kanji}: {} kun, {} on readings",
        entry.kun_readings.len(),
        entry.on_readings.len()
    );
    ReadingsLayer::new(&entry).place(&mut ctx);

    let table = compounds.ensure_loaded()?;
    CompoundsLayer::new(table.get(kanji), max_compounds).place(&mut ctx);

    Ok(ctx.into_plan())
}

// ============================================================================
// WallpaperRenderer
// ============================================================================

/// Renders wallpapers from a font, a dictionary, and a compound cache.
///
/// The renderer holds no per-wallpaper state: rendering the same kanji with
/// the same layout twice yields identical images.
///
/// # Example
///
/// ```no_run
/// use kanji_wallpapers::{
///     CompoundCache, Kanjidic, Preset, Theme, WallpaperFont, WallpaperRenderer,
/// };
///
/// let font = WallpaperFont::load("fonts/GenEiLateGo.otf")?;
/// let dictionary = Kanjidic::load("kanjidic")?;
/// let compounds = CompoundCache::from_path("compounds.json");
/// let renderer = WallpaperRenderer::new(&font, &dictionary, &compounds, Theme::default());
///
/// let wallpaper = renderer.render("水", &Preset::Phone720x1280.layout(), 8)?;
/// wallpaper.persist(".")?;
/// # Ok::<(), kanji_wallpapers::Error>(())
/// ```
pub struct WallpaperRenderer<'a> {
    font: &'a WallpaperFont,
    dictionary: &'a dyn KanjiDictionary,
    compounds: &'a CompoundCache,
    theme: Theme,
}

impl<'a> WallpaperRenderer<'a> {
    pub fn new(
        font: &'a WallpaperFont,
        dictionary: &'a dyn KanjiDictionary,
        compounds: &'a CompoundCache,
        theme: Theme,
    ) -> Self {
        Self {
            font,
            dictionary,
            compounds,
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Builds the text plan without rasterizing it.
    pub fn plan(&self, kanji: &str, layout: &LayoutConfig, max_compounds: u32) -> Result<TextPlan> {
        plan_wallpaper(
            kanji,
            layout,
            max_compounds,
            self.font,
            self.dictionary,
            self.compounds,
        )
    }

    /// Renders the wallpaper for one kanji.
    pub fn render(&self, kanji: &str, layout: &LayoutConfig, max_compounds: u32) -> Result<Wallpaper> {
        let kanji = single_kanji(kanji)?;
        let plan = self.plan(kanji, layout, max_compounds)?;
        Ok(Wallpaper {
            kanji: kanji.to_string(),
            image: rasterize(&plan, self.font, &self.theme),
        })
    }

    /// Renders the wallpaper and writes it into `dir`.
    pub fn render_to(
        &self,
        kanji: &str,
        layout: &LayoutConfig,
        max_compounds: u32,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.render(kanji, layout, max_compounds)?.persist(dir)
    }
}

// ============================================================================
// Tests
// ============================================================================
