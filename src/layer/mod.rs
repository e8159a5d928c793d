//! Text layers of a wallpaper.
//!
//! A wallpaper is built in two passes. First each layer places its text runs
//! into a [`RenderContext`], using [`GlyphMetrics`] to correct for glyph
//! bearing. The resulting [`TextPlan`] is then rasterized in one go by
//! [`text::rasterize`]. Keeping placement separate from pixels lets the anchor
//! arithmetic be checked without a font file.
//!
//! # Layer order
//!
//! ```text
//! ┌──────────────┐
//! │ KanjiGlyph   │ ◄── large glyph, bearing-corrected
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ Readings     │ ◄── kun (truncated) and on readings
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ Compounds    │ ◄── one line per entry, bearing-corrected
//! └──────────────┘
//! ```

pub mod compounds;
pub mod glyph;
pub mod readings;
pub mod text;

pub use compounds::{CompoundsLayer, DEFAULT_MAX_COMPOUNDS};
pub use glyph::KanjiGlyphLayer;
pub use readings::{KUN_READINGS_MAX_CHARS, READING_SEPARATOR, ReadingsLayer};
pub use text::{GlyphMetrics, Theme, WallpaperFont};

use crate::layout::LayoutConfig;

// ============================================================================
// Text runs
// ============================================================================

/// Which part of the wallpaper a text run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    Kanji,
    KunReadings,
    OnReadings,
    /// A compound line; the value is its 1-based line number.
    Compound(u32),
}

/// A single string drawn at a fixed origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub role: TextRole,
    pub text: String,
    /// Font size in pixels per em.
    pub size: u32,
    /// Nominal origin; ink starts at `x + left bearing`.
    pub x: i32,
    /// Top of the line box.
    pub y: i32,
}

/// The complete, ordered set of runs for one wallpaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPlan {
    pub width: u32,
    pub height: u32,
    pub runs: Vec<TextRun>,
}

impl TextPlan {
    /// Returns the runs with the given role.
    pub fn runs_with(&self, role: TextRole) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |run| run.role == role)
    }

    /// Returns the compound runs in line order.
    pub fn compound_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.runs
            .iter()
            .filter(|run| matches!(run.role, TextRole::Compound(_)))
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// State shared by the layers while a plan is being built.
pub struct RenderContext<'a> {
    pub kanji: &'a str,
    pub layout: &'a LayoutConfig,
    pub metrics: &'a dyn GlyphMetrics,
    runs: Vec<TextRun>,
}

impl<'a> RenderContext<'a> {
    pub fn new(kanji: &'a str, layout: &'a LayoutConfig, metrics: &'a dyn GlyphMetrics) -> Self {
        Self {
            kanji,
            layout,
            metrics,
            runs: Vec::new(),
        }
    }

    /// Adds a run at its nominal origin.
    pub fn push(&mut self, role: TextRole, text: impl Into<String>, size: u32, x: i32, y: i32) {
        self.runs.push(TextRun {
            role,
            text: text.into(),
            size,
            x,
            y,
        });
    }

    /// Adds a run whose visible left edge should sit at `x`.
    ///
    /// The origin is shifted left by the text's left-side bearing.
    pub fn push_aligned(&mut self, role: TextRole, text: impl Into<String>, size: u32, x: i32, y: i32) {
        let text = text.into();
        let offset = self.metrics.left_bearing(&text, size);
        self.push(role, text, size, x - offset, y);
    }

    /// Finishes the plan.
    pub fn into_plan(self) -> TextPlan {
        TextPlan {
            width: self.layout.width,
            height: self.layout.height,
            runs: self.runs,
        }
    }
}

// ============================================================================
// Layer trait
// ============================================================================

/// A block of text that knows where it goes on the canvas.
pub trait LayerEffect {
    /// Places this layer's runs into `ctx`.
    fn place(&self, ctx: &mut RenderContext<'_>);
}

/// Converts a layout coordinate to a signed canvas coordinate.
pub(crate) fn coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// ============================================================================
// Tests
// ============================================================================
