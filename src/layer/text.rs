//! Font metrics and text rasterization using ab_glyph.
//!
//! Sizes are in pixels per em, the convention of FreeType-based toolkits, so
//! a 200px kanji is 200px wide for a full-width glyph. The line box top sits
//! at the run's `y`; the baseline is one ascent below it.

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, OutlinedGlyph, PxScale, ScaleFont, point};
use image::{GenericImageView, Rgb, RgbImage};
use imageproc::drawing::Canvas;
use imageproc::pixelops::interpolate;
use palette::Srgb;

use super::{TextPlan, TextRun};
use crate::error::{Error, Result};

// ============================================================================
// GlyphMetrics
// ============================================================================

/// Measures where the ink of a string starts relative to its origin.
pub trait GlyphMetrics {
    /// Horizontal distance in whole pixels from the text origin to the left
    /// edge of its ink when drawn at `size` pixels per em.
    ///
    /// Positive for glyphs whose ink starts right of the origin. Strings
    /// without ink (empty, whitespace only) report 0.
    fn left_bearing(&self, text: &str, size: u32) -> i32;
}

// ============================================================================
// WallpaperFont
// ============================================================================

/// An owned TrueType/OpenType font used for every text run.
pub struct WallpaperFont {
    font: FontVec,
}

impl WallpaperFont {
    /// Parses a font from raw file bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data).map_err(|e| Error::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    /// Reads and parses a font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let font = Self::from_bytes(data)
            .map_err(|e| Error::FontLoad(format!("{}: {e}", path.display())))?;
        log::debug!("loaded font {}", path.display());
        Ok(font)
    }

    /// Converts a pixels-per-em size to ab_glyph's height-based scale.
    pub fn scale(&self, size: u32) -> PxScale {
        let size = size as f32;
        match self.font.units_per_em() {
            Some(units) if units > 0.0 => PxScale::from(size * self.font.height_unscaled() / units),
            _ => PxScale::from(size),
        }
    }

    /// Positions and outlines each visible glyph of `text` on one line.
    ///
    /// Glyph positions are relative to the run origin with the line box top
    /// at y = 0.
    fn layout(&self, text: &str, size: u32) -> Vec<OutlinedGlyph> {
        let scale = self.scale(size);
        let scaled = self.font.as_scaled(scale);
        let ascent = scaled.ascent();

        let mut caret = 0.0;
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::new();

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, ascent));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                glyphs.push(outlined);
            }
        }

        glyphs
    }

    /// Draws one run onto `canvas`, blending by glyph coverage.
    pub fn draw_run(&self, canvas: &mut RgbImage, run: &TextRun, color: Rgb<u8>) {
        for glyph in self.layout(&run.text, run.size) {
            let bounds = glyph.px_bounds();
            let left = run.x + bounds.min.x as i32;
            let top = run.y + bounds.min.y as i32;

            glyph.draw(|gx, gy, coverage| {
                let px = left + gx as i32;
                let py = top + gy as i32;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if canvas.in_bounds(px, py) {
                    let under = *canvas.get_pixel(px, py);
                    let blended = interpolate(color, under, coverage.clamp(0.0, 1.0));
                    canvas.draw_pixel(px, py, blended);
                }
            });
        }
    }
}

impl GlyphMetrics for WallpaperFont {
    fn left_bearing(&self, text: &str, size: u32) -> i32 {
        self.layout(text, size)
            .iter()
            .map(|glyph| glyph.px_bounds().min.x.floor() as i32)
            .min()
            .unwrap_or(0)
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Background and text colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Srgb<u8>,
    pub foreground: Srgb<u8>,
}

impl Default for Theme {
    /// White text on black.
    fn default() -> Self {
        Self {
            background: Srgb::new(0, 0, 0),
            foreground: Srgb::new(255, 255, 255),
        }
    }
}

impl Theme {
    /// Parses both colors from hex strings such as `"#000000"` or `"fff"`.
    pub fn from_hex(background: &str, foreground: &str) -> Result<Self> {
        Ok(Self {
            background: parse_color(background)?,
            foreground: parse_color(foreground)?,
        })
    }
}

fn parse_color(value: &str) -> Result<Srgb<u8>> {
    value.trim().parse().map_err(|e: palette::rgb::FromHexError| Error::InvalidColor {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Formats a color as `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn pixel(color: Srgb<u8>) -> Rgb<u8> {
    Rgb([color.red, color.green, color.blue])
}

// ============================================================================
// Rasterization
// ============================================================================

/// Fills a canvas with the theme background and draws every run in order.
pub fn rasterize(plan: &TextPlan, font: &WallpaperFont, theme: &Theme) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(plan.width, plan.height, pixel(theme.background));
    let ink = pixel(theme.foreground);

    for run in &plan.runs {
        font.draw_run(&mut canvas, run, ink);
    }

    canvas
}

// ============================================================================
// Tests
// ============================================================================
