//! The large kanji glyph.

use super::{LayerEffect, RenderContext, TextRole, coord};

/// Draws the kanji itself at the layout's kanji anchor.
///
/// Glyph bearing differs from character to character, so the origin is
/// corrected by the glyph's left-side bearing: the visible left edge of every
/// kanji lines up with `kanji_x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanjiGlyphLayer;

impl LayerEffect for KanjiGlyphLayer {
    fn place(&self, ctx: &mut RenderContext<'_>) {
        let layout = *ctx.layout;
        let kanji = ctx.kanji;
        ctx.push_aligned(
            TextRole::Kanji,
            kanji,
            layout.kanji_size,
            coord(layout.kanji_x),
            coord(layout.kanji_y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::GlyphMetrics;
    use crate::layout::Preset;

    struct PerGlyph;

    impl GlyphMetrics for PerGlyph {
        fn left_bearing(&self, text: &str, _size: u32) -> i32 {
            match text {
                "一" => 4,
                "水" => 12,
                _ => 0,
            }
        }
    }

    #[test]
    fn origin_depends_on_glyph_bearing() {
        let layout = Preset::Phone720x1280.layout();

        let place = |kanji: &'static str| {
            let mut ctx = RenderContext::new(kanji, &layout, &PerGlyph);
            KanjiGlyphLayer.place(&mut ctx);
            ctx.into_plan().runs.remove(0)
        };

        let one = place("一");
        let water = place("水");

        assert_eq!((one.x, one.y), (51, 370));
        assert_eq!((water.x, water.y), (43, 370));
        assert_eq!(one.x + 4, water.x + 12);
        assert_eq!(water.size, 200);
        assert_eq!(water.role, TextRole::Kanji);
    }
}
