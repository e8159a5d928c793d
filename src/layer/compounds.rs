//! Example compound word lines.

use super::{LayerEffect, RenderContext, TextRole, coord};
use crate::compounds::CompoundEntry;

/// Default number of compound lines shown per wallpaper.
pub const DEFAULT_MAX_COMPOUNDS: u32 = 8;

/// Draws up to `max` compound captions below the compound anchor.
///
/// Line `k` (starting at 1) sits at `compounds_y + compounds_size * k`, so the
/// first line is already one font size below the anchor. Each caption is
/// bearing-corrected so its visible left edge sits at `compounds_x`.
#[derive(Debug, Clone, Copy)]
pub struct CompoundsLayer<'a> {
    pub entries: &'a [CompoundEntry],
    pub max: u32,
}

impl<'a> CompoundsLayer<'a> {
    pub fn new(entries: &'a [CompoundEntry], max: u32) -> Self {
        Self { entries, max }
    }
}

impl LayerEffect for CompoundsLayer<'_> {
    fn place(&self, ctx: &mut RenderContext<'_>) {
        let layout = *ctx.layout;
        let x = coord(layout.compounds_x);

        for (k, entry) in (1..=self.max).zip(self.entries) {
            let y = i64::from(layout.compounds_y) + i64::from(layout.compounds_size) * i64::from(k);
            let y = i32::try_from(y).unwrap_or(i32::MAX);
            ctx.push_aligned(TextRole::Compound(k), entry.caption(), layout.compounds_size, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::tests::FixedBearing;
    use crate::layer::TextPlan;
    use crate::layout::{LayoutConfig, Preset};

    fn entries(n: usize) -> Vec<CompoundEntry> {
        (0..n)
            .map(|i| CompoundEntry::new(format!("語{i}"), "ゴ", "4", format!("word {i}")))
            .collect()
    }

    fn plan(entries: &[CompoundEntry], max: u32, layout: &LayoutConfig) -> TextPlan {
        let metrics = FixedBearing(10);
        let mut ctx = RenderContext::new("語", layout, &metrics);
        CompoundsLayer::new(entries, max).place(&mut ctx);
        ctx.into_plan()
    }

    #[test]
    fn lines_start_one_size_below_anchor() {
        let layout = Preset::Phone720x1280.layout();
        let plan = plan(&entries(3), DEFAULT_MAX_COMPOUNDS, &layout);

        let ys: Vec<_> = plan.compound_runs().map(|r| r.y).collect();
        assert_eq!(ys, [840, 860, 880]);
        for run in plan.compound_runs() {
            // FixedBearing(10) yields 2px at size 20.
            assert_eq!(run.x, 55 - 2);
            assert_eq!(run.size, 20);
        }
    }

    #[test]
    fn max_caps_line_count() {
        let layout = Preset::Xga1024x768.layout();
        let plan = plan(&entries(12), 8, &layout);

        let roles: Vec<_> = plan.compound_runs().map(|r| r.role).collect();
        assert_eq!(roles.len(), 8);
        assert_eq!(roles.first(), Some(&TextRole::Compound(1)));
        assert_eq!(roles.last(), Some(&TextRole::Compound(8)));
        assert_eq!(plan.compound_runs().last().unwrap().y, 400 + 30 * 8);
    }

    #[test]
    fn zero_max_or_no_entries_draw_nothing() {
        let layout = Preset::Phone720x1280.layout();
        assert_eq!(plan(&entries(5), 0, &layout).runs.len(), 0);
        assert_eq!(plan(&[], DEFAULT_MAX_COMPOUNDS, &layout).runs.len(), 0);
    }

    #[test]
    fn captions_keep_entry_order() {
        let layout = Preset::Phone720x1280.layout();
        let plan = plan(&entries(2), 50, &layout);
        let texts: Vec<_> = plan.compound_runs().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["語0 (ゴ) : (N4) word 0", "語1 (ゴ) : (N4) word 1"]);
    }
}
