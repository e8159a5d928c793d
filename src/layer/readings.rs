//! Kun and on readings.

use super::{LayerEffect, RenderContext, TextRole, coord};
use crate::dictionary::KanjiEntry;

/// Separator placed between readings.
pub const READING_SEPARATOR: &str = ", ";

/// Hard cutoff, in characters, for the joined kun readings.
///
/// On readings are never cut.
pub const KUN_READINGS_MAX_CHARS: usize = 10;

/// Draws the joined kun and on readings at their fixed anchors.
#[derive(Debug, Clone, Copy)]
pub struct ReadingsLayer<'a> {
    pub entry: &'a KanjiEntry,
}

impl<'a> ReadingsLayer<'a> {
    pub fn new(entry: &'a KanjiEntry) -> Self {
        Self { entry }
    }

    /// Kun readings as drawn: joined, then cut to the first ten characters.
    pub fn kun_text(&self) -> String {
        self.entry
            .kun_readings
            .join(READING_SEPARATOR)
            .chars()
            .take(KUN_READINGS_MAX_CHARS)
            .collect()
    }

    /// On readings as drawn.
    pub fn on_text(&self) -> String {
        self.entry.on_readings.join(READING_SEPARATOR)
    }
}

impl LayerEffect for ReadingsLayer<'_> {
    fn place(&self, ctx: &mut RenderContext<'_>) {
        let layout = *ctx.layout;
        ctx.push(
            TextRole::KunReadings,
            self.kun_text(),
            layout.readings_size,
            coord(layout.kun_x),
            coord(layout.kun_y),
        );
        ctx.push(
            TextRole::OnReadings,
            self.on_text(),
            layout.readings_size,
            coord(layout.on_x),
            coord(layout.on_y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::tests::FixedBearing;
    use crate::layout::Preset;

    #[test]
    fn kun_readings_are_cut_at_ten_chars() {
        let entry = KanjiEntry::new(["あたら.しい", "あら.た", "にい"], Vec::<String>::new());
        let layer = ReadingsLayer::new(&entry);

        // "あたら.しい, あら.た, にい" is 16 characters long.
        assert_eq!(layer.kun_text(), "あたら.しい, あら");
        assert_eq!(layer.kun_text().chars().count(), KUN_READINGS_MAX_CHARS);
    }

    #[test]
    fn short_kun_readings_are_untouched() {
        let entry = KanjiEntry::new(["よ", "む", "こ", "え"], ["ドク"]);
        // Exactly ten characters.
        assert_eq!(ReadingsLayer::new(&entry).kun_text(), "よ, む, こ, え");

        let entry = KanjiEntry::new(["みず"], ["スイ"]);
        assert_eq!(ReadingsLayer::new(&entry).kun_text(), "みず");
    }

    #[test]
    fn on_readings_are_not_cut() {
        let entry = KanjiEntry::new(Vec::<String>::new(), ["ジョウ", "ショウ", "セイ", "ゾウ"]);
        let layer = ReadingsLayer::new(&entry);
        assert_eq!(layer.on_text(), "ジョウ, ショウ, セイ, ゾウ");
        assert_eq!(layer.kun_text(), "");
    }

    #[test]
    fn readings_use_unaligned_anchors() {
        let layout = Preset::Phone720x1280.layout();
        let metrics = FixedBearing(50);
        let entry = KanjiEntry::new(["みず"], ["スイ"]);
        let mut ctx = RenderContext::new("水", &layout, &metrics);

        ReadingsLayer::new(&entry).place(&mut ctx);
        let plan = ctx.into_plan();

        let kun = plan.runs_with(TextRole::KunReadings).next().unwrap();
        assert_eq!((kun.text.as_str(), kun.x, kun.y, kun.size), ("みず", 300, 410, 35));
        let on = plan.runs_with(TextRole::OnReadings).next().unwrap();
        assert_eq!((on.text.as_str(), on.x, on.y, on.size), ("スイ", 300, 450, 35));
    }
}
