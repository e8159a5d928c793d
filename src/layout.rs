//! Wallpaper layouts and the resolver that turns a resolution choice into one.
//!
//! A [`LayoutConfig`] fixes the canvas size, the three font sizes, and the
//! anchor of every text block. Six built-in [`Preset`]s cover common screen
//! resolutions; [`ResolutionChoice::Custom`] defers to a
//! [`CustomLayoutPrompt`] supplied by the host.
//!
//! # Example
//!
//! ```
//! use kanji_wallpapers::{resolve, CancelPrompt, Preset, ResolutionChoice};
//!
//! let layout = resolve(ResolutionChoice::Preset(Preset::Phone720x1280), &mut CancelPrompt)
//!     .unwrap();
//! assert_eq!((layout.width, layout.height), (720, 1280));
//!
//! // Cancelling the custom prompt abandons the request.
//! assert!(resolve(ResolutionChoice::Custom, &mut CancelPrompt).is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest value accepted for any layout field.
pub const MIN_LAYOUT_VALUE: u32 = 1;

/// Largest value accepted for any layout field.
pub const MAX_LAYOUT_VALUE: u32 = 65536;

// ============================================================================
// LayoutConfig
// ============================================================================

/// Canvas dimensions, font sizes, and text anchors for one wallpaper.
///
/// Anchors are top-left text origins in pixels. The record is immutable once
/// resolved and is passed by reference into the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,

    /// Font size of the kanji glyph.
    pub kanji_size: u32,
    pub kanji_x: u32,
    pub kanji_y: u32,

    /// Font size shared by the kun and on readings.
    pub readings_size: u32,
    pub kun_x: u32,
    pub kun_y: u32,
    pub on_x: u32,
    pub on_y: u32,

    /// Font size of the compound word lines; also their line pitch.
    pub compounds_size: u32,
    pub compounds_x: u32,
    pub compounds_y: u32,
}

impl LayoutConfig {
    /// Initial values offered when the user picks a custom layout.
    pub const CUSTOM_DEFAULTS: Self = Self {
        width: 1600,
        height: 1200,
        kanji_size: 250,
        kanji_x: 55,
        kanji_y: 100,
        readings_size: 55,
        kun_x: 300,
        kun_y: 140,
        on_x: 300,
        on_y: 190,
        compounds_size: 30,
        compounds_x: 55,
        compounds_y: 400,
    };

    /// Builds a layout from the 13 values in their canonical order.
    pub fn from_values(values: [u32; 13]) -> Self {
        let [
            width,
            height,
            kanji_size,
            kanji_x,
            kanji_y,
            readings_size,
            kun_x,
            kun_y,
            on_x,
            on_y,
            compounds_size,
            compounds_x,
            compounds_y,
        ] = values;
        Self {
            width,
            height,
            kanji_size,
            kanji_x,
            kanji_y,
            readings_size,
            kun_x,
            kun_y,
            on_x,
            on_y,
            compounds_size,
            compounds_x,
            compounds_y,
        }
    }

    /// Returns the 13 values in canonical order.
    pub fn values(&self) -> [u32; 13] {
        [
            self.width,
            self.height,
            self.kanji_size,
            self.kanji_x,
            self.kanji_y,
            self.readings_size,
            self.kun_x,
            self.kun_y,
            self.on_x,
            self.on_y,
            self.compounds_size,
            self.compounds_x,
            self.compounds_y,
        ]
    }

    /// Checks every field against the accepted `[1, 65536]` range.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; 13] = [
            "width",
            "height",
            "kanjiSize",
            "kanjiX",
            "kanjiY",
            "readingsSize",
            "kunX",
            "kunY",
            "onX",
            "onY",
            "compoundsSize",
            "compoundsX",
            "compoundsY",
        ];

        for (name, value) in NAMES.iter().zip(self.values()) {
            if !(MIN_LAYOUT_VALUE..=MAX_LAYOUT_VALUE).contains(&value) {
                return Err(Error::InvalidLayout(format!(
                    "{name} = {value} is outside {MIN_LAYOUT_VALUE}..={MAX_LAYOUT_VALUE}"
                )));
            }
        }
        Ok(())
    }

    /// Serializes the layout to a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the layout to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a layout from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Preset::default().layout()
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Built-in layouts, named by their canvas resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Preset {
    #[default]
    #[serde(rename = "720x1280")]
    Phone720x1280,
    #[serde(rename = "800x600")]
    Svga800x600,
    #[serde(rename = "1024x768")]
    Xga1024x768,
    #[serde(rename = "1280x960")]
    Sxga1280x960,
    #[serde(rename = "1280x1024")]
    Sxga1280x1024,
    #[serde(rename = "1600x1200")]
    Uxga1600x1200,
}

impl Preset {
    /// Every preset, in the order a settings dialog lists them.
    pub const ALL: [Preset; 6] = [
        Preset::Phone720x1280,
        Preset::Svga800x600,
        Preset::Xga1024x768,
        Preset::Sxga1280x960,
        Preset::Sxga1280x1024,
        Preset::Uxga1600x1200,
    ];

    /// The display name, e.g. `"720x1280"`.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Phone720x1280 => "720x1280",
            Preset::Svga800x600 => "800x600",
            Preset::Xga1024x768 => "1024x768",
            Preset::Sxga1280x960 => "1280x960",
            Preset::Sxga1280x1024 => "1280x1024",
            Preset::Uxga1600x1200 => "1600x1200",
        }
    }

    /// Returns the literal layout for this preset.
    pub fn layout(self) -> LayoutConfig {
        LayoutConfig::from_values(match self {
            Preset::Phone720x1280 => [720, 1280, 200, 55, 370, 35, 300, 410, 300, 450, 20, 55, 820],
            Preset::Svga800x600 => [800, 600, 200, 55, 100, 35, 300, 140, 300, 190, 20, 55, 310],
            Preset::Xga1024x768 => [1024, 768, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400],
            Preset::Sxga1280x960 => [1280, 960, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400],
            Preset::Sxga1280x1024 => [1280, 1024, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400],
            Preset::Uxga1600x1200 => [1600, 1200, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400],
        })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| Error::InvalidLayout(format!("unknown resolution {s:?}")))
    }
}

// ============================================================================
// Resolution choice
// ============================================================================

/// What the user picked in the resolution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResolutionChoice {
    Preset(Preset),
    /// Explicit values, gathered through a [`CustomLayoutPrompt`].
    Custom,
}

impl ResolutionChoice {
    /// Name of the custom entry in the resolution list.
    pub const CUSTOM_NAME: &'static str = "Custom";
}

impl Default for ResolutionChoice {
    fn default() -> Self {
        ResolutionChoice::Preset(Preset::default())
    }
}

impl fmt::Display for ResolutionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionChoice::Preset(preset) => preset.fmt(f),
            ResolutionChoice::Custom => f.write_str(Self::CUSTOM_NAME),
        }
    }
}

impl FromStr for ResolutionChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(Self::CUSTOM_NAME) {
            Ok(ResolutionChoice::Custom)
        } else {
            s.parse().map(ResolutionChoice::Preset)
        }
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for ResolutionChoice {
    fn schema_name() -> String {
        "ResolutionChoice".into()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

impl TryFrom<String> for ResolutionChoice {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ResolutionChoice> for String {
    fn from(choice: ResolutionChoice) -> Self {
        choice.to_string()
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Source of custom layout values, typically a modal form in the host.
pub trait CustomLayoutPrompt {
    /// Asks for the 13 layout values, starting from `defaults`.
    ///
    /// Returns `None` if the user aborts.
    fn prompt(&mut self, defaults: &LayoutConfig) -> Option<LayoutConfig>;
}

/// A prompt that always aborts. Useful when no custom input is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelPrompt;

impl CustomLayoutPrompt for CancelPrompt {
    fn prompt(&mut self, _defaults: &LayoutConfig) -> Option<LayoutConfig> {
        None
    }
}

/// A prompt that answers with a fixed layout.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt(pub LayoutConfig);

impl CustomLayoutPrompt for FixedPrompt {
    fn prompt(&mut self, _defaults: &LayoutConfig) -> Option<LayoutConfig> {
        Some(self.0)
    }
}

/// Resolves a resolution choice into a concrete layout.
///
/// Presets never consult `prompt`. For [`ResolutionChoice::Custom`] the prompt
/// is asked once; `None` means the request was cancelled and no generation
/// should take place.
pub fn resolve(
    choice: ResolutionChoice,
    prompt: &mut dyn CustomLayoutPrompt,
) -> Option<LayoutConfig> {
    match choice {
        ResolutionChoice::Preset(preset) => Some(preset.layout()),
        ResolutionChoice::Custom => {
            let layout = prompt.prompt(&LayoutConfig::CUSTOM_DEFAULTS);
            if layout.is_none() {
                log::info!("custom layout cancelled");
            }
            layout
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPrompt {
        calls: usize,
        answer: Option<LayoutConfig>,
    }

    impl CustomLayoutPrompt for CountingPrompt {
        fn prompt(&mut self, defaults: &LayoutConfig) -> Option<LayoutConfig> {
            assert_eq!(*defaults, LayoutConfig::CUSTOM_DEFAULTS);
            self.calls += 1;
            self.answer
        }
    }

    #[test]
    fn phone_preset_values() {
        let layout = resolve(
            ResolutionChoice::Preset(Preset::Phone720x1280),
            &mut CancelPrompt,
        )
        .unwrap();

        assert_eq!(layout.width, 720);
        assert_eq!(layout.height, 1280);
        assert_eq!(layout.kanji_size, 200);
        assert_eq!((layout.kanji_x, layout.kanji_y), (55, 370));
        assert_eq!(layout.readings_size, 35);
        assert_eq!((layout.kun_x, layout.kun_y), (300, 410));
        assert_eq!((layout.on_x, layout.on_y), (300, 450));
        assert_eq!(layout.compounds_size, 20);
        assert_eq!((layout.compounds_x, layout.compounds_y), (55, 820));
    }

    #[test]
    fn every_preset_matches_its_table_row() {
        let expected: [(&str, [u32; 13]); 6] = [
            ("720x1280", [720, 1280, 200, 55, 370, 35, 300, 410, 300, 450, 20, 55, 820]),
            ("800x600", [800, 600, 200, 55, 100, 35, 300, 140, 300, 190, 20, 55, 310]),
            ("1024x768", [1024, 768, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400]),
            ("1280x960", [1280, 960, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400]),
            ("1280x1024", [1280, 1024, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400]),
            ("1600x1200", [1600, 1200, 250, 55, 100, 55, 300, 140, 300, 190, 30, 55, 400]),
        ];

        for (name, values) in expected {
            let preset: Preset = name.parse().unwrap();
            assert_eq!(preset.name(), name);
            assert_eq!(preset.layout().values(), values, "preset {name}");
        }
        assert_eq!(Preset::Uxga1600x1200.layout(), LayoutConfig::CUSTOM_DEFAULTS);
    }

    #[test]
    fn presets_never_prompt() {
        let mut prompt = CountingPrompt { calls: 0, answer: None };
        for preset in Preset::ALL {
            assert!(resolve(ResolutionChoice::Preset(preset), &mut prompt).is_some());
        }
        assert_eq!(prompt.calls, 0);
    }

    #[test]
    fn custom_uses_prompt_answer() {
        let answer = LayoutConfig::from_values([1080, 1920, 300, 60, 400, 40, 380, 440, 380, 500, 24, 60, 900]);
        let mut prompt = CountingPrompt { calls: 0, answer: Some(answer) };

        let layout = resolve(ResolutionChoice::Custom, &mut prompt);

        assert_eq!(layout, Some(answer));
        assert_eq!(prompt.calls, 1);
    }

    #[test]
    fn custom_cancel_yields_none() {
        let mut prompt = CountingPrompt { calls: 0, answer: None };
        assert!(resolve(ResolutionChoice::Custom, &mut prompt).is_none());
        assert_eq!(prompt.calls, 1);
    }

    #[test]
    fn choice_parsing() {
        assert_eq!("Custom".parse::<ResolutionChoice>().unwrap(), ResolutionChoice::Custom);
        assert_eq!("custom".parse::<ResolutionChoice>().unwrap(), ResolutionChoice::Custom);
        assert_eq!(
            "1024x768".parse::<ResolutionChoice>().unwrap(),
            ResolutionChoice::Preset(Preset::Xga1024x768)
        );
        assert!("640x480".parse::<ResolutionChoice>().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(LayoutConfig::CUSTOM_DEFAULTS.validate().is_ok());

        let mut zero_width = LayoutConfig::CUSTOM_DEFAULTS;
        zero_width.width = 0;
        assert!(matches!(zero_width.validate(), Err(Error::InvalidLayout(msg)) if msg.contains("width")));

        let mut huge = LayoutConfig::CUSTOM_DEFAULTS;
        huge.compounds_y = MAX_LAYOUT_VALUE + 1;
        assert!(huge.validate().is_err());
    }

    #[test]
    fn layout_json_format() {
        let json = Preset::Svga800x600.layout().to_json_pretty().unwrap();
        assert!(json.contains("\"kanjiSize\""));
        assert!(json.contains("\"compoundsY\": 310"));

        let restored = LayoutConfig::from_json(&json).unwrap();
        assert_eq!(restored, Preset::Svga800x600.layout());
    }

    #[test]
    fn choice_serializes_as_name() {
        let json = serde_json::to_string(&ResolutionChoice::Preset(Preset::Sxga1280x960)).unwrap();
        assert_eq!(json, "\"1280x960\"");
        let custom: ResolutionChoice = serde_json::from_str("\"Custom\"").unwrap();
        assert_eq!(custom, ResolutionChoice::Custom);
    }
}
