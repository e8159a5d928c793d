//! Serializable generation settings.
//!
//! [`GenerationSettings`] captures everything the "Generate Kanji Wallpapers"
//! form asks for: which cards to use, which note field holds the kanji, the
//! wallpaper resolution, how many compounds to list, and the colors.
//!
//! # Example
//!
//! ```
//! use kanji_wallpapers::{GenerationSettings, ResolutionChoice};
//!
//! let settings = GenerationSettings::new("Kanji")
//!     .with_resolution("1024x768".parse::<ResolutionChoice>().unwrap())
//!     .with_max_compounds(5);
//!
//! assert_eq!(settings.card_query(), "\"deck:Kanji\" is:learn");
//!
//! let json = settings.to_json().unwrap();
//! let restored = GenerationSettings::from_json(&json).unwrap();
//! assert_eq!(restored.max_compounds, 5);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::layer::text::to_hex;
use crate::layer::{DEFAULT_MAX_COMPOUNDS, Theme};
use crate::layout::ResolutionChoice;

/// Note field read when none is given.
pub const DEFAULT_FIELD: &str = "kanji";

/// Card filter used when none is given.
pub const DEFAULT_CARD_TYPE: &str = "is:learn";

/// Largest number of compound lines a user may ask for.
pub const MAX_COMPOUNDS_LIMIT: u32 = 50;

/// Directory name used under the user data directory.
pub const OUTPUT_DIR_NAME: &str = "kanji_wallpapers";

/// Where wallpapers go when no directory is given: `<data dir>/kanji_wallpapers`.
///
/// Falls back to a relative `kanji_wallpapers` when the platform has no data
/// directory.
pub fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(OUTPUT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(OUTPUT_DIR_NAME))
}

// ============================================================================
// Theme Settings (Serializable)
// ============================================================================

/// Serializable form of [`Theme`], with colors as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ThemeSettings {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

impl ThemeSettings {
    /// Parses the colors into a [`Theme`].
    pub fn to_theme(&self) -> Result<Theme> {
        Theme::from_hex(&self.background, &self.foreground)
    }
}

impl From<&Theme> for ThemeSettings {
    fn from(theme: &Theme) -> Self {
        Self {
            background: to_hex(theme.background),
            foreground: to_hex(theme.foreground),
        }
    }
}

fn default_background() -> String {
    "#000000".into()
}

fn default_foreground() -> String {
    "#ffffff".into()
}

// ============================================================================
// GenerationSettings
// ============================================================================

/// Settings for one generation request.
///
/// # JSON Format
///
/// ```json
/// {
///   "deck": "Kanji",
///   "field": "kanji",
///   "cardType": "is:learn",
///   "resolution": "720x1280",
///   "maxCompounds": 8,
///   "theme": { "background": "#000000", "foreground": "#ffffff" }
/// }
/// ```
///
/// Every key except `deck` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GenerationSettings {
    /// Deck whose cards are turned into wallpapers.
    pub deck: String,

    /// Name of the note field holding the kanji.
    #[serde(default = "default_field", deserialize_with = "field_or_default")]
    pub field: String,

    /// Extra search filter appended to the deck term.
    #[serde(default = "default_card_type", deserialize_with = "card_type_or_default")]
    pub card_type: String,

    #[serde(default)]
    pub resolution: ResolutionChoice,

    /// Number of compound lines per wallpaper (1-50).
    #[serde(default = "default_max_compounds")]
    pub max_compounds: u32,

    #[serde(default)]
    pub theme: ThemeSettings,
}

impl GenerationSettings {
    /// Creates settings for `deck` with every other value at its default.
    pub fn new(deck: impl Into<String>) -> Self {
        Self {
            deck: deck.into(),
            field: default_field(),
            card_type: default_card_type(),
            resolution: ResolutionChoice::default(),
            max_compounds: DEFAULT_MAX_COMPOUNDS,
            theme: ThemeSettings::default(),
        }
    }

    /// Sets the kanji field. Blank input keeps the default; input is lower-cased.
    pub fn with_field(mut self, field: &str) -> Self {
        self.field = normalize(field, DEFAULT_FIELD);
        self
    }

    /// Sets the card filter. Blank input keeps the default; input is lower-cased.
    pub fn with_card_type(mut self, card_type: &str) -> Self {
        self.card_type = normalize(card_type, DEFAULT_CARD_TYPE);
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionChoice) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_max_compounds(mut self, max_compounds: u32) -> Self {
        self.max_compounds = max_compounds;
        self
    }

    pub fn with_theme(mut self, theme: ThemeSettings) -> Self {
        self.theme = theme;
        self
    }

    /// The card search, e.g. `"deck:Kanji" is:learn`.
    pub fn card_query(&self) -> String {
        format!("\"deck:{}\" {}", self.deck, self.card_type)
    }

    /// Checks the values a settings form would constrain.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COMPOUNDS_LIMIT).contains(&self.max_compounds) {
            return Err(Error::InvalidLayout(format!(
                "maxCompounds = {} is outside 1..={MAX_COMPOUNDS_LIMIT}",
                self.max_compounds
            )));
        }
        self.theme.to_theme().map(|_| ())
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn normalize(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_lowercase()
    }
}

fn field_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(normalize(&value, DEFAULT_FIELD))
}

fn card_type_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(normalize(&value, DEFAULT_CARD_TYPE))
}

fn default_field() -> String {
    DEFAULT_FIELD.into()
}

fn default_card_type() -> String {
    DEFAULT_CARD_TYPE.into()
}

fn default_max_compounds() -> u32 {
    DEFAULT_MAX_COMPOUNDS
}

// ============================================================================
// Tests
// ============================================================================
