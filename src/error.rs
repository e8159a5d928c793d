//! Error types for wallpaper generation.

use thiserror::Error;

/// Result type alias for wallpaper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, rendering, or persisting wallpapers.
///
/// Cancelling a custom layout is not an error: [`resolve`](crate::resolve)
/// reports it as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The kanji has no entry in the dictionary.
    #[error("kanji not found in dictionary: {0}")]
    KanjiNotFound(String),

    /// The card's note has no field with this name.
    #[error("note has no field named {0:?}")]
    MissingField(String),

    /// A note field did not hold exactly one character.
    #[error("expected a single kanji, got {0:?}")]
    InvalidKanji(String),

    /// The font file could not be parsed.
    #[error("failed to load font: {0}")]
    FontLoad(String),

    /// A layout value is outside the accepted range.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A theme color is not a valid hex string.
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    /// The card query uses a term the collection cannot evaluate.
    #[error("unsupported query term: {0}")]
    UnsupportedQuery(String),

    /// A data file is malformed.
    #[error("malformed data at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
