//! Example compound words per kanji, with a lazily loaded cache.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// CompoundEntry
// ============================================================================

/// A word containing the kanji, with its reading, JLPT level, and gloss.
///
/// Serialized as a four-element array:
///
/// ```json
/// ["水曜日", "スイヨウビ", "5", "Wednesday"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCompound", into = "RawCompound")]
pub struct CompoundEntry {
    pub compound: String,
    pub pronunciation: String,
    /// JLPT level, with or without the leading `N` (`"5"` and `"N5"` are equivalent).
    pub level: String,
    pub gloss: String,
}

type RawCompound = (String, String, String, String);

impl From<RawCompound> for CompoundEntry {
    fn from((compound, pronunciation, level, gloss): RawCompound) -> Self {
        Self {
            compound,
            pronunciation,
            level,
            gloss,
        }
    }
}

impl From<CompoundEntry> for RawCompound {
    fn from(entry: CompoundEntry) -> Self {
        (entry.compound, entry.pronunciation, entry.level, entry.gloss)
    }
}

impl CompoundEntry {
    pub fn new(
        compound: impl Into<String>,
        pronunciation: impl Into<String>,
        level: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            compound: compound.into(),
            pronunciation: pronunciation.into(),
            level: level.into(),
            gloss: gloss.into(),
        }
    }

    /// The line drawn on the wallpaper, e.g. `水曜日 (スイヨウビ) : (N5) Wednesday`.
    pub fn caption(&self) -> String {
        let level = self
            .level
            .strip_prefix(['N', 'n'])
            .unwrap_or(&self.level);
        format!(
            "{} ({}) : (N{}) {}",
            self.compound, self.pronunciation, level, self.gloss
        )
    }
}

// ============================================================================
// CompoundTable
// ============================================================================

/// Compound words keyed by kanji, each list in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundTable {
    words: HashMap<String, Vec<CompoundEntry>>,
}

impl CompoundTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a compound to the list for `kanji`.
    pub fn insert(&mut self, kanji: impl Into<String>, entry: CompoundEntry) {
        self.words.entry(kanji.into()).or_default().push(entry);
    }

    /// Returns the compounds for `kanji`; empty if there are none.
    pub fn get(&self, kanji: &str) -> &[CompoundEntry] {
        self.words.get(kanji).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of kanji with at least one entry.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Deserializes a table from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the table to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<K: Into<String>> FromIterator<(K, CompoundEntry)> for CompoundTable {
    fn from_iter<I: IntoIterator<Item = (K, CompoundEntry)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (kanji, entry) in iter {
            table.insert(kanji, entry);
        }
        table
    }
}

// ============================================================================
// CompoundCache
// ============================================================================

type Loader = Box<dyn Fn() -> Result<CompoundTable> + Send + Sync>;

/// A compound table that is loaded on first use and read-only afterwards.
///
/// [`ensure_loaded`](Self::ensure_loaded) runs the loader at most once per
/// successful load; concurrent and repeated calls share the same table. A
/// failed load leaves the cache empty so the next call tries again.
pub struct CompoundCache {
    loader: Loader,
    table: OnceCell<CompoundTable>,
}

impl CompoundCache {
    /// Creates a cache that fills itself by calling `loader`.
    pub fn new(loader: impl Fn() -> Result<CompoundTable> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            table: OnceCell::new(),
        }
    }

    /// Creates a cache that reads a JSON table from `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(move || {
            let json = std::fs::read_to_string(&path)?;
            let table = CompoundTable::from_json(&json)?;
            log::debug!("loaded compounds for {} kanji from {}", table.len(), path.display());
            Ok(table)
        })
    }

    /// Creates a cache that is already loaded with `table`.
    pub fn preloaded(table: CompoundTable) -> Self {
        Self {
            loader: Box::new(|| Ok(CompoundTable::new())),
            table: OnceCell::with_value(table),
        }
    }

    /// Loads the table if needed and returns it.
    pub fn ensure_loaded(&self) -> Result<&CompoundTable> {
        self.table.get_or_try_init(|| (self.loader)())
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}

impl fmt::Debug for CompoundCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundCache")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
