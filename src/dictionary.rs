//! Kanji dictionary lookups.
//!
//! The renderer only needs the kun and on readings of a character. Any type
//! implementing [`KanjiDictionary`] can supply them; [`Kanjidic`] reads the
//! EDRDG KANJIDIC text format.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Readings of a single kanji, in dictionary order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KanjiEntry {
    /// Native-vocabulary readings (hiragana), e.g. `みず`.
    pub kun_readings: Vec<String>,
    /// Borrowed readings (katakana), e.g. `スイ`.
    pub on_readings: Vec<String>,
}

impl KanjiEntry {
    pub fn new<K, O>(kun: K, on: O) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            kun_readings: kun.into_iter().map(Into::into).collect(),
            on_readings: on.into_iter().map(Into::into).collect(),
        }
    }
}

/// A read-only kanji dictionary.
pub trait KanjiDictionary {
    /// Returns the entry for `kanji`, or `None` if the character is unknown.
    fn lookup(&self, kanji: &str) -> Option<KanjiEntry>;
}

impl KanjiDictionary for HashMap<String, KanjiEntry> {
    fn lookup(&self, kanji: &str) -> Option<KanjiEntry> {
        self.get(kanji).cloned()
    }
}

impl<D: KanjiDictionary + ?Sized> KanjiDictionary for &D {
    fn lookup(&self, kanji: &str) -> Option<KanjiEntry> {
        (**self).lookup(kanji)
    }
}

// ============================================================================
// KANJIDIC
// ============================================================================

/// A dictionary parsed from the KANJIDIC text format.
///
/// Each line holds one kanji followed by space-separated fields: ASCII index
/// codes, katakana on readings, hiragana kun readings, a `T1`/`T2` marker that
/// introduces name-only readings, and `{...}` English meanings. Name readings
/// and meanings are not kept.
///
/// ```
/// use kanji_wallpapers::{KanjiDictionary, Kanjidic};
///
/// let dic: Kanjidic = "水 3f65 U6c34 B85 G1 S4 スイ みず みず- {water}".parse().unwrap();
/// let entry = dic.lookup("水").unwrap();
/// assert_eq!(entry.kun_readings, ["みず", "みず-"]);
/// assert_eq!(entry.on_readings, ["スイ"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Kanjidic {
    entries: HashMap<String, KanjiEntry>,
}

impl Kanjidic {
    /// Reads a UTF-8 KANJIDIC file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let dic: Self = text.parse()?;
        log::debug!("loaded {} kanji from {}", dic.len(), path.display());
        Ok(dic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KanjiDictionary for Kanjidic {
    fn lookup(&self, kanji: &str) -> Option<KanjiEntry> {
        self.entries.get(kanji).cloned()
    }
}

impl FromStr for Kanjidic {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('＃') {
                continue;
            }
            let (kanji, entry) = parse_line(line).ok_or_else(|| Error::DataFormat {
                line: index + 1,
                reason: "missing kanji field".into(),
            })?;
            entries.insert(kanji, entry);
        }

        Ok(Self { entries })
    }
}

fn parse_line(line: &str) -> Option<(String, KanjiEntry)> {
    let mut fields = line.split_whitespace();
    let kanji = fields.next()?.to_string();
    let mut entry = KanjiEntry::default();

    for field in fields {
        if field.starts_with('{') || field == "T1" || field == "T2" {
            break;
        }
        match reading_kind(field) {
            Some(ReadingKind::On) => entry.on_readings.push(field.to_string()),
            Some(ReadingKind::Kun) => entry.kun_readings.push(field.to_string()),
            None => {}
        }
    }

    Some((kanji, entry))
}

enum ReadingKind {
    On,
    Kun,
}

/// Classifies a field by its first kana, skipping the `-` affix marker.
fn reading_kind(field: &str) -> Option<ReadingKind> {
    let first = field.chars().find(|&c| c != '-')?;
    match first {
        '\u{3041}'..='\u{309F}' => Some(ReadingKind::Kun),
        '\u{30A1}'..='\u{30FF}' => Some(ReadingKind::On),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
