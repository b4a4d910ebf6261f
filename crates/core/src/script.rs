//! Script-membership heuristic used to decide whether text needs translating.
//!
//! A text "is in" a script when it contains at least one character from any
//! of the script's Unicode blocks. This is a presence test, not language
//! identification.

use serde::{Deserialize, Serialize};

/// An inclusive range of Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }
}

/// A writing system, described by the Unicode blocks it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Human-readable name, used in logs.
    pub name: String,

    /// Blocks belonging to this script.
    pub ranges: Vec<CharRange>,
}

/// Language code to (script name, blocks).
const LANGUAGE_SCRIPTS: &[(&[&str], &str, &[CharRange])] = &[
    (&["or"], "Odia", &[CharRange::new('\u{0B00}', '\u{0B7F}')]),
    (
        &["hi", "mr", "ne", "sa"],
        "Devanagari",
        &[CharRange::new('\u{0900}', '\u{097F}')],
    ),
    (&["bn", "as"], "Bengali", &[CharRange::new('\u{0980}', '\u{09FF}')]),
    (&["pa"], "Gurmukhi", &[CharRange::new('\u{0A00}', '\u{0A7F}')]),
    (&["gu"], "Gujarati", &[CharRange::new('\u{0A80}', '\u{0AFF}')]),
    (&["ta"], "Tamil", &[CharRange::new('\u{0B80}', '\u{0BFF}')]),
    (&["te"], "Telugu", &[CharRange::new('\u{0C00}', '\u{0C7F}')]),
    (&["kn"], "Kannada", &[CharRange::new('\u{0C80}', '\u{0CFF}')]),
    (&["ml"], "Malayalam", &[CharRange::new('\u{0D00}', '\u{0D7F}')]),
    (&["th"], "Thai", &[CharRange::new('\u{0E00}', '\u{0E7F}')]),
    (&["he"], "Hebrew", &[CharRange::new('\u{0590}', '\u{05FF}')]),
    (
        &["ar", "fa", "ur"],
        "Arabic",
        &[CharRange::new('\u{0600}', '\u{06FF}')],
    ),
    (&["el"], "Greek", &[CharRange::new('\u{0370}', '\u{03FF}')]),
    (
        &["ru", "uk", "bg", "sr"],
        "Cyrillic",
        &[CharRange::new('\u{0400}', '\u{04FF}')],
    ),
    (
        &["ja"],
        "Japanese",
        &[
            CharRange::new('\u{3040}', '\u{309F}'),
            CharRange::new('\u{30A0}', '\u{30FF}'),
            CharRange::new('\u{4E00}', '\u{9FFF}'),
        ],
    ),
    (&["zh", "zh-CN", "zh-TW"], "Han", &[CharRange::new('\u{4E00}', '\u{9FFF}')]),
    (
        &["ko"],
        "Hangul",
        &[
            CharRange::new('\u{1100}', '\u{11FF}'),
            CharRange::new('\u{AC00}', '\u{D7AF}'),
        ],
    ),
];

impl Script {
    /// Create a script from its blocks.
    pub fn new(name: impl Into<String>, ranges: Vec<CharRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    /// The Odia block, U+0B00..U+0B7F.
    pub fn odia() -> Self {
        Self::new("Odia", vec![CharRange::new('\u{0B00}', '\u{0B7F}')])
    }

    /// Look up the script usually written for a language code.
    ///
    /// Only the primary subtag is considered when the full code is unknown,
    /// so `hi-IN` resolves like `hi`.
    pub fn for_language(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or(code);
        LANGUAGE_SCRIPTS
            .iter()
            .find(|(codes, _, _)| codes.contains(&code))
            .or_else(|| {
                LANGUAGE_SCRIPTS
                    .iter()
                    .find(|(codes, _, _)| codes.contains(&primary))
            })
            .map(|(_, name, ranges)| Self::new(*name, ranges.to_vec()))
    }

    /// Whether `c` belongs to any of this script's blocks.
    pub fn contains_char(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }

    /// Whether `text` contains at least one character of this script.
    pub fn appears_in(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains_char(c))
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::odia()
    }
}

/// Whether `title` and `text` together need translating into `script`.
pub fn needs_translation(title: &str, text: &str, script: &Script) -> bool {
    !(script.appears_in(title) || script.appears_in(text))
}
