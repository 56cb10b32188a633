//! Configuration for one analysis run.
//!
//! [`AnalysisConfig`] is a plain serde struct with builder methods and no CLI
//! framework dependencies. It is passed explicitly into the parser and the
//! aggregation engine; nothing reads process-wide state.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, DateOrder};
//!
//! let config = AnalysisConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_top_word_count(5)
//!     .with_extra_stop_words(["lol", "ok"]);
//!
//! assert!(config.is_stop_word("lol"));
//! assert!(config.is_stop_word("the"));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};

/// Common English filler words excluded from word-frequency tables.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "but", "by", "can", "cant", "could", "did", "didnt", "do", "does",
    "dont", "for", "from", "get", "got", "had", "has", "have", "he", "her", "him", "his", "how",
    "i", "if", "im", "in", "into", "is", "isnt", "it", "its", "ive", "just", "me", "my",
    "no", "not", "now", "of", "oh", "ok", "okay", "on", "or", "our", "so", "some", "she", "that",
    "thats", "the", "their", "them", "then", "there", "theres", "they", "this", "to", "too",
    "up", "us", "was", "we", "were", "what", "when", "which", "who", "will", "with", "wont",
    "would", "yeah", "yes", "you", "youre", "your",
];

/// Day/month component order of numeric export dates.
///
/// Exports do not say which order they use and `03/04/2024` is valid either
/// way, so the order is chosen per run instead of guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `DD/MM/YYYY` (most locales)
    #[default]
    DayFirst,
    /// `MM/DD/YYYY` (US locale)
    MonthFirst,
}

impl DateOrder {
    /// Returns all supported names.
    pub fn all_names() -> &'static [&'static str] {
        &["day-first", "month-first"]
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-first" | "dmy" => Ok(DateOrder::DayFirst),
            "month-first" | "mdy" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: {}",
                s,
                DateOrder::all_names().join(", ")
            )),
        }
    }
}

/// Configuration for parsing and aggregating one export.
///
/// Unknown fields are rejected when deserializing; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Day/month order of export dates (default: day-first)
    pub date_order: DateOrder,

    /// Length of every ranked word list (default: 10)
    pub top_word_count: usize,

    /// Words excluded from frequency tables, lower-case (default: built-in list)
    pub stop_words: BTreeSet<String>,

    /// Minimum token length in characters for frequency tables (default: 1)
    pub min_word_length: usize,

    /// Keep media and deletion placeholders as zero-word messages instead of
    /// dropping them with system events (default: false)
    pub include_placeholders: bool,

    /// Read buffer size for streaming ingest (default: 64KB)
    pub buffer_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::default(),
            top_word_count: 10,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            min_word_length: 1,
            include_placeholders: false,
            buffer_size: 64 * 1024,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date component order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets the length of ranked word lists.
    #[must_use]
    pub fn with_top_word_count(mut self, n: usize) -> Self {
        self.top_word_count = n;
        self
    }

    /// Replaces the stop-word set.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Adds words to the current stop-word set.
    #[must_use]
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Sets the minimum token length counted in frequency tables.
    #[must_use]
    pub fn with_min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    /// Keeps placeholder entries as messages.
    #[must_use]
    pub fn with_placeholders(mut self, include: bool) -> Self {
        self.include_placeholders = include;
        self
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns `true` if `word` (already normalized) is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.top_word_count == 0 {
            return Err(ChatlensError::invalid_config(
                "top_word_count must be at least 1",
            ));
        }
        if self.buffer_size == 0 {
            return Err(ChatlensError::invalid_config(
                "buffer_size must be at least 1",
            ));
        }
        Ok(())
    }
}
