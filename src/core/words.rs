//! Tokenization and stable word-frequency ranking.
//!
//! Ranking contract: count descending, then first appearance ascending.
//! First appearance is the position of the token's first occurrence in the
//! order records were fed to the [`WordCounter`], so a ranking never depends
//! on hash iteration order and `top(n)` is always a prefix of `top(n + 1)`.
//!
//! ```rust
//! use chatlens::core::words::WordCounter;
//!
//! let mut counter = WordCounter::new();
//! for word in ["hello", "world", "hello", "there"] {
//!     counter.add(word);
//! }
//!
//! let top = counter.top(2);
//! assert_eq!(top[0].word, "hello");
//! assert_eq!(top[1].word, "world");
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::message::{MessageKind, MessageRecord};
use crate::parsing::classify::strip_edited_marker;

/// Apostrophes dropped from inside a token so `I'm` and `I’m` fold to `im`.
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Case-folds a raw whitespace token and strips surrounding punctuation.
///
/// Returns `None` when nothing alphanumeric is left.
pub fn normalize_token(raw: &str) -> Option<String> {
    let stripped = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if stripped.is_empty() {
        None
    } else {
        Some(
            stripped
                .chars()
                .filter(|c| !APOSTROPHES.contains(c))
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }
}

/// Iterates over the normalized tokens of a message body.
pub fn tokens(body: &str) -> impl Iterator<Item = String> + '_ {
    strip_edited_marker(body)
        .split_whitespace()
        .filter_map(normalize_token)
}

/// Counts the words of a body. Placeholders count zero.
pub fn count_words(body: &str, kind: MessageKind) -> usize {
    match kind {
        MessageKind::Text => tokens(body).count(),
        MessageKind::Media | MessageKind::Deleted => 0,
    }
}

/// A ranked `(word, count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

impl WordFrequency {
    /// Returns the pair as a tuple of borrowed word and count.
    pub fn as_pair(&self) -> (&str, usize) {
        (&self.word, self.count)
    }
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Frequency table with first-appearance bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    tallies: HashMap<String, Tally>,
    seen: usize,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of an already-normalized word.
    pub fn add(&mut self, word: impl Into<String>) {
        let order = self.seen;
        self.seen += 1;
        self.tallies
            .entry(word.into())
            .and_modify(|t| t.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: order,
            });
    }

    /// Adds every countable word of a record.
    ///
    /// Placeholders, stop words and tokens shorter than
    /// `config.min_word_length` are skipped.
    pub fn add_record(&mut self, record: &MessageRecord, config: &AnalysisConfig) {
        if record.kind() != MessageKind::Text {
            return;
        }
        for word in tokens(record.body()) {
            if is_countable(&word, config) {
                self.add(word);
            }
        }
    }

    /// Builds a counter from a sequence of records.
    pub fn from_records<'a, I>(records: I, config: &AnalysisConfig) -> Self
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        let mut counter = Self::new();
        for record in records {
            counter.add_record(record, config);
        }
        counter
    }

    /// Returns the frequency of a word (0 if unseen).
    pub fn count(&self, word: &str) -> usize {
        self.tallies.get(word).map_or(0, |t| t.count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Total number of counted occurrences.
    pub fn total(&self) -> usize {
        self.tallies.values().map(|t| t.count).sum()
    }

    /// Returns the `n` most frequent words under the stable ranking.
    pub fn top(&self, n: usize) -> Vec<WordFrequency> {
        let mut ranked: Vec<(&String, Tally)> =
            self.tallies.iter().map(|(w, t)| (w, *t)).collect();
        ranked.sort_unstable_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(word, tally)| WordFrequency {
                word: word.clone(),
                count: tally.count,
            })
            .collect()
    }
}

/// Returns `true` if a normalized word belongs in frequency tables.
pub fn is_countable(word: &str, config: &AnalysisConfig) -> bool {
    !config.is_stop_word(word) && word.chars().count() >= config.min_word_length
}
