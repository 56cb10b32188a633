//! Aggregation engine: statistics folded from a [`RecordStore`].
//!
//! Every computation is an independent pure function of the store (and the
//! config where word tables are involved); none relies on another's result.
//! [`Analysis`] bundles all of them, computed sequentially or, with the
//! `parallel` feature, on the rayon pool.
//!
//! # Empty corpus
//!
//! Counts and histograms are well defined for an empty store (all zeros).
//! Rankings and averages are not: they return [`ChatlensError::EmptyCorpus`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::stats::{Aggregator, WordScope};
//! use chatlens::parser::ingest_str;
//!
//! # fn main() -> chatlens::Result<()> {
//! let export = "[01/01/2024, 10:00:00] Alice: hello world\n\
//!               [01/01/2024, 10:01:00] Bob: hello there\n";
//! let config = AnalysisConfig::new();
//! let ingest = ingest_str(export, &config)?;
//!
//! let stats = Aggregator::new(&ingest.store, &config);
//! assert_eq!(stats.overall_stats().total_messages, 2);
//! assert_eq!(stats.top_words(WordScope::Overall, 1)?[0].word, "hello");
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use log::debug;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::buckets::{HourlyActivity, YearMonth};
use crate::core::store::RecordStore;
use crate::core::words::{WordCounter, WordFrequency};
use crate::error::{ChatlensError, Result};
use crate::message::{MessageKind, MessageRecord};

/// Whole-conversation counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OverallStats {
    pub total_messages: usize,
    pub total_words: usize,
    /// Distinct `(year, month)` buckets observed
    pub distinct_months: usize,
    pub distinct_senders: usize,
    pub media_messages: usize,
    pub deleted_messages: usize,
    /// Earliest timestamp (by value, not by position)
    pub first_message: Option<NaiveDateTime>,
    /// Latest timestamp (by value, not by position)
    pub last_message: Option<NaiveDateTime>,
}

/// Counts for one sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PersonStats {
    pub messages: usize,
    pub words: usize,
}

impl PersonStats {
    pub fn average_words_per_message(&self) -> f64 {
        if self.messages == 0 {
            0.0
        } else {
            self.words as f64 / self.messages as f64
        }
    }

    /// Percentage of `total_messages` sent by this person.
    pub fn share_of(&self, total_messages: usize) -> f64 {
        if total_messages == 0 {
            0.0
        } else {
            self.messages as f64 / total_messages as f64 * 100.0
        }
    }
}

/// Per-sender counts, kept in order of first appearance.
///
/// Serializes as a JSON object keyed by sender.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PerPersonStats {
    entries: Vec<(String, PersonStats)>,
    index: HashMap<String, usize>,
}

impl PerPersonStats {
    fn entry(&mut self, sender: &str) -> &mut PersonStats {
        let position = match self.index.get(sender).copied() {
            Some(position) => position,
            None => {
                self.entries.push((sender.to_string(), PersonStats::default()));
                self.index.insert(sender.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, sender: &str) -> Option<&PersonStats> {
        self.index.get(sender).map(|&i| &self.entries[i].1)
    }

    /// `(sender, stats)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonStats)> {
        self.entries.iter().map(|(sender, stats)| (sender.as_str(), stats))
    }

    /// Pairs sorted by message count, descending; ties keep first appearance.
    pub fn by_message_count(&self) -> Vec<(&str, &PersonStats)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.messages.cmp(&a.1.messages));
        sorted
    }

    /// Sender with the most messages; the first to appear wins ties.
    pub fn most_active(&self) -> Option<(&str, &PersonStats)> {
        self.by_message_count().into_iter().next()
    }

    pub fn total_messages(&self) -> usize {
        self.entries.iter().map(|(_, s)| s.messages).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PerPersonStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (sender, stats) in &self.entries {
            map.serialize_entry(sender, stats)?;
        }
        map.end()
    }
}

/// Counts and top words for one month.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MonthStats {
    pub messages: usize,
    pub words: usize,
    pub top_words: Vec<WordFrequency>,
}

/// Month buckets in chronological order.
pub type MonthlyBreakdown = BTreeMap<YearMonth, MonthStats>;

/// Derived per-day and per-month rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    /// Calendar days from the earliest to the latest message, inclusive
    pub span_days: u64,
    /// Calendar months from the earliest to the latest message, inclusive
    pub span_months: u32,
    pub messages_per_day: f64,
    pub words_per_day: f64,
    pub messages_per_month: f64,
    pub words_per_month: f64,
}

/// Scope of a ranked word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordScope<'a> {
    Overall,
    Sender(&'a str),
}

/// Computes total counts, totals of words and distinct buckets.
pub fn overall_stats(store: &RecordStore) -> OverallStats {
    let mut stats = OverallStats::default();
    let mut months = std::collections::BTreeSet::new();

    for record in store {
        stats.total_messages += 1;
        stats.total_words += record.word_count();
        months.insert(record.year_month());
        match record.kind() {
            MessageKind::Media => stats.media_messages += 1,
            MessageKind::Deleted => stats.deleted_messages += 1,
            MessageKind::Text => {}
        }
        let ts = record.timestamp();
        stats.first_message = Some(stats.first_message.map_or(ts, |first| first.min(ts)));
        stats.last_message = Some(stats.last_message.map_or(ts, |last| last.max(ts)));
    }

    stats.distinct_months = months.len();
    stats.distinct_senders = store.senders().len();
    stats
}

/// Computes message and word counts per sender.
pub fn per_person_stats(store: &RecordStore) -> PerPersonStats {
    let mut stats = PerPersonStats::default();
    for record in store {
        let entry = stats.entry(record.sender());
        entry.messages += 1;
        entry.words += record.word_count();
    }
    stats
}

/// Computes the dense hour-of-day histogram.
pub fn hourly_activity(store: &RecordStore) -> HourlyActivity {
    let mut hourly = HourlyActivity::new();
    for record in store {
        hourly.record(record.hour());
    }
    hourly
}

/// Computes per-month counts and per-month top words.
pub fn monthly_breakdown(store: &RecordStore, config: &AnalysisConfig) -> MonthlyBreakdown {
    let mut months: BTreeMap<YearMonth, (usize, usize, WordCounter)> = BTreeMap::new();
    for record in store {
        let (messages, words, counter) = months.entry(record.year_month()).or_default();
        *messages += 1;
        *words += record.word_count();
        counter.add_record(record, config);
    }

    months
        .into_iter()
        .map(|(month, (messages, words, counter))| {
            let stats = MonthStats {
                messages,
                words,
                top_words: counter.top(config.top_word_count),
            };
            (month, stats)
        })
        .collect()
}

/// Ranks the `n` most frequent words in `scope`.
///
/// An unknown sender yields an empty list; an empty store is an error.
pub fn top_words(
    store: &RecordStore,
    scope: WordScope<'_>,
    n: usize,
    config: &AnalysisConfig,
) -> Result<Vec<WordFrequency>> {
    if store.is_empty() {
        return Err(ChatlensError::EmptyCorpus);
    }
    let counter = match scope {
        WordScope::Overall => WordCounter::from_records(store, config),
        WordScope::Sender(sender) => WordCounter::from_records(store.filter_by_sender(sender), config),
    };
    Ok(counter.top(n))
}

/// Ranks the `n` most frequent words of every sender in one pass.
pub fn top_words_by_sender(
    store: &RecordStore,
    n: usize,
    config: &AnalysisConfig,
) -> Result<BTreeMap<String, Vec<WordFrequency>>> {
    if store.is_empty() {
        return Err(ChatlensError::EmptyCorpus);
    }
    let mut counters: HashMap<&str, WordCounter> = HashMap::new();
    for record in store {
        counters
            .entry(record.sender())
            .or_default()
            .add_record(record, config);
    }
    Ok(counters
        .into_iter()
        .map(|(sender, counter)| (sender.to_string(), counter.top(n)))
        .collect())
}

/// Computes per-day and per-month rates over the conversation's span.
pub fn averages(store: &RecordStore) -> Result<Averages> {
    let overall = overall_stats(store);
    let (Some(first), Some(last)) = (overall.first_message, overall.last_message) else {
        return Err(ChatlensError::EmptyCorpus);
    };

    let span_days = u64::try_from((last.date() - first.date()).num_days()).unwrap_or(0) + 1;
    let span_months = YearMonth::of(first.date()).span_to(YearMonth::of(last.date()));

    let messages = overall.total_messages as f64;
    let words = overall.total_words as f64;
    Ok(Averages {
        span_days,
        span_months,
        messages_per_day: messages / span_days as f64,
        words_per_day: words / span_days as f64,
        messages_per_month: messages / f64::from(span_months),
        words_per_month: words / f64::from(span_months),
    })
}

/// Borrowing front-end over the free functions.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    store: &'a RecordStore,
    config: &'a AnalysisConfig,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a RecordStore, config: &'a AnalysisConfig) -> Self {
        Self { store, config }
    }

    pub fn overall_stats(&self) -> OverallStats {
        overall_stats(self.store)
    }

    pub fn per_person_stats(&self) -> PerPersonStats {
        per_person_stats(self.store)
    }

    pub fn hourly_activity(&self) -> HourlyActivity {
        hourly_activity(self.store)
    }

    pub fn monthly_breakdown(&self) -> MonthlyBreakdown {
        monthly_breakdown(self.store, self.config)
    }

    pub fn top_words(&self, scope: WordScope<'_>, n: usize) -> Result<Vec<WordFrequency>> {
        top_words(self.store, scope, n, self.config)
    }

    pub fn averages(&self) -> Result<Averages> {
        averages(self.store)
    }

    /// Messages sent by `sender`, in original order.
    pub fn messages_of(&self, sender: &'a str) -> impl Iterator<Item = &'a MessageRecord> {
        self.store.filter_by_sender(sender)
    }
}

/// Every statistic for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub overall: OverallStats,
    pub per_person: PerPersonStats,
    pub hourly: HourlyActivity,
    pub monthly: MonthlyBreakdown,
    pub top_words: Vec<WordFrequency>,
    pub top_words_by_sender: BTreeMap<String, Vec<WordFrequency>>,
    pub averages: Averages,
}

impl Analysis {
    /// Computes every statistic on the calling thread.
    pub fn compute(store: &RecordStore, config: &AnalysisConfig) -> Result<Self> {
        if store.is_empty() {
            return Err(ChatlensError::EmptyCorpus);
        }
        debug!("Aggregating {} records sequentially", store.len());
        let n = config.top_word_count;
        Ok(Self {
            overall: overall_stats(store),
            per_person: per_person_stats(store),
            hourly: hourly_activity(store),
            monthly: monthly_breakdown(store, config),
            top_words: top_words(store, WordScope::Overall, n, config)?,
            top_words_by_sender: top_words_by_sender(store, n, config)?,
            averages: averages(store)?,
        })
    }

    /// Computes the same statistics as [`compute`](Self::compute) with the
    /// independent aggregations running concurrently.
    #[cfg(feature = "parallel")]
    pub fn compute_parallel(store: &RecordStore, config: &AnalysisConfig) -> Result<Self> {
        if store.is_empty() {
            return Err(ChatlensError::EmptyCorpus);
        }
        debug!("Aggregating {} records in parallel", store.len());
        let n = config.top_word_count;

        let ((overall, per_person), ((hourly, monthly), (words, (by_sender, averages)))) =
            rayon::join(
                || rayon::join(|| overall_stats(store), || per_person_stats(store)),
                || {
                    rayon::join(
                        || rayon::join(|| hourly_activity(store), || monthly_breakdown(store, config)),
                        || {
                            rayon::join(
                                || top_words(store, WordScope::Overall, n, config),
                                || {
                                    rayon::join(
                                        || top_words_by_sender(store, n, config),
                                        || averages(store),
                                    )
                                },
                            )
                        },
                    )
                },
            );

        Ok(Self {
            overall,
            per_person,
            hourly,
            monthly,
            top_words: words?,
            top_words_by_sender: by_sender?,
            averages: averages?,
        })
    }
}
