//! Append-only, ordered storage for one run's records.
//!
//! Records keep the order they were appended in, which is the order of the
//! source file. Nothing is ever mutated or removed; aggregation borrows the
//! store immutably, so a fully populated store can be shared across threads.

use std::collections::{BTreeMap, HashSet};

use crate::core::buckets::YearMonth;
use crate::message::MessageRecord;

/// Ordered sequence of accepted messages.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MessageRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the end.
    pub fn append(&mut self, record: MessageRecord) {
        self.records.push(record);
    }

    /// All records in original order.
    ///
    /// The iterator is `Clone`, and every call starts from the beginning.
    pub fn all(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    /// Message count per sender.
    pub fn count_by_sender(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.sender().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Records whose timestamp falls in `year`/`month`, in original order.
    pub fn filter_by_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &MessageRecord> + Clone + '_ {
        let bucket = YearMonth::new(year, month);
        self.records
            .iter()
            .filter(move |record| record.year_month() == bucket)
    }

    /// Records from one sender, in original order.
    pub fn filter_by_sender<'a>(
        &'a self,
        sender: &'a str,
    ) -> impl Iterator<Item = &'a MessageRecord> + Clone + 'a {
        self.records
            .iter()
            .filter(move |record| record.sender() == sender)
    }

    /// Distinct senders in order of first appearance.
    pub fn senders(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(MessageRecord::sender)
            .filter(|sender| seen.insert(*sender))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the store, returning its records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }
}

impl FromIterator<MessageRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
