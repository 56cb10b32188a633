//! Typed message records produced by the parser.
//!
//! A [`MessageRecord`] is immutable once created: fields are private and
//! `word_count` and `kind` are derived from the body at construction.
//!
//! # Example
//!
//! ```
//! use chatlens::{MessageKind, MessageRecord};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .and_then(|d| d.and_hms_opt(10, 0, 0))
//!     .unwrap();
//! let record = MessageRecord::new(ts, "Alice", "hello, world!").unwrap();
//!
//! assert_eq!(record.sender(), "Alice");
//! assert_eq!(record.word_count(), 2);
//! assert_eq!(record.kind(), MessageKind::Text);
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::core::buckets::YearMonth;
use crate::core::words::count_words;
use crate::parsing::classify::message_kind;

/// What an accepted message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Ordinary text
    Text,
    /// Media placeholder (`<Media omitted>`, `<attached: ...>`)
    Media,
    /// Deletion placeholder (`This message was deleted`)
    Deleted,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Text => write!(f, "text"),
            MessageKind::Media => write!(f, "media"),
            MessageKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// One accepted chat message.
///
/// | Field | Description |
/// |-------|-------------|
/// | `timestamp` | Local date and time from the entry header |
/// | `sender` | Display name exactly as exported |
/// | `body` | Full text including embedded newlines |
/// | `word_count` | Whitespace tokens after punctuation stripping |
/// | `kind` | Text or placeholder |
/// | `line` | 1-based source line of the entry header (0 if built directly) |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    timestamp: NaiveDateTime,
    sender: String,
    body: String,
    word_count: usize,
    kind: MessageKind,
    line: usize,
}

impl MessageRecord {
    /// Creates a record, deriving its kind and word count.
    ///
    /// Returns `None` if `sender` or `body` is empty or whitespace-only.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Option<Self> {
        let sender = sender.into();
        let body = body.into();
        if sender.trim().is_empty() || body.trim().is_empty() {
            return None;
        }

        let kind = message_kind(&body);
        let word_count = count_words(&body, kind);
        Some(Self {
            timestamp,
            sender,
            body,
            word_count,
            kind,
            line: 0,
        })
    }

    /// Builder method to set the source line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Hour-of-day bucket (0-23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Year-month bucket.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.timestamp.year(), self.timestamp.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_record_new() {
        let record = MessageRecord::new(ts(10), "Alice", "Hello there, friend!").unwrap();
        assert_eq!(record.sender(), "Alice");
        assert_eq!(record.body(), "Hello there, friend!");
        assert_eq!(record.word_count(), 3);
        assert_eq!(record.kind(), MessageKind::Text);
        assert_eq!(record.line(), 0);
    }

    #[test]
    fn test_record_rejects_empty_parts() {
        assert!(MessageRecord::new(ts(10), "", "hello").is_none());
        assert!(MessageRecord::new(ts(10), "Alice", "   ").is_none());
    }

    #[test]
    fn test_record_placeholder_has_no_words() {
        let record = MessageRecord::new(ts(10), "Bob", "<Media omitted>").unwrap();
        assert_eq!(record.kind(), MessageKind::Media);
        assert_eq!(record.word_count(), 0);
    }

    #[test]
    fn test_record_buckets() {
        let record = MessageRecord::new(ts(23), "Alice", "late").unwrap().with_line(7);
        assert_eq!(record.hour(), 23);
        assert_eq!(record.year_month(), YearMonth::new(2024, 3));
        assert_eq!(record.line(), 7);
    }

    #[test]
    fn test_record_body_keeps_newlines() {
        let record = MessageRecord::new(ts(9), "Alice", "first\n\nthird").unwrap();
        assert_eq!(record.body(), "first\n\nthird");
        assert_eq!(record.word_count(), 2);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_record_serialization() {
        let record = MessageRecord::new(ts(10), "Alice", "hi").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"sender\":\"Alice\""));
        assert!(json.contains("\"kind\":\"text\""));
        assert!(json.contains("2024-03-09T10:15:00"));
    }
}
