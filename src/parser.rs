//! Message parser and the streaming ingest pipeline.
//!
//! [`MessageParser`] turns one [`LogicalLine`] into a [`Parsed`] value: a
//! [`MessageRecord`] or a [`SystemEvent`]. Header lines whose timestamp is
//! not a real calendar instant fail with
//! [`UnparseableLine`](ChatlensError::UnparseableLine).
//!
//! The `ingest_*` functions run the whole pipeline (normalize, parse,
//! store) over a reader, string or file. Unparseable entries are counted
//! and skipped; structural and I/O failures abort.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//! use chatlens::parser::ingest_str;
//!
//! # fn main() -> chatlens::Result<()> {
//! let export = "[01/01/2024, 10:00:00] Alice: hello world\n\
//!               [01/01/2024, 10:02:00] Messages to this group are now secured with end-to-end encryption.\n\
//!               [31/02/2024, 10:03:00] Bob: no such day\n";
//!
//! let ingest = ingest_str(export, &AnalysisConfig::new())?;
//! assert_eq!(ingest.store.len(), 1);
//! assert_eq!(ingest.report.system_events, 1);
//! assert_eq!(ingest.report.skipped, 1);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{AnalysisConfig, DateOrder};
use crate::core::store::RecordStore;
use crate::error::{ChatlensError, Result};
use crate::message::{MessageKind, MessageRecord};
use crate::parsing::classify::{is_system_body, is_system_sender, message_kind};
use crate::parsing::grammar::HeaderMatcher;
use crate::parsing::normalize::{LineNormalizer, LogicalLine};

/// A timestamped entry that is not a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemEvent {
    pub timestamp: NaiveDateTime,
    /// Entry text after the header
    pub text: String,
    pub line: usize,
}

/// Outcome of parsing one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Message(MessageRecord),
    SystemEvent(SystemEvent),
}

impl Parsed {
    pub fn into_message(self) -> Option<MessageRecord> {
        match self {
            Parsed::Message(record) => Some(record),
            Parsed::SystemEvent(_) => None,
        }
    }
}

/// Splits `Sender: body` at the first unescaped colon that leaves a
/// single-line, non-empty sender and a non-empty body.
fn split_sender(rest: &str) -> Option<(&str, &str)> {
    let mut previous = None;
    for (i, c) in rest.char_indices() {
        if c == '\n' {
            return None;
        }
        if c == ':' && previous != Some('\\') {
            let sender = rest[..i].trim();
            let body = &rest[i + 1..];
            let body = body.strip_prefix(' ').unwrap_or(body);
            if !sender.is_empty() && !body.trim().is_empty() {
                return Some((sender, body));
            }
        }
        previous = Some(c);
    }
    None
}

/// Parses logical lines into records under a fixed date order.
#[derive(Debug, Clone)]
pub struct MessageParser {
    matcher: HeaderMatcher,
    date_order: DateOrder,
    include_placeholders: bool,
}

impl MessageParser {
    pub fn new(date_order: DateOrder) -> Result<Self> {
        Ok(Self::with_matcher(HeaderMatcher::new()?, date_order))
    }

    /// Creates a parser reusing compiled header grammars.
    pub fn with_matcher(matcher: HeaderMatcher, date_order: DateOrder) -> Self {
        Self {
            matcher,
            date_order,
            include_placeholders: false,
        }
    }

    /// Creates a parser honoring the date order and placeholder policy of
    /// `config`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(config.date_order)?.with_placeholders(config.include_placeholders))
    }

    /// Keeps placeholder entries as zero-word messages.
    #[must_use]
    pub fn with_placeholders(mut self, include: bool) -> Self {
        self.include_placeholders = include;
        self
    }

    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    pub fn matcher(&self) -> &HeaderMatcher {
        &self.matcher
    }

    /// Parses one logical line.
    ///
    /// The same line always yields the same result.
    pub fn parse_line(&self, line: &LogicalLine) -> Result<Parsed> {
        let header = self.matcher.split(&line.text).ok_or_else(|| {
            ChatlensError::unparseable_line(line.line, "no timestamp header")
        })?;
        let timestamp = header
            .timestamp(self.date_order)
            .map_err(|reason| ChatlensError::unparseable_line(line.line, reason))?;

        let system_event = || {
            Parsed::SystemEvent(SystemEvent {
                timestamp,
                text: header.rest.to_string(),
                line: line.line,
            })
        };

        let Some((sender, body)) = split_sender(header.rest) else {
            return Ok(system_event());
        };
        if is_system_sender(sender) || is_system_body(body) {
            return Ok(system_event());
        }
        if !self.include_placeholders && message_kind(body) != MessageKind::Text {
            return Ok(system_event());
        }

        match MessageRecord::new(timestamp, sender, body) {
            Some(record) => Ok(Parsed::Message(record.with_line(line.line))),
            None => Ok(system_event()),
        }
    }
}

/// Streaming iterator over parsed entries.
///
/// Yields [`UnparseableLine`](ChatlensError::UnparseableLine) errors as items
/// and keeps going; any other error ends the iteration.
pub struct ParseIterator<R: BufRead> {
    lines: LineNormalizer<R>,
    parser: MessageParser,
    logical_lines: usize,
}

impl<R: BufRead> ParseIterator<R> {
    pub fn new(reader: R, parser: MessageParser) -> Self {
        let lines = LineNormalizer::with_matcher(reader, parser.matcher().clone());
        Self {
            lines,
            parser,
            logical_lines: 0,
        }
    }

    /// Logical lines seen so far.
    pub fn logical_lines(&self) -> usize {
        self.logical_lines
    }

    /// Input bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.lines.bytes_processed()
    }
}

impl<R: BufRead> Iterator for ParseIterator<R> {
    type Item = Result<Parsed>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        self.logical_lines += 1;
        Some(self.parser.parse_line(&line))
    }
}

/// Counts describing how an export was ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Entries produced by the normalizer
    pub logical_lines: usize,
    /// Entries accepted as messages
    pub messages: usize,
    /// Entries classified out as system events
    pub system_events: usize,
    /// Entries skipped as unparseable
    pub skipped: usize,
    /// Source line numbers of the skipped entries
    pub skipped_lines: Vec<usize>,
}

impl IngestReport {
    pub fn has_skipped(&self) -> bool {
        self.skipped > 0
    }
}

impl std::fmt::Display for IngestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries: {} messages, {} system events, {} skipped",
            self.logical_lines, self.messages, self.system_events, self.skipped
        )
    }
}

/// Result of an ingest run.
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    pub store: RecordStore,
    pub report: IngestReport,
}

/// Opens a streaming parse over `reader`.
pub fn parse_reader<R: BufRead>(reader: R, config: &AnalysisConfig) -> Result<ParseIterator<R>> {
    let parser = MessageParser::from_config(config)?;
    debug!("Parsing with {} dates", parser.date_order());
    Ok(ParseIterator::new(reader, parser))
}

/// Runs the full pipeline over a buffered reader.
pub fn ingest_reader<R: BufRead>(reader: R, config: &AnalysisConfig) -> Result<Ingest> {
    config.validate()?;
    let mut entries = parse_reader(reader, config)?;
    let mut ingest = Ingest::default();

    for entry in entries.by_ref() {
        match entry {
            Ok(Parsed::Message(record)) => {
                ingest.report.messages += 1;
                ingest.store.append(record);
            }
            Ok(Parsed::SystemEvent(event)) => {
                debug!("Line {}: system event: {}", event.line, event.text);
                ingest.report.system_events += 1;
            }
            Err(ChatlensError::UnparseableLine { line, reason }) => {
                debug!("Skipping line {line}: {reason}");
                ingest.report.skipped += 1;
                ingest.report.skipped_lines.push(line);
            }
            Err(e) => return Err(e),
        }
    }
    ingest.report.logical_lines = entries.logical_lines();

    info!(
        "Ingested {} bytes: {}",
        entries.bytes_processed(),
        ingest.report
    );
    if ingest.report.has_skipped() {
        warn!(
            "{} unparseable entries were skipped (first at line {})",
            ingest.report.skipped,
            ingest.report.skipped_lines.first().copied().unwrap_or(0)
        );
    }
    Ok(ingest)
}

/// Runs the full pipeline over an in-memory export.
pub fn ingest_str(input: &str, config: &AnalysisConfig) -> Result<Ingest> {
    ingest_reader(input.as_bytes(), config)
}

/// Runs the full pipeline over an export file, streaming it from disk.
pub fn ingest_path(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Ingest> {
    config.validate()?;
    let path = path.as_ref();
    let file = File::open(path)?;
    info!("Reading {}", path.display());
    let reader = BufReader::with_capacity(config.buffer_size, file);
    ingest_reader(reader, config)
}
