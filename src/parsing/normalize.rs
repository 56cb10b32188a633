//! Line normalization: raw export bytes to logical lines.
//!
//! A *logical line* is one entry: its header line plus every following
//! physical line up to the next header. The normalizer reads the input
//! incrementally and yields logical lines as soon as the next header (or
//! end of input) proves them complete.
//!
//! - `\r\n`, `\n` and lone `\r` all end a physical line.
//! - A leading byte-order mark is dropped.
//! - Invalid UTF-8 is replaced with U+FFFD rather than rejected.
//! - Blank lines before the first entry are skipped. Blank lines inside an
//!   entry are kept; blank lines at the end of an entry are dropped.
//! - The first non-blank line must be a header, otherwise the input is
//!   [`MalformedInput`](crate::ChatlensError::MalformedInput).

use std::io::{BufRead, ErrorKind};

use crate::error::{ChatlensError, Result};
use crate::parsing::grammar::HeaderMatcher;

const BOM: char = '\u{feff}';

/// One entry's text, continuation lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line number of the header
    pub line: usize,
    pub text: String,
}

/// Iterator over the logical lines of an export.
///
/// Yields at most one error. After an error the iterator is exhausted.
pub struct LineNormalizer<R: BufRead> {
    reader: R,
    matcher: HeaderMatcher,
    byte_buffer: Vec<u8>,
    /// The last physical line ended in `\r`; a `\n` right after it belongs to it.
    after_cr: bool,
    line_number: usize,
    bytes_read: u64,
    pending: Option<LogicalLine>,
    pending_blank: Vec<String>,
    started: bool,
    finished: bool,
}

impl<R: BufRead> LineNormalizer<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self::with_matcher(reader, HeaderMatcher::new()?))
    }

    /// Creates a normalizer sharing already-compiled header grammars.
    pub fn with_matcher(reader: R, matcher: HeaderMatcher) -> Self {
        Self {
            reader,
            matcher,
            byte_buffer: Vec::with_capacity(4096),
            after_cr: false,
            line_number: 0,
            bytes_read: 0,
            pending: None,
            pending_blank: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Number of physical lines consumed so far.
    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    fn next_physical(&mut self) -> std::io::Result<Option<(usize, String)>> {
        self.byte_buffer.clear();
        let mut terminated = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    self.bytes_read += 1;
                    continue;
                }
            }

            let terminator = available.iter().position(|&b| b == b'\n' || b == b'\r');
            let (taken, ends_line) = match terminator {
                Some(end) => {
                    self.after_cr = available[end] == b'\r';
                    self.byte_buffer.extend_from_slice(&available[..end]);
                    (end + 1, true)
                }
                None => {
                    self.byte_buffer.extend_from_slice(available);
                    (available.len(), false)
                }
            };
            self.reader.consume(taken);
            self.bytes_read += taken as u64;
            if ends_line {
                terminated = true;
                break;
            }
        }

        if !terminated && self.byte_buffer.is_empty() {
            return Ok(None);
        }
        self.line_number += 1;

        let decoded = String::from_utf8_lossy(&self.byte_buffer);
        let text = if self.line_number == 1 {
            decoded.strip_prefix(BOM).unwrap_or(&decoded).to_string()
        } else {
            decoded.into_owned()
        };
        Ok(Some((self.line_number, text)))
    }

    fn start_entry(&mut self, line: usize, text: String) -> Option<LogicalLine> {
        self.pending_blank.clear();
        self.pending.replace(LogicalLine { line, text })
    }

    fn continue_entry(&mut self, text: &str) {
        if let Some(pending) = &mut self.pending {
            for blank in self.pending_blank.drain(..) {
                pending.text.push('\n');
                pending.text.push_str(&blank);
            }
            pending.text.push('\n');
            pending.text.push_str(text);
        }
    }
}

impl<R: BufRead> Iterator for LineNormalizer<R> {
    type Item = Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let (number, text) = match self.next_physical() {
                Ok(Some(physical)) => physical,
                Ok(None) => {
                    self.finished = true;
                    if !self.started {
                        return Some(Err(ChatlensError::malformed_input(
                            self.line_number.max(1),
                            "input contains no message entries",
                        )));
                    }
                    return self.pending.take().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            };

            if !self.started {
                if text.trim().is_empty() {
                    continue;
                }
                if !self.matcher.is_header(&text) {
                    self.finished = true;
                    return Some(Err(ChatlensError::malformed_input(
                        number,
                        "first entry does not start with a timestamp header",
                    )));
                }
                self.started = true;
                self.start_entry(number, text);
                continue;
            }

            if self.matcher.is_header(&text) {
                if let Some(done) = self.start_entry(number, text) {
                    return Some(Ok(done));
                }
            } else if text.trim().is_empty() {
                self.pending_blank.push(text);
            } else {
                self.continue_entry(&text);
            }
        }
    }
}

/// Normalizes an in-memory export into logical lines.
pub fn logical_lines(input: &str) -> Result<Vec<LogicalLine>> {
    LineNormalizer::new(input.as_bytes())?.collect()
}
