//! Entry header grammars.
//!
//! Every entry starts with a timestamp header. Two layouts exist and are
//! tried in a fixed order:
//!
//! | Grammar | Example |
//! |---------|---------|
//! | [`Grammar::Bracketed`] | `[15/01/2024, 10:30:45] Alice: Hello` |
//! | [`Grammar::Dashed`] | `15/01/2024, 10:30 - Alice: Hello` |
//!
//! Both accept `/`, `.` or `-` as date separator, 1-2 digit day and month,
//! 2 or 4 digit years, optional seconds and an optional 12-hour meridiem
//! (`AM`, `pm`, `a.m.`). The space before the meridiem may be a no-break
//! or narrow no-break space.
//!
//! The regex only decides where an entry begins. Whether the header is a
//! real calendar instant is decided by [`Header::timestamp`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

use crate::config::DateOrder;
use crate::error::Result;
use crate::parsing::classify::LRM;

const BOM: char = '\u{feff}';

/// Supported header layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `[date, time] rest` (iOS)
    Bracketed,
    /// `date, time - rest` (Android)
    Dashed,
}

impl Grammar {
    /// Grammars in the order they are tried.
    pub const ALL: [Grammar; 2] = [Grammar::Bracketed, Grammar::Dashed];

    /// Returns the regex pattern for this grammar.
    pub fn pattern(self) -> &'static str {
        match self {
            // [15/01/2024, 10:30:45 AM] rest
            Grammar::Bracketed => {
                r"(?s)^\[(?P<date>\d{1,2}[./-]\d{1,2}[./-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s*(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?\]\s?(?P<rest>.*)$"
            }
            // 15/01/2024, 10:30 - rest
            Grammar::Dashed => {
                r"(?s)^(?P<date>\d{1,2}[./-]\d{1,2}[./-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s*(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?\s[-\x{2013}]\s(?P<rest>.*)$"
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Grammar::Bracketed => "bracketed",
            Grammar::Dashed => "dashed",
        }
    }
}

/// Raw header components of one entry, borrowed from the entry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub grammar: Grammar,
    pub date: &'a str,
    pub time: &'a str,
    pub meridiem: Option<&'a str>,
    /// Everything after the header: `Sender: body` or a notice
    pub rest: &'a str,
}

impl<'a> Header<'a> {
    fn from_captures(grammar: Grammar, caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            grammar,
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            meridiem: caps.name("meridiem").map(|m| m.as_str()),
            rest: caps.name("rest").map_or("", |m| m.as_str()),
        })
    }

    /// Resolves the header into a local timestamp.
    ///
    /// The error names the offending component.
    pub fn timestamp(&self, order: DateOrder) -> std::result::Result<NaiveDateTime, String> {
        let date = parse_date(self.date, order)?;
        let time = parse_time(self.time, self.meridiem)?;
        Ok(date.and_time(time))
    }
}

fn parse_date(raw: &str, order: DateOrder) -> std::result::Result<NaiveDate, String> {
    let parts: Vec<&str> = raw.split(['/', '.', '-']).collect();
    let [first, second, year] = parts[..] else {
        return Err(format!("invalid date '{raw}'"));
    };
    let number = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| format!("invalid date '{raw}'"))
    };
    let (day, month) = match order {
        DateOrder::DayFirst => (number(first)?, number(second)?),
        DateOrder::MonthFirst => (number(second)?, number(first)?),
    };
    let year = match year.len() {
        2 => 2000 + number(year)?,
        4 => number(year)?,
        _ => return Err(format!("invalid year in date '{raw}'")),
    };
    let year = i32::try_from(year).map_err(|_| format!("invalid year in date '{raw}'"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("no such date '{raw}' (read as {order})"))
}

fn parse_time(raw: &str, meridiem: Option<&str>) -> std::result::Result<NaiveTime, String> {
    let mut fields = raw.split(':').map(str::parse::<u32>);
    let invalid = || format!("invalid time '{raw}'");
    let hour = fields.next().and_then(|f| f.ok()).ok_or_else(invalid)?;
    let minute = fields.next().and_then(|f| f.ok()).ok_or_else(invalid)?;
    let second = match fields.next() {
        Some(field) => field.map_err(|_| invalid())?,
        None => 0,
    };

    let hour = match meridiem.map(normalize_meridiem) {
        None => hour,
        Some(suffix) => {
            if !(1..=12).contains(&hour) {
                return Err(format!("hour out of range in 12-hour time '{raw}'"));
            }
            match (suffix.as_str(), hour) {
                ("am", 12) => 0,
                ("am", h) => h,
                ("pm", 12) => 12,
                ("pm", h) => h + 12,
                _ => return Err(format!("invalid meridiem in time '{raw}'")),
            }
        }
    };

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

fn normalize_meridiem(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Strips the byte-order mark and LRM that may precede a header.
pub fn strip_header_marks(line: &str) -> &str {
    line.trim_start_matches([BOM, LRM])
}

/// Compiled header grammars.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    grammars: Vec<(Grammar, Regex)>,
}

impl HeaderMatcher {
    /// Compiles all grammars.
    pub fn new() -> Result<Self> {
        let grammars = Grammar::ALL
            .iter()
            .map(|&grammar| -> Result<(Grammar, Regex)> {
                Ok((grammar, Regex::new(grammar.pattern())?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { grammars })
    }

    /// Returns `true` if `line` starts a new entry.
    pub fn is_header(&self, line: &str) -> bool {
        let line = strip_header_marks(line);
        self.grammars.iter().any(|(_, regex)| regex.is_match(line))
    }

    /// Splits an entry into its header components using the first grammar
    /// that matches.
    pub fn split<'a>(&self, entry: &'a str) -> Option<Header<'a>> {
        let entry = strip_header_marks(entry);
        self.grammars.iter().find_map(|(grammar, regex)| {
            regex
                .captures(entry)
                .and_then(|caps| Header::from_captures(*grammar, &caps))
        })
    }
}
