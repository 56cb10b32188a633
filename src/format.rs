//! Output format types for the chatlens library.
//!
//! Two independent choices exist for a run: how the statistics are reported
//! ([`ReportFormat`]) and, optionally, how the parsed records are dumped
//! ([`RecordFormat`]). Neither depends on the CLI framework.
//!
//! # Example
//!
//! ```rust
//! use chatlens::format::{RecordFormat, ReportFormat};
//! use std::str::FromStr;
//!
//! assert_eq!(ReportFormat::from_str("json").unwrap(), ReportFormat::Json);
//! assert_eq!(RecordFormat::from_path("records.jsonl").unwrap(), RecordFormat::Jsonl);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::stats::Analysis;
use crate::error::{ChatlensError, Result};
use crate::message::MessageRecord;
use crate::parser::IngestReport;

/// Format of the statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Human-readable text (default)
    #[default]
    Text,

    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown report format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Format of the parsed-record dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum RecordFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON Lines - one record per line
    Jsonl,
}

impl RecordFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            RecordFormat::Csv => "csv",
            RecordFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "jsonl", "ndjson"]
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(RecordFormat::Csv),
            "jsonl" | "ndjson" => Ok(RecordFormat::Jsonl),
            _ => Err(ChatlensError::invalid_format(
                "records",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, jsonl"),
            )),
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFormat::Csv => write!(f, "CSV"),
            RecordFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(RecordFormat::Csv),
            "jsonl" | "ndjson" => Ok(RecordFormat::Jsonl),
            _ => Err(format!(
                "Unknown record format: '{}'. Expected one of: {}",
                s,
                RecordFormat::all_names().join(", ")
            )),
        }
    }
}

/// Renders a report in the specified format.
///
/// # Errors
///
/// Returns an error if the required feature for the format is not enabled.
pub fn report_to_string(
    analysis: &Analysis,
    report: &IngestReport,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(crate::core::output::to_text(analysis, report)),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::to_json(analysis, report),
        #[allow(unreachable_patterns)]
        _ => Err(ChatlensError::invalid_format(
            "report",
            format!("Report format {format} requires the 'json-output' feature to be enabled"),
        )),
    }
}

/// Writes a report to a file in the specified format.
pub fn write_report(
    analysis: &Analysis,
    report: &IngestReport,
    path: impl AsRef<Path>,
    format: ReportFormat,
) -> Result<()> {
    let rendered = report_to_string(analysis, report, format)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

/// Writes records to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_records<'a, I>(records: I, path: impl AsRef<Path>, format: RecordFormat) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    match format {
        #[cfg(feature = "csv-output")]
        RecordFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        RecordFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        #[allow(unreachable_patterns)]
        _ => Err(ChatlensError::invalid_format(
            "records",
            format!(
                "Record format {format} requires the '{}' feature to be enabled",
                match format {
                    RecordFormat::Csv => "csv-output",
                    RecordFormat::Jsonl => "json-output",
                }
            ),
        )),
    }
}
