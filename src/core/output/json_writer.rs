//! JSON output writer for analysis results.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::stats::Analysis;
use crate::error::Result;
use crate::parser::IngestReport;

/// Top-level JSON document: the ingest report next to every statistic.
#[derive(Serialize)]
struct AnalysisDocument<'a> {
    ingest: &'a IngestReport,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

/// Writes an analysis to a pretty-printed JSON file.
///
/// # Format
/// ```json
/// {
///   "ingest": { "logical_lines": 4, "messages": 2, "skipped": 1, ... },
///   "overall": { "total_messages": 2, ... },
///   "per_person": { "Alice": { "messages": 1, "words": 2 } },
///   "hourly": [0, 0, ...],
///   "monthly": { "2024-01": { "messages": 2, ... } },
///   "top_words": [{ "word": "hello", "count": 2 }],
///   ...
/// }
/// ```
pub fn write_json(
    analysis: &Analysis,
    report: &IngestReport,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let json = to_json(analysis, report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts an analysis to a pretty-printed JSON string.
pub fn to_json(analysis: &Analysis, report: &IngestReport) -> Result<String> {
    let document = AnalysisDocument {
        ingest: report,
        analysis,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
