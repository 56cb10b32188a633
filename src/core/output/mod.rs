//! Boundary writers.
//!
//! Records and statistics leave the library only through these functions:
//! - [`write_csv`] / [`to_csv`] - records as CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - records as JSON Lines - requires `json-output` feature
//! - [`write_json`] / [`to_json`] - an [`Analysis`](crate::core::stats::Analysis) as pretty JSON - requires `json-output` feature
//! - [`write_text`] / [`to_text`] - an analysis as a plain-text report
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::output::{to_text, write_json, write_jsonl};
//! use chatlens::core::stats::Analysis;
//! use chatlens::parser::ingest_path;
//!
//! let config = AnalysisConfig::new();
//! let ingest = ingest_path("chat.txt", &config)?;
//! let analysis = Analysis::compute(&ingest.store, &config)?;
//!
//! write_json(&analysis, &ingest.report, "analysis.json")?;
//! write_jsonl(&ingest.store, "records.jsonl")?;
//! println!("{}", to_text(&analysis, &ingest.report));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl, write_jsonl_to};
pub use text_writer::{TextReport, to_text, write_ingest_summary, write_text};
