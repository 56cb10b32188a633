//! # Chatlens
//!
//! A Rust library for parsing WhatsApp chat exports into typed message
//! records and aggregating conversation statistics.
//!
//! ## Overview
//!
//! Chatlens is a four-stage pipeline:
//! 1. **Line normalization** ([`parsing::normalize`]) repairs encoding
//!    artifacts and joins continuation lines into one logical line per entry
//! 2. **Message parsing** ([`parser`]) matches entry headers from iOS and
//!    Android exports, extracts [`MessageRecord`]s and classifies notices out
//! 3. **Record storage** ([`core::store`]) keeps accepted records in order
//! 4. **Aggregation** ([`core::stats`]) computes overall, per-person, hourly
//!    and monthly statistics plus stable word rankings
//!
//! Reports are produced at the boundary by [`core::output`] and [`format`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "[01/01/2024, 10:00:00] Alice: hello world\n\
//!                   [01/01/2024, 10:01:00] Bob: hello there\n";
//!
//!     let config = AnalysisConfig::new().with_top_word_count(2);
//!     let ingest = ingest_str(export, &config)?;
//!     let analysis = Analysis::compute(&ingest.store, &config)?;
//!
//!     assert_eq!(analysis.overall.total_messages, 2);
//!     let top: Vec<_> = analysis.top_words.iter().map(WordFrequency::as_pair).collect();
//!     assert_eq!(top, vec![("hello", 2), ("world", 1)]);
//!     Ok(())
//! }
//! ```
//!
//! ## Large Files
//!
//! [`ingest_path`](parser::ingest_path) streams the export from disk, so
//! memory grows with the number of records, not with the file size:
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! let config = AnalysisConfig::new();
//! let ingest = ingest_path("whatsapp_chat.txt", &config)?;
//! if ingest.report.has_skipped() {
//!     eprintln!("{} entries could not be parsed", ingest.report.skipped);
//! }
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`MessageParser`](parser::MessageParser) and the ingest pipeline
//! - [`parsing`] - header grammars, line normalizer, notice classification
//! - [`core`] - record store, aggregation engine, boundary writers
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig), [`DateOrder`](config::DateOrder)
//! - [`format`] - report and record format selection
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - unified error types ([`ChatlensError`], [`Result`])
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::{MessageKind, MessageRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::message::{MessageKind, MessageRecord};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Configuration
    pub use crate::config::{AnalysisConfig, DateOrder};

    // Parsing and ingest
    pub use crate::parser::{
        Ingest, IngestReport, MessageParser, Parsed, SystemEvent, ingest_path, ingest_reader,
        ingest_str,
    };

    // Storage and aggregation
    pub use crate::core::{
        Aggregator, Analysis, HourlyActivity, RecordStore, WordFrequency, WordScope, YearMonth,
    };

    // Output
    pub use crate::core::output::{to_text, write_text};
    pub use crate::format::{RecordFormat, ReportFormat, report_to_string, write_records};
}
