//! Record storage and aggregation.
//!
//! This module contains:
//! - [`store`] - the append-only [`RecordStore`]
//! - [`buckets`] - hour-of-day and year-month aggregation keys
//! - [`words`] - tokenization and stable word ranking
//! - [`stats`] - the aggregation engine
//! - [`output`] - boundary writers (CSV, JSON, JSONL, text)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{Analysis, RecordStore};
//! use chatlens::config::AnalysisConfig;
//!
//! let empty = RecordStore::new();
//! assert!(Analysis::compute(&empty, &AnalysisConfig::new()).is_err());
//! ```

pub mod buckets;
pub mod output;
pub mod stats;
pub mod store;
pub mod words;

pub use buckets::{HourlyActivity, YearMonth};
pub use stats::{
    Aggregator, Analysis, Averages, MonthStats, MonthlyBreakdown, OverallStats, PerPersonStats,
    PersonStats, WordScope,
};
pub use store::RecordStore;
pub use words::{WordCounter, WordFrequency};
