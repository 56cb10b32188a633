//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`DateOrder`] - Date order options, convertible to [`config::DateOrder`](crate::config::DateOrder)
//! - [`ReportFormat`] - Report format options, convertible to [`format::ReportFormat`](crate::format::ReportFormat)
//!
//! [`Args::build_config`] merges an optional JSON config file, an optional
//! stop-word file and explicit flags into one [`AnalysisConfig`]. Flags win.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;

/// Parse a WhatsApp chat export and report who talks, when, and about what.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt --date-order month-first --top 20
    chatlens chat.txt --format json -o analysis.json
    chatlens chat.txt --records records.csv --stop-words extra.txt
    chatlens chat.txt --config chatlens.json -vv")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Day/month order of export dates [default: day-first]
    #[arg(short = 'd', long, value_enum)]
    pub date_order: Option<DateOrder>,

    /// Length of every ranked word list [default: 10]
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// File with extra stop words, one per line
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Ignore words shorter than this many characters [default: 1]
    #[arg(long, value_name = "N")]
    pub min_word_length: Option<usize>,

    /// Keep media and deletion placeholders as messages
    #[arg(long)]
    pub include_placeholders: bool,

    /// JSON file with analysis settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also dump parsed records (.csv or .jsonl)
    #[arg(long, value_name = "FILE")]
    pub records: Option<PathBuf>,

    /// Compute statistics on one thread
    #[arg(long)]
    pub sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default `env_logger` filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Builds the run configuration: config file, then stop-word file, then flags.
    pub fn build_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(order) = self.date_order {
            config.date_order = order.into();
        }
        if let Some(n) = self.top {
            config.top_word_count = n;
        }
        if let Some(len) = self.min_word_length {
            config.min_word_length = len;
        }
        if self.include_placeholders {
            config.include_placeholders = true;
        }
        if let Some(path) = &self.stop_words {
            config = config.with_extra_stop_words(read_word_list(path)?);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Loads a JSON config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Reads one word per line, skipping blank lines and `#` comments.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Date order options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// DD/MM/YYYY
    #[default]
    #[value(alias = "dmy")]
    DayFirst,

    /// MM/DD/YYYY
    #[value(alias = "mdy")]
    MonthFirst,
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::config::DateOrder::from(*self))
    }
}

// Conversion to library date order
impl From<DateOrder> for crate::config::DateOrder {
    fn from(order: DateOrder) -> crate::config::DateOrder {
        match order {
            DateOrder::DayFirst => crate::config::DateOrder::DayFirst,
            DateOrder::MonthFirst => crate::config::DateOrder::MonthFirst,
        }
    }
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text report (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Pretty-printed JSON document
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::ReportFormat::from(*self))
    }
}

// Conversion to library format type
impl From<ReportFormat> for crate::format::ReportFormat {
    fn from(format: ReportFormat) -> crate::format::ReportFormat {
        match format {
            ReportFormat::Text => crate::format::ReportFormat::Text,
            ReportFormat::Json => crate::format::ReportFormat::Json,
        }
    }
}
