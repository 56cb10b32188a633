//! Plain-text report renderer.
//!
//! The report always states how many entries were skipped, so a reader can
//! judge how complete the statistics are.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::stats::Analysis;
use crate::core::words::WordFrequency;
use crate::error::Result;
use crate::parser::IngestReport;

const BAR_WIDTH: usize = 40;
const SKIPPED_LINES_SHOWN: usize = 10;

/// Displayable text report over one analysis.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    analysis: &'a Analysis,
    report: &'a IngestReport,
}

impl<'a> TextReport<'a> {
    pub fn new(analysis: &'a Analysis, report: &'a IngestReport) -> Self {
        Self { analysis, report }
    }
}

fn word_list(words: &[WordFrequency]) -> String {
    if words.is_empty() {
        return "-".to_string();
    }
    words
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes the ingest summary; also used when there is nothing to analyze.
pub fn write_ingest_summary(f: &mut impl fmt::Write, report: &IngestReport) -> fmt::Result {
    writeln!(
        f,
        "Entries: {} ({} messages, {} system events, {} skipped)",
        report.logical_lines, report.messages, report.system_events, report.skipped
    )?;
    if report.has_skipped() {
        let shown: Vec<String> = report
            .skipped_lines
            .iter()
            .take(SKIPPED_LINES_SHOWN)
            .map(ToString::to_string)
            .collect();
        let more = report.skipped_lines.len().saturating_sub(SKIPPED_LINES_SHOWN);
        write!(f, "Skipped lines: {}", shown.join(", "))?;
        if more > 0 {
            write!(f, " (+{more} more)")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;

        writeln!(f, "Chat analysis")?;
        writeln!(f, "=============")?;
        write_ingest_summary(f, self.report)?;

        writeln!(f)?;
        writeln!(f, "Overview")?;
        writeln!(f, "  Messages: {}", a.overall.total_messages)?;
        writeln!(f, "  Words: {}", a.overall.total_words)?;
        writeln!(f, "  Senders: {}", a.overall.distinct_senders)?;
        writeln!(f, "  Months: {}", a.overall.distinct_months)?;
        if a.overall.media_messages + a.overall.deleted_messages > 0 {
            writeln!(
                f,
                "  Media: {}, deleted: {}",
                a.overall.media_messages, a.overall.deleted_messages
            )?;
        }
        if let (Some(first), Some(last)) = (a.overall.first_message, a.overall.last_message) {
            writeln!(f, "  First message: {}", first.format("%Y-%m-%d %H:%M"))?;
            writeln!(f, "  Last message: {}", last.format("%Y-%m-%d %H:%M"))?;
        }

        writeln!(f)?;
        writeln!(f, "Averages")?;
        let avg = &a.averages;
        writeln!(f, "  Span: {} days, {} months", avg.span_days, avg.span_months)?;
        writeln!(f, "  Messages per day: {:.2}", avg.messages_per_day)?;
        writeln!(f, "  Words per day: {:.2}", avg.words_per_day)?;
        writeln!(f, "  Messages per month: {:.2}", avg.messages_per_month)?;
        writeln!(f, "  Words per month: {:.2}", avg.words_per_month)?;

        writeln!(f)?;
        writeln!(f, "Top words")?;
        if a.top_words.is_empty() {
            writeln!(f, "  -")?;
        }
        for (rank, word) in a.top_words.iter().enumerate() {
            writeln!(f, "  {:>2}. {} ({})", rank + 1, word.word, word.count)?;
        }

        writeln!(f)?;
        writeln!(f, "People")?;
        let total = a.overall.total_messages;
        for (sender, stats) in a.per_person.by_message_count() {
            writeln!(
                f,
                "  {sender}: {} messages ({:.1}%), {} words, {:.2} words/message",
                stats.messages,
                stats.share_of(total),
                stats.words,
                stats.average_words_per_message()
            )?;
            let top = a.top_words_by_sender.get(sender).map_or(&[][..], Vec::as_slice);
            writeln!(f, "    top words: {}", word_list(top))?;
        }

        writeln!(f)?;
        writeln!(f, "Hourly activity")?;
        let max = a.hourly.iter().map(|(_, count)| count).max().unwrap_or(0);
        for (hour, count) in a.hourly.iter() {
            let bar = if max == 0 { 0 } else { count * BAR_WIDTH / max };
            writeln!(f, "  {hour:02}:00 {count:>6} {}", "#".repeat(bar))?;
        }
        if let Some((hour, count)) = a.hourly.peak() {
            writeln!(f, "  Peak: {hour:02}:00 ({count} messages)")?;
        }

        writeln!(f)?;
        writeln!(f, "Monthly breakdown")?;
        for (month, stats) in &a.monthly {
            writeln!(
                f,
                "  {}: {} messages, {} words; top: {}",
                month.long_name(),
                stats.messages,
                stats.words,
                word_list(&stats.top_words)
            )?;
        }
        Ok(())
    }
}

/// Renders the text report to a string.
pub fn to_text(analysis: &Analysis, report: &IngestReport) -> String {
    TextReport::new(analysis, report).to_string()
}

/// Writes the text report to a file.
pub fn write_text(
    analysis: &Analysis,
    report: &IngestReport,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(to_text(analysis, report).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::parser::ingest_str;

    fn render(export: &str) -> String {
        let config = AnalysisConfig::new();
        let ingest = ingest_str(export, &config).unwrap();
        let analysis = Analysis::compute(&ingest.store, &config).unwrap();
        to_text(&analysis, &ingest.report)
    }

    #[test]
    fn test_text_report_sections() {
        let text = render(
            "[01/01/2024, 10:00:00] Alice: hello world\n\
             [01/01/2024, 10:01:00] Bob: hello there\n",
        );
        assert!(text.contains("Entries: 2 (2 messages, 0 system events, 0 skipped)"));
        assert!(text.contains("  Messages: 2"));
        assert!(text.contains("   1. hello (2)"));
        assert!(text.contains("  Alice: 1 messages (50.0%), 2 words, 2.00 words/message"));
        assert!(text.contains("  10:00      2 ####"));
        assert!(text.contains("  Peak: 10:00 (2 messages)"));
        assert!(text.contains("  January 2024: 2 messages, 4 words; top: hello (2), world (1)"));
        assert!(!text.contains("Skipped lines"));
    }

    #[test]
    fn test_text_report_lists_skipped_lines() {
        let text = render(
            "[01/01/2024, 10:00:00] Alice: hello\n\
             [32/01/2024, 10:01:00] Bob: broken\n",
        );
        assert!(text.contains("1 skipped"));
        assert!(text.contains("Skipped lines: 2"));
    }

    #[test]
    fn test_ingest_summary_truncates() {
        let report = IngestReport {
            logical_lines: 12,
            messages: 0,
            system_events: 0,
            skipped: 12,
            skipped_lines: (1..=12).collect(),
        };
        let mut out = String::new();
        write_ingest_summary(&mut out, &report).unwrap();
        assert!(out.contains("Skipped lines: 1, 2, 3, 4, 5, 6, 7, 8, 9, 10 (+2 more)"));
    }
}
