//! JSON Lines (JSONL) output writer for parsed records.
//!
//! One record per line, in source order:
//! ```jsonl
//! {"timestamp":"2024-01-01T10:00:00","sender":"Alice","body":"hello world","word_count":2,"kind":"text","line":1}
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::message::MessageRecord;

/// Writes records to a JSONL file.
pub fn write_jsonl<'a, I>(records: I, output_path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let file = File::create(output_path)?;
    write_jsonl_to(records, BufWriter::new(file))
}

/// Writes records as JSONL to any writer.
pub fn write_jsonl_to<'a, I, W>(records: I, mut writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
    W: Write,
{
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut buffer = Vec::new();
    write_jsonl_to(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn record(sender: &str, body: &str) -> MessageRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        MessageRecord::new(ts, sender, body).unwrap().with_line(1)
    }

    #[test]
    fn test_write_jsonl_basic() {
        let records = vec![record("Alice", "hello world"), record("Bob", "line\nbreak")];
        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&records, temp_file.path()).unwrap();

        let reader = BufReader::new(std::fs::File::open(temp_file.path()).unwrap());
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["word_count"], 2);
        assert_eq!(first["timestamp"], "2024-01-01T10:00:00");

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["body"], "line\nbreak");
    }

    #[test]
    fn test_to_jsonl_empty() {
        let records: Vec<MessageRecord> = Vec::new();
        assert_eq!(to_jsonl(&records).unwrap(), "");
    }
}
