//! CSV output writer for parsed records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::message::MessageRecord;

const HEADER: [&str; 5] = ["Timestamp", "Sender", "Kind", "Words", "Body"];

/// Writes records as CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Kind`, `Words`, `Body`
/// - Timestamps as `YYYY-MM-DD HH:MM:SS`; multi-line bodies are quoted
pub fn write_csv<'a, I>(records: I, output_path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let file = File::create(output_path)?;
    write_csv_to(records, file)
}

/// Writes records as CSV to any writer.
pub fn write_csv_to<'a, I, W>(records: I, writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(build_record(record))?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a CSV string.
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut buffer = Vec::new();
    write_csv_to(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn build_record(record: &MessageRecord) -> [String; 5] {
    [
        record.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        record.sender().to_string(),
        record.kind().to_string(),
        record.word_count().to_string(),
        record.body().to_string(),
    ]
}
