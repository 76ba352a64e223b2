//! Decoded-sample logging
//!
//! Persists decoded samples as they are emitted, one record per sample,
//! flushed immediately so a crash loses at most the record being written.

use crate::protocol::frame::CHANNEL_COUNT;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sample log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    /// `Time(ms),Data0..Data10` rows
    #[default]
    Csv,
    /// One JSON object per line
    JsonLines,
}

impl LogFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Csv => "csv",
            LogFormat::JsonLines => "jsonl",
        }
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    time_ms: i64,
    index: u64,
    values: &'a [u8],
}

/// Writes decoded samples to a log file.
pub struct SampleLogger {
    writer: BufWriter<File>,
    format: LogFormat,
}

impl SampleLogger {
    /// Create the log file, writing the CSV header when applicable.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be created or
    /// the header cannot be written.
    pub fn create(path: &Path, format: LogFormat) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        if format == LogFormat::Csv {
            write!(writer, "Time(ms)")?;
            for channel in 0..CHANNEL_COUNT {
                write!(writer, ",Data{channel}")?;
            }
            writeln!(writer)?;
            writer.flush()?;
        }
        Ok(Self { writer, format })
    }

    /// Append one decoded sample, stamped with the current epoch millis.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the record cannot be written.
    pub fn log(&mut self, index: u64, values: &[u8; CHANNEL_COUNT]) -> std::io::Result<()> {
        let time_ms = Utc::now().timestamp_millis();
        match self.format {
            LogFormat::Csv => {
                write!(self.writer, "{time_ms}")?;
                for value in values {
                    write!(self.writer, ",{value}")?;
                }
                writeln!(self.writer)?;
            }
            LogFormat::JsonLines => {
                let record = JsonRecord {
                    time_ms,
                    index,
                    values,
                };
                serde_json::to_writer(&mut self.writer, &record)?;
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");

        let mut logger = SampleLogger::create(&path, LogFormat::Csv).unwrap();
        logger.log(0, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
        logger.log(1, &[255; CHANNEL_COUNT]).unwrap();
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Time(ms),Data0,Data1,Data2,Data3,Data4,Data5,Data6,Data7,Data8,Data9,Data10"
        );
        assert!(lines[1].ends_with(",0,1,2,3,4,5,6,7,8,9,10"));
        assert_eq!(lines[2].split(',').count(), 1 + CHANNEL_COUNT);
    }

    #[test]
    fn test_jsonl_records_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");

        let mut logger = SampleLogger::create(&path, LogFormat::JsonLines).unwrap();
        logger.log(7, &[42; CHANNEL_COUNT]).unwrap();
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(record["index"], 7);
        assert_eq!(record["values"].as_array().unwrap().len(), CHANNEL_COUNT);
        assert!(record["time_ms"].as_i64().unwrap() > 0);
    }
}
