//! File sink for local structured logging
//!
//! Writes each record as a single-line JSON object (JSONL format),
//! compatible with log aggregation tools that tail files.

use crate::core::{LoggerError, LogRecord, Result, SinkError};
use crate::sinks::LogSink;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct FileSink {
    path: String,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) the target file in append mode.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|e| LoggerError::file_sink(&path_str, e.to_string()))?;

        Ok(Self {
            path: path_str,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn submit(&self, record: &LogRecord) -> std::result::Result<(), SinkError> {
        let json = serde_json::to_string(record)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    async fn drain(&self) -> std::result::Result<(), SinkError> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
