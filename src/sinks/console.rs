//! Console sink implementation
//!
//! Synchronous, infallible writer for the human-readable copy of every
//! accepted call. Unlike the [`LogSink`](crate::sinks::LogSink)
//! destinations this path never suspends and never reports an error.

use crate::core::{Level, LogRecord, Metadata, ServiceIdentity, TimestampFormat};
use colored::Colorize;
use serde_json::Value;
use std::io::Write;

/// Shape of a console line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineFormat {
    /// Human-readable text with a pretty-printed metadata block
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Clone)]
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    line_format: LineFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            line_format: LineFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            line_format: LineFormat::default(),
        }
    }

    /// Set the line format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use logship::sinks::{ConsoleSink, LineFormat};
    ///
    /// let sink = ConsoleSink::new().with_line_format(LineFormat::Json);
    /// ```
    #[must_use]
    pub fn with_line_format(mut self, format: LineFormat) -> Self {
        self.line_format = format;
        self
    }

    /// Set the timestamp format for this sink
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Write one line for the record. Errors go to stderr, everything
    /// else to stdout. Write failures are swallowed: the console copy
    /// must never disturb the caller.
    pub fn write(&self, record: &LogRecord) {
        let line = self.format_line(record);
        match record.level {
            Level::Error => {
                let _ = writeln!(std::io::stderr(), "{}", line);
            }
            _ => {
                let _ = writeln!(std::io::stdout(), "{}", line);
            }
        }
    }

    /// Render the record as the line `write` would emit.
    pub fn format_line(&self, record: &LogRecord) -> String {
        match self.line_format {
            LineFormat::Text => self.format_text(record),
            LineFormat::Json => {
                serde_json::to_string(record).unwrap_or_else(|_| record.message.clone())
            }
        }
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:7}", record.level.to_str())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:7}", record.level.to_str())
        };

        let timestamp_str = self.timestamp_format.format(&record.timestamp);
        let service = record
            .metadata
            .get("service")
            .and_then(Value::as_str)
            .unwrap_or("-");

        let base = format!(
            "[{}] [{}] {} - {}",
            timestamp_str, level_str, service, record.message
        );

        let extra = display_metadata(record);
        if extra.is_empty() {
            base
        } else {
            let rendered = serde_json::to_string_pretty(&Value::Object(extra))
                .unwrap_or_else(|_| String::from("{}"));
            format!("{} {}", base, rendered)
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Call metadata worth showing in the line body. Identity fields and
/// the delivery timestamp already appear in the line prefix.
fn display_metadata(record: &LogRecord) -> Metadata {
    record
        .metadata
        .iter()
        .filter(|(key, _)| {
            !ServiceIdentity::FIELDS.contains(&key.as_str()) && key.as_str() != "timestamp"
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Metadata;
    use serde_json::json;

    fn record_with(metadata: Metadata) -> LogRecord {
        LogRecord::new(Level::Info, "ready".to_string(), metadata)
    }

    fn base_metadata() -> Metadata {
        let Value::Object(map) = json!({
            "service": "checkout",
            "environment": "production",
            "version": "1.2.3",
            "timestamp": "2025-01-08T10:30:45.000Z",
        }) else {
            panic!("expected object")
        };
        map
    }

    #[test]
    fn test_text_line_contains_parts() {
        let sink = ConsoleSink::with_colors(false);
        let line = sink.format_line(&record_with(base_metadata()));

        assert!(line.contains("INFO"));
        assert!(line.contains("checkout"));
        assert!(line.contains("ready"));
    }

    #[test]
    fn test_identity_not_repeated_in_body() {
        let sink = ConsoleSink::with_colors(false);
        let line = sink.format_line(&record_with(base_metadata()));

        // The identity appears once, in the prefix, with no metadata block.
        assert!(!line.contains('{'));
    }

    #[test]
    fn test_call_metadata_pretty_printed() {
        let mut metadata = base_metadata();
        metadata.insert("request_id".to_string(), json!("r-17"));

        let sink = ConsoleSink::with_colors(false);
        let line = sink.format_line(&record_with(metadata));

        assert!(line.contains("request_id"));
        assert!(line.contains("r-17"));
    }

    #[test]
    fn test_json_line_is_valid_json() {
        let sink = ConsoleSink::with_colors(false).with_line_format(LineFormat::Json);
        let line = sink.format_line(&record_with(base_metadata()));

        let parsed: Value = serde_json::from_str(&line).expect("valid JSON line");
        assert_eq!(parsed["message"], "ready");
        assert_eq!(parsed["level"], "info");
    }
}
