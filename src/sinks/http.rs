//! HTTP ingest sink for remote delivery
//!
//! Posts one JSON object per record to a log-ingestion endpoint,
//! authenticating with a bearer token supplied at construction time.

use crate::core::{LoggerError, LogRecord, Metadata, Result, SinkError};
use crate::sinks::LogSink;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;

/// Remote ingestion implementation of [`LogSink`] over HTTP.
pub struct HttpSink {
    client: Client,
    endpoint: String,
}

impl HttpSink {
    /// Construct a new sink for the given credential token and
    /// endpoint URL (scheme already normalized).
    ///
    /// # Errors
    ///
    /// Fails fast with a configuration error when the token is blank or
    /// not representable as an HTTP header value.
    pub fn new(token: &str, endpoint: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(LoggerError::config("HttpSink", "credential token is blank"));
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            LoggerError::config("HttpSink", "credential token contains invalid characters")
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LoggerError::config("HttpSink", e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct IngestRow<'a> {
    dt: String,
    level: &'static str,
    message: &'a str,
    metadata: &'a Metadata,
}

#[async_trait]
impl LogSink for HttpSink {
    async fn submit(&self, record: &LogRecord) -> std::result::Result<(), SinkError> {
        let row = IngestRow {
            dt: record.timestamp.to_rfc3339(),
            level: record.level.name(),
            message: &record.message,
            metadata: &record.metadata,
        };

        let resp = self.client.post(&self.endpoint).json(&row).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(format!("ingest endpoint returned status {}: {}", status, text).into())
        }
    }

    // The client delivers per submission and keeps no local buffer.
    async fn drain(&self) -> std::result::Result<(), SinkError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
