//! Logger configuration and service identity
//!
//! Identity fields resolve in priority order: explicit configuration,
//! then process environment, then hard-coded defaults.

use super::log_level::Level;
use super::record::Metadata;
use serde_json::Value;

/// Credential token enabling remote delivery.
pub const SINK_TOKEN_ENV: &str = "LOGSHIP_SINK_TOKEN";

/// Remote ingestion host, scheme optional.
pub const SINK_ENDPOINT_ENV: &str = "LOGSHIP_SINK_ENDPOINT";

/// Logical service name.
pub const SERVICE_NAME_ENV: &str = "SERVICE_NAME";

/// Deployment environment, conventionally also the build-mode switch.
pub const ENVIRONMENT_ENV: &str = "APP_ENV";

/// Service version string.
pub const SERVICE_VERSION_ENV: &str = "SERVICE_VERSION";

/// Initial minimum severity.
pub const MIN_LEVEL_ENV: &str = "LOG_LEVEL";

pub const DEFAULT_SERVICE: &str = "unknown-service";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_VERSION: &str = "0.0.0";
pub const DEFAULT_SINK_ENDPOINT: &str = "in.logship.dev";

/// Read an environment variable or fall back to a provided default.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The `{service, environment, version}` triple identifying the
/// emitting application instance. Immutable once a logger is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub service: String,
    pub environment: String,
    pub version: String,
}

impl ServiceIdentity {
    /// Metadata keys the identity occupies in every record.
    pub const FIELDS: [&'static str; 3] = ["service", "environment", "version"];

    pub fn from_env() -> Self {
        Self {
            service: env_or(SERVICE_NAME_ENV, DEFAULT_SERVICE),
            environment: env_or(ENVIRONMENT_ENV, DEFAULT_ENVIRONMENT),
            version: env_or(SERVICE_VERSION_ENV, DEFAULT_VERSION),
        }
    }

    /// Derive a new identity, replacing exactly the fields a bind
    /// context names with string values.
    pub fn overridden_by(&self, context: &Metadata) -> Self {
        let mut derived = self.clone();
        if let Some(Value::String(s)) = context.get("service") {
            derived.service = s.clone();
        }
        if let Some(Value::String(s)) = context.get("environment") {
            derived.environment = s.clone();
        }
        if let Some(Value::String(s)) = context.get("version") {
            derived.version = s.clone();
        }
        derived
    }
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// Construction-time logger configuration.
///
/// `Default` is pure (hard-coded defaults only); [`LoggerConfig::from_env`]
/// additionally consults the process environment.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    pub min_level: Level,
    pub identity: ServiceIdentity,
    pub sink_token: Option<String>,
    pub sink_endpoint: Option<String>,
    pub file_path: Option<String>,
}

impl LoggerConfig {
    pub fn from_env() -> Self {
        Self {
            min_level: std::env::var(MIN_LEVEL_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            identity: ServiceIdentity::from_env(),
            sink_token: std::env::var(SINK_TOKEN_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty()),
            sink_endpoint: std::env::var(SINK_ENDPOINT_ENV).ok(),
            file_path: None,
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.identity.service = service.into();
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.identity.environment = environment.into();
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.identity.version = version.into();
        self
    }

    #[must_use]
    pub fn sink_token(mut self, token: impl Into<String>) -> Self {
        self.sink_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn sink_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sink_endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Full endpoint URL, scheme-normalized.
    pub fn endpoint_url(&self) -> String {
        normalize_endpoint(self.sink_endpoint.as_deref().unwrap_or(DEFAULT_SINK_ENDPOINT))
    }
}

/// A bare host is assumed to mean secure transport.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}
