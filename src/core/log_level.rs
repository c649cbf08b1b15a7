//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// The numeric encoding is lowest-is-most-severe: `Error = 0` up to
/// `Silly = 6`. A call is processed when its level is numerically less
/// than or equal to the logger's minimum level, so raising the minimum
/// towards `Silly` makes the logger chattier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Http = 3,
    Verbose = 4,
    Debug = 5,
    Silly = 6,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Http => "HTTP",
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Silly => "SILLY",
        }
    }

    /// Lowercase wire name, as delivered to sinks.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Http => "http",
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Silly => "silly",
        }
    }

    /// Whether a call at this level clears the configured minimum.
    #[inline]
    pub fn passes(self, min: Level) -> bool {
        self <= min
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Error => Red,
            Level::Warn => Yellow,
            Level::Info => Green,
            Level::Http => Magenta,
            Level::Verbose => Cyan,
            Level::Debug => Blue,
            Level::Silly => BrightBlack,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "HTTP" => Ok(Level::Http),
            "VERBOSE" => Ok(Level::Verbose),
            "DEBUG" => Ok(Level::Debug),
            "SILLY" => Ok(Level::Silly),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Debug < Level::Silly);
        assert_eq!(Level::Error as u8, 0);
        assert_eq!(Level::Silly as u8, 6);
    }

    #[test]
    fn test_passes_threshold() {
        assert!(Level::Error.passes(Level::Warn));
        assert!(Level::Warn.passes(Level::Warn));
        assert!(!Level::Debug.passes(Level::Warn));
        assert!(Level::Silly.passes(Level::Silly));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Verbose".parse::<Level>().unwrap(), Level::Verbose);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(Level::Http.name(), "http");
        assert_eq!(Level::Error.to_str(), "ERROR");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Level::Verbose).unwrap();
        assert_eq!(json, "\"verbose\"");
        let back: Level = serde_json::from_str("\"http\"").unwrap();
        assert_eq!(back, Level::Http);
    }
}
