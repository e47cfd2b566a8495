//! Tracing/logging initialization.
//!
//! Filtering follows `RUST_LOG` (default `info`). Output is JSON unless the
//! host asks for the compact human-readable format.

use core::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::SystemTime;

/// Log line format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format '{0}' (expected 'json' or 'compact')")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "compact" | "text" => Ok(Self::Compact),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// Initialize JSON tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(LogFormat::default());
}

/// Initialize tracing with an explicit output format.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Compact ".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Compact));
    }

    #[test]
    fn rejects_unknown_formats() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert_eq!(err, UnknownLogFormat("xml".to_string()));
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init_with(LogFormat::Compact);
    }
}
