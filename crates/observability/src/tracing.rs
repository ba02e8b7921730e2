//! Tracing/logging initialization.
//!
//! `RUST_LOG` selects the filter (default `info`); `PERIODCOST_LOG_FORMAT`
//! selects `json` (default) or `pretty` output.

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "PERIODCOST_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = lookup(EnvFilter::DEFAULT_ENV) {
            config.filter = filter;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR).as_deref().and_then(LogFormat::parse) {
            config.format = format;
        }
        config
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Logs go to
/// stderr so stdout stays free for command output.
pub fn init(config: LogConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}
