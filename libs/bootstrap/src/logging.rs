//! Logging initialisation.

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `logging` section shared by every binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `info,calculator_gateway=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Map `-v` occurrences to a filter directive, `None` keeps the configured level.
#[must_use]
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Build the env filter: `RUST_LOG` wins, then `-v`, then the configured level.
fn build_filter(cfg: &LoggingConfig, verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = verbosity_directive(verbose).unwrap_or(cfg.level.as_str());
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global `tracing` subscriber.
///
/// Text output is colored only when stdout is a terminal, so piped output
/// (e.g. under `calculator-launcher`) stays plain.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) {
    let filter = build_filter(cfg, verbose);

    let (text, json) = match cfg.format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(std::io::stdout().is_terminal()),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_current_span(true).with_target(true)),
        ),
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .try_init()
        .is_err()
    {
        tracing::debug!("global tracing subscriber already installed");
    }
}
