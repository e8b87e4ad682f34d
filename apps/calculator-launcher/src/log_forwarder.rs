//! Relay child stdout/stderr into the launcher's tracing output.
//!
//! Each line is re-emitted with the child's service name and stream, at the
//! level the child itself logged it with.

use std::borrow::Cow;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Stdout => write!(f, "stdout"),
            StreamKind::Stderr => write!(f, "stderr"),
        }
    }
}

/// Remove ANSI escape sequences (SGR colors and other CSI sequences).
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.contains('\x1b') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        // CSI: parameters and intermediates up to a final byte in '@'..='~'.
        if chars.next() == Some('[') {
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        }
    }
    Cow::Owned(out)
}

/// Detect the level of a `tracing-subscriber` line, plain, colored or JSON.
///
/// ```text
/// 2025-12-08T00:10:18.2852399Z  INFO calculator::server: Server listening
/// {"timestamp":"...","level":"WARN","fields":{"message":"..."},"target":"..."}
/// ```
///
/// Unrecognized lines fall back to `INFO` on stdout and `ERROR` on stderr.
pub fn detect_log_level(line: &str, stream: StreamKind) -> Level {
    let line = strip_ansi(line);
    detect_json_level(&line)
        .or_else(|| detect_plain_level(&line))
        .unwrap_or(match stream {
            StreamKind::Stdout => Level::INFO,
            StreamKind::Stderr => Level::ERROR,
        })
}

fn parse_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

fn detect_plain_level(line: &str) -> Option<Level> {
    let mut parts = line.split_whitespace();
    let _timestamp = parts.next()?;
    parse_level(parts.next()?)
}

fn detect_json_level(line: &str) -> Option<Level> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('{') || !trimmed.contains("\"level\"") {
        return None;
    }
    let v: Value = serde_json::from_str(trimmed).ok()?;
    parse_level(v.get("level")?.as_str()?)
}

macro_rules! relay {
    ($level:expr, $service:expr, $stream:expr, $line:expr) => {
        match $level {
            Level::ERROR => tracing::error!(service = %$service, stream = %$stream, "{}", $line),
            Level::WARN => tracing::warn!(service = %$service, stream = %$stream, "{}", $line),
            Level::INFO => tracing::info!(service = %$service, stream = %$stream, "{}", $line),
            Level::DEBUG => tracing::debug!(service = %$service, stream = %$stream, "{}", $line),
            Level::TRACE => tracing::trace!(service = %$service, stream = %$stream, "{}", $line),
        }
    };
}

fn forward_line(service: &str, stream: StreamKind, line: &str) {
    let line = strip_ansi(line);
    if line.trim().is_empty() {
        return;
    }
    relay!(detect_log_level(&line, stream), service, stream, line);
}

/// Spawn a task relaying `stream` line by line until EOF or cancellation.
pub fn spawn_stream_forwarder<S>(
    stream: S,
    service: String,
    kind: StreamKind,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    tracing::debug!(service = %service, stream = %kind, "log forwarder cancelled");
                    break;
                }

                result = lines.next_line() => match result {
                    Ok(Some(line)) => forward_line(&service, kind, &line),
                    Ok(None) => {
                        tracing::debug!(service = %service, stream = %kind, "log stream closed");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(service = %service, stream = %kind, error = %e, "log stream read error");
                        break;
                    }
                }
            }
        }
    })
}
