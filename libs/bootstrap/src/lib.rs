#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
//! Shared process bootstrap for the calculator binaries.
//!
//! - `config`: defaults -> YAML file -> environment -> CLI layering via figment
//! - `logging`: `tracing-subscriber` initialisation (text or JSON)
//! - `signals`: Ctrl+C / SIGTERM handling wired to a `CancellationToken`

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{ConfigError, load_layered, to_yaml};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use signals::{shutdown_token, wait_for_shutdown};
