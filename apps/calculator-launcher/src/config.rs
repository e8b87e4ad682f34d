//! `calculator-launcher` configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bootstrap::LoggingConfig;

/// Environment prefix, e.g. `CALC_LAUNCHER__START_DELAY_MS=2000`.
pub const ENV_PREFIX: &str = "CALC_LAUNCHER__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// `calculator-server` executable; defaults to a sibling of the launcher.
    pub server_bin: Option<PathBuf>,
    /// `calculator-gateway` executable; defaults to a sibling of the launcher.
    pub gateway_bin: Option<PathBuf>,
    pub server_args: Vec<String>,
    pub gateway_args: Vec<String>,
    /// Pause between starting the backend and the gateway.
    pub start_delay_ms: u64,
    /// Time each child gets to exit after SIGTERM before it is killed.
    pub shutdown_grace_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            server_bin: None,
            gateway_bin: None,
            server_args: Vec::new(),
            gateway_args: Vec::new(),
            start_delay_ms: 1_000,
            shutdown_grace_ms: 5_000,
            logging: LoggingConfig::default(),
        }
    }
}

impl LauncherConfig {
    #[must_use]
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
