//! `calculator-server` configuration.

use serde::{Deserialize, Serialize};

use bootstrap::LoggingConfig;

/// Environment prefix, e.g. `CALC_SERVER__LISTEN_ADDR=127.0.0.1:6000`.
pub const ENV_PREFIX: &str = "CALC_SERVER__";

/// Default gRPC listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50051";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Socket address the gRPC server binds to.
    pub listen_addr: String,
    pub logging: LoggingConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            logging: LoggingConfig::default(),
        }
    }
}
