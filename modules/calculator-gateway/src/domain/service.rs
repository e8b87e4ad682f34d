//! Domain service for calculator-gateway

use std::sync::Arc;

use calculator_sdk::{CalculatorClientV1, CalculatorError};
use tracing::{debug, error, instrument, warn};

use crate::config::LivenessProbe;

/// Orchestrates backend calls on behalf of the REST layer.
///
/// Holds the single process-wide calculator client. No other state is kept
/// between requests.
pub struct Service {
    client: Arc<dyn CalculatorClientV1>,
    probe: LivenessProbe,
}

impl Service {
    #[must_use]
    pub fn new(client: Arc<dyn CalculatorClientV1>, probe: LivenessProbe) -> Self {
        Self { client, probe }
    }

    /// Probe the backend. Issued on every gated request, never cached.
    ///
    /// # Errors
    /// Returns the probe's [`CalculatorError`] when the backend is unreachable or unhealthy.
    #[instrument(skip(self), fields(probe = ?self.probe))]
    pub async fn check_liveness(&self) -> Result<(), CalculatorError> {
        let result = match self.probe {
            LivenessProbe::Ping => self.client.ping().await,
            LivenessProbe::Add => self.client.add(0, 0).await.map(|_| ()),
        };
        if let Err(e) = &result {
            warn!(error = %e, "calculator backend liveness probe failed");
        }
        result
    }

    /// Add two numbers by delegating to the calculator backend.
    ///
    /// # Errors
    /// Returns the backend's [`CalculatorError`] unchanged.
    #[instrument(skip(self))]
    pub async fn add(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        debug!("Delegating addition to calculator service");

        match self.client.add(a, b).await {
            Ok(result) => {
                debug!(result, "Addition completed successfully");
                Ok(result)
            }
            Err(e) => {
                error!(a, b, error = %e, "Error calling calculator backend");
                Err(e)
            }
        }
    }
}
