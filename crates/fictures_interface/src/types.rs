//! Supporting types for driver capabilities.

use serde::{Deserialize, Serialize};

/// Health status of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Fully operational
    Healthy,
    /// Operational with reduced capability
    Degraded {
        /// Description of the degradation
        message: String,
    },
    /// Not operational
    Unhealthy {
        /// Description of the problem
        message: String,
    },
}

impl HealthStatus {
    /// True for [`HealthStatus::Healthy`].
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}
