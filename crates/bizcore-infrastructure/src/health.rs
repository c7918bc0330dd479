//! Provider health reporting types
//!
//! The provider manager's background loop produces a snapshot of
//! [`ProviderHealth`] records, one per managed provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health state of a single provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Provider responded to its last health check
    Up,
    /// Provider failed or timed out on its last health check
    Down,
}

impl HealthStatus {
    /// Whether this status counts as healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Result of a single provider health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Provider name as registered
    pub provider: String,
    /// Provider category (database, auth, ...)
    pub category: String,
    /// Outcome of the check
    pub status: HealthStatus,
    /// Failure detail when the check did not pass
    pub message: Option<String>,
    /// When the check completed
    pub checked_at: DateTime<Utc>,
}

impl ProviderHealth {
    /// Record a passing check
    pub fn healthy(category: &str, provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            category: category.to_string(),
            status: HealthStatus::Up,
            message: None,
            checked_at: Utc::now(),
        }
    }

    /// Record a failing check
    pub fn failed(category: &str, provider: &str, message: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            category: category.to_string(),
            status: HealthStatus::Down,
            message: Some(message.into()),
            checked_at: Utc::now(),
        }
    }
}
