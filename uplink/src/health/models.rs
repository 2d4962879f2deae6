//! Backend reachability status and the health endpoint's wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest known backend reachability.
///
/// Optimistic until the first probe resolves: `is_up` defaults to `true` and
/// `last_checked` stays absent, so the UI does not flash a "service
/// unavailable" indicator during startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendStatus {
    pub is_up: bool,
    pub last_checked: Option<DateTime<Utc>>,
}

impl Default for BackendStatus {
    fn default() -> Self {
        Self {
            is_up: true,
            last_checked: None,
        }
    }
}

/// JSON body the health endpoint reports.
///
/// Only `status == "healthy"` counts as up; `"starting"`, `"unhealthy"`, or
/// anything unrecognized resolves down.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
