//! Data Transfer Objects
//!
//! Query-string and response types for the API endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for station listing
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Listing bucket; stations are sharded over small integer buckets
    #[serde(default)]
    pub bucket: i32,
}

/// Query parameters for sensor-parameter frequency lookup
#[derive(Debug, Deserialize)]
pub struct FrequenciesQuery {
    pub sensor_id: Uuid,
    pub parameter_id: Uuid,
    pub parameter_type: String,
}

/// Query parameters for single- and profile-parameter measurement endpoints
#[derive(Debug, Deserialize)]
pub struct MeasurementQuery {
    pub sensor_id: Uuid,
    pub parameter_id: Uuid,
    pub qc_level: i32,
    #[serde(default)]
    pub from_timestamp: Option<i64>,
    #[serde(default)]
    pub to_timestamp: Option<i64>,
    /// ASC or DESC; defaults to DESC
    #[serde(default)]
    pub order_by: Option<String>,
    /// Comma-separated subset of min,avg,max
    #[serde(default)]
    pub data_sets: Option<String>,
}

/// Query parameters for group measurement endpoints
#[derive(Debug, Deserialize)]
pub struct GroupMeasurementQuery {
    pub qc_level: i32,
    #[serde(default)]
    pub from_timestamp: Option<i64>,
    #[serde(default)]
    pub to_timestamp: Option<i64>,
    /// ASC or DESC; defaults to DESC
    #[serde(default)]
    pub order_by: Option<String>,
    /// rows or chart; only the adaptive endpoint honors this
    #[serde(default)]
    pub format: Option<String>,
}

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
