use serde::{Deserialize, Serialize};

use crate::models::domain::{HitLocation, PlacedMarker};

/// Response for the filter endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildFilterResponse {
    pub filters: String,
    /// URL-encoded form, ready to be used as a query parameter
    pub encoded: String,
}

/// Response for the marker layout endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LayoutMarkersResponse<'a> {
    #[serde(rename = "clusterCount")]
    pub cluster_count: usize,
    pub markers: Vec<PlacedMarker<HitLocation<'a>>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
