use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Hit, Location};

/// Request to build a filter string from the current facet selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildFilterRequest {
    #[serde(default, alias = "page_filter", rename = "pageFilter")]
    pub page_filter: Option<String>,
    #[serde(default)]
    pub eligibilities: Vec<String>,
}

/// Request to group a page of hits by coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupHitsRequest {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Request to group the locations of a single service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupServiceLocationsRequest {
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Request to lay out map markers for a page of hits
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LayoutMarkersRequest {
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[validate(range(min = 0.0000001, max = 1.0))]
    pub spacing: Option<f64>,
}

/// Request for a single grid position
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GridOffsetRequest {
    pub index: usize,
    #[validate(range(min = 1, max = 100000))]
    pub total: usize,
    #[serde(alias = "epicenter_lat", rename = "epicenterLat")]
    pub epicenter_lat: f64,
    #[serde(alias = "epicenter_lng", rename = "epicenterLng")]
    pub epicenter_lng: f64,
    #[validate(range(min = 0.0000001, max = 1.0))]
    pub spacing: Option<f64>,
}
