//! Service Finder - query construction and map-marker layout for the service directory
//!
//! This library turns a user's facet selection into a filter string for the
//! search index, and turns search hits into marker positions that do not
//! overlap when several results share a coordinate.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    build_filter_string, compute_grid_offset, group_hits_by_location, group_service_locations,
    FilterBuilder, LayoutError, MarkerLayout, DEFAULT_GRID_SPACING,
};
pub use crate::models::{Coordinate, CoordinateKey, GridOffset, Hit, HitLocation, Location, PlacedMarker, ServiceLocationEntry};
