// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, CoordinateKey, GridOffset, Hit, HitLocation, Location, PlacedMarker, ServiceLocationEntry};
pub use requests::{BuildFilterRequest, GridOffsetRequest, GroupHitsRequest, GroupServiceLocationsRequest, LayoutMarkersRequest};
pub use responses::{BuildFilterResponse, ErrorResponse, HealthResponse, LayoutMarkersResponse};
