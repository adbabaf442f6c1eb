// Core algorithm exports
pub mod filters;
pub mod grid;
pub mod grouping;
pub mod markers;

pub use filters::{build_filter_string, escape_facet_value, FilterBuilder, DEFAULT_FACET_FIELD};
pub use grid::{compute_grid_offset, grid_displacement, GridDimensions, LayoutError, DEFAULT_GRID_SPACING};
pub use grouping::{group_by_coordinate, group_hits_by_location, group_service_locations, ClusterMember, LocationGroups};
pub use markers::MarkerLayout;
