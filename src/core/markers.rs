use crate::core::{
    grid::{compute_grid_offset, LayoutError, DEFAULT_GRID_SPACING},
    grouping::{group_hits_by_location, group_service_locations, ClusterMember, LocationGroups},
};
use crate::models::{Hit, HitLocation, Location, PlacedMarker, ServiceLocationEntry};

/// Turns search hits into non-overlapping marker positions
///
/// # Pipeline Stages
/// 1. Group members by exact coordinate key
/// 2. Resolve each cluster's epicenter
/// 3. Spread clusters of more than one member on a grid around it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayout {
    spacing: f64,
}

impl Default for MarkerLayout {
    fn default() -> Self {
        Self::with_default_spacing()
    }
}

impl MarkerLayout {
    pub fn new(spacing: f64) -> Result<Self, LayoutError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(LayoutError::InvalidArgument(format!(
                "grid spacing must be a positive number, got {}",
                spacing
            )));
        }
        Ok(Self { spacing })
    }

    pub fn with_default_spacing() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Assign a marker position to every member of every cluster
    ///
    /// Markers come out cluster by cluster in key-first-seen order. The
    /// first member's coordinate is the epicenter of its cluster.
    pub fn place<T>(&self, groups: LocationGroups<T>) -> Result<Vec<PlacedMarker<T>>, LayoutError>
    where
        T: ClusterMember,
    {
        let mut markers = Vec::with_capacity(groups.values().map(Vec::len).sum());

        for (key, members) in groups {
            let total = members.len();
            let Some(first) = members.first() else {
                continue;
            };
            let epicenter = first.location().to_point()?;
            let joined_key = key.to_string();

            if total > 1 {
                tracing::debug!("Spreading {} markers around {}", total, key);
            }

            for (index, member) in members.into_iter().enumerate() {
                let offset =
                    compute_grid_offset(index, total, epicenter.y(), epicenter.x(), self.spacing)?;

                markers.push(PlacedMarker {
                    member,
                    coordinate_key: joined_key.clone(),
                    cluster_size: total,
                    cluster_index: index,
                    lat: offset.offset_lat,
                    lng: offset.offset_lng,
                });
            }
        }

        Ok(markers)
    }

    /// Lay out the locations of a page of search hits
    pub fn layout_hits<'a>(
        &self,
        hits: &'a [Hit],
    ) -> Result<Vec<PlacedMarker<HitLocation<'a>>>, LayoutError> {
        let groups = group_hits_by_location(hits);
        tracing::debug!("Grouped {} hits into {} clusters", hits.len(), groups.len());
        self.place(groups)
    }

    /// Lay out the locations of a single service
    pub fn layout_service_locations<'a>(
        &self,
        locations: &'a [Location],
    ) -> Result<Vec<PlacedMarker<ServiceLocationEntry<'a>>>, LayoutError> {
        let groups = group_service_locations(locations);
        tracing::debug!(
            "Grouped {} service locations into {} clusters",
            locations.len(),
            groups.len()
        );
        self.place(groups)
    }
}
