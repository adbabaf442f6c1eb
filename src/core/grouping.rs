use indexmap::IndexMap;

use crate::models::{CoordinateKey, Hit, HitLocation, Location, ServiceLocationEntry};

/// Clusters keyed by raw coordinate pair, in the order keys were first seen
pub type LocationGroups<T> = IndexMap<CoordinateKey, Vec<T>>;

/// Anything that sits at a location and can be clustered
pub trait ClusterMember {
    fn location(&self) -> &Location;
}

impl ClusterMember for HitLocation<'_> {
    fn location(&self) -> &Location {
        self.location
    }
}

impl ClusterMember for ServiceLocationEntry<'_> {
    fn location(&self) -> &Location {
        self.location
    }
}

/// Group members by exact coordinate key, keeping input order within each cluster
pub fn group_by_coordinate<T, I>(members: I) -> LocationGroups<T>
where
    T: ClusterMember,
    I: IntoIterator<Item = T>,
{
    let mut groups: LocationGroups<T> = IndexMap::new();
    for member in members {
        groups
            .entry(member.location().cluster_key())
            .or_default()
            .push(member);
    }
    groups
}

/// Group every location of every hit by coordinate key
///
/// A hit with several locations appears once per location, possibly in
/// several clusters.
pub fn group_hits_by_location(hits: &[Hit]) -> LocationGroups<HitLocation<'_>> {
    group_by_coordinate(hits.iter().flat_map(|hit| {
        hit.locations
            .iter()
            .map(move |location| HitLocation { hit, location })
    }))
}

/// Group a flat list of locations, tagging each with its 1-based input position
pub fn group_service_locations(locations: &[Location]) -> LocationGroups<ServiceLocationEntry<'_>> {
    group_by_coordinate(
        locations
            .iter()
            .enumerate()
            .map(|(i, location)| ServiceLocationEntry {
                location,
                marker_index: i + 1,
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, coords: &[(&str, &str)]) -> Hit {
        let locations = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| Location::new(format!("{}-{}", id, i), *lat, *lng))
            .collect();
        Hit::new(id, locations)
    }

    fn key(lat: &str, lng: &str) -> CoordinateKey {
        CoordinateKey::new(lat, lng)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_hits_by_location(&[]).is_empty());
        assert!(group_service_locations(&[]).is_empty());
    }

    #[test]
    fn test_hits_sharing_a_coordinate_cluster() {
        let hits = vec![
            hit("a", &[("34.05", "-118.25")]),
            hit("b", &[("40.71", "-74.00")]),
            hit("c", &[("34.05", "-118.25")]),
        ];

        let groups = group_hits_by_location(&hits);

        assert_eq!(groups.len(), 2);
        let keys: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["34.05-118.25", "40.71-74.00"]);

        let shared: Vec<&str> = groups[&key("34.05", "-118.25")].iter().map(|m| m.hit.id.as_str()).collect();
        assert_eq!(shared, vec!["a", "c"]);
    }

    #[test]
    fn test_hit_with_multiple_locations() {
        let hits = vec![hit("a", &[("1", "2"), ("3", "4"), ("1", "2")])];

        let groups = group_hits_by_location(&hits);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&key("1", "2")].len(), 2);
        assert_eq!(groups[&key("3", "4")].len(), 1);
    }

    #[test]
    fn test_hit_without_locations_contributes_nothing() {
        let hits = vec![hit("a", &[]), hit("b", &[("1", "2")])];
        let groups = group_hits_by_location(&hits);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_no_numeric_normalization() {
        let hits = vec![hit("a", &[("34.05", "1")]), hit("b", &[("34.050", "1")])];
        assert_eq!(group_hits_by_location(&hits).len(), 2);
    }

    #[test]
    fn test_same_joined_text_different_pairs_stay_apart() {
        let hits = vec![hit("a", &[("51.5", "10.12")]), hit("b", &[("51.51", "0.12")])];

        let groups = group_hits_by_location(&hits);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&key("51.5", "10.12")][0].hit.id, "a");
        assert_eq!(groups[&key("51.51", "0.12")][0].hit.id, "b");
    }

    #[test]
    fn test_marker_index_follows_input_position() {
        let locations = vec![
            Location::new("x", "1", "1"),
            Location::new("y", "2", "2"),
            Location::new("z", "1", "1"),
        ];

        let groups = group_service_locations(&locations);

        let first: Vec<usize> = groups[&key("1", "1")].iter().map(|e| e.marker_index).collect();
        assert_eq!(first, vec![1, 3]);
        assert_eq!(groups[&key("2", "2")][0].marker_index, 2);
    }

    #[test]
    fn test_malformed_coordinates_still_group() {
        let locations = vec![Location::new("x", "n/a", ""), Location::new("y", "n/a", "")];
        let groups = group_service_locations(&locations);
        assert_eq!(groups[&key("n/a", "")].len(), 2);
    }
}
