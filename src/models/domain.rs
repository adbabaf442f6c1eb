use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::grid::LayoutError;

/// A latitude or longitude exactly as the search index delivered it
///
/// Records arrive with coordinates either as JSON numbers or as numeric
/// strings. The raw textual form is kept so clustering can compare the
/// representations literally; arithmetic goes through [`Coordinate::to_degrees`].
///
/// A JSON number is rendered by `serde_json`, which keeps a fractional part:
/// `34.0` becomes `"34.0"`, where a JavaScript caller converting the same
/// number to a string gets `"34"`. Callers that mix numeric and string
/// coordinates for one place should send strings to get stable keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(serde_json::Number),
    Text(String),
}

impl Coordinate {
    /// Parse the coordinate into degrees
    ///
    /// Fails with `InvalidArgument` when the value is not a finite number.
    pub fn to_degrees(&self) -> Result<f64, LayoutError> {
        let degrees = match self {
            Coordinate::Number(n) => n.as_f64(),
            Coordinate::Text(s) => s.trim().parse::<f64>().ok(),
        };

        match degrees {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(LayoutError::InvalidArgument(format!(
                "coordinate {:?} is not a valid number",
                self.to_string()
            ))),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Number(n) => write!(f, "{}", n),
            Coordinate::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON number form
        serde_json::Number::from_f64(value)
            .map(Coordinate::Number)
            .unwrap_or_else(|| Coordinate::Text(value.to_string()))
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate::Text(value)
    }
}

/// A geographic point attached to a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(alias = "lat")]
    pub latitude: Coordinate,
    #[serde(alias = "lng")]
    pub longitude: Coordinate,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        latitude: impl Into<Coordinate>,
        longitude: impl Into<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            label: None,
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Clustering identity: latitude and longitude text joined as given
    ///
    /// No parsing or rounding happens here, so `"34.05"` and `"34.050"`
    /// produce different keys.
    pub fn coordinate_key(&self) -> String {
        self.cluster_key().to_string()
    }

    /// The raw (latitude, longitude) text pair locations are clustered on
    pub fn cluster_key(&self) -> CoordinateKey {
        CoordinateKey::new(self.latitude.to_string(), self.longitude.to_string())
    }

    /// Parsed position as a `geo` point (x = longitude, y = latitude)
    pub fn to_point(&self) -> Result<Point<f64>, LayoutError> {
        Ok(Point::new(
            self.longitude.to_degrees()?,
            self.latitude.to_degrees()?,
        ))
    }
}

/// Identity of a cluster: the raw latitude and longitude text, kept apart
///
/// Two locations share a cluster only when both components match exactly.
/// The joined form (`Display`, and the JSON map key) is the plain
/// concatenation, so distinct pairs like `("51.5", "10.12")` and
/// `("51.51", "0.12")` print alike but remain separate clusters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey {
    latitude: String,
    longitude: String,
}

impl CoordinateKey {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.latitude, self.longitude)
    }
}

impl Serialize for CoordinateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Search result record owning zero or more locations
///
/// Fields other than the identifier and locations are carried through
/// untouched for the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "objectID", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Hit {
    pub fn new(id: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            id: id.into(),
            locations,
            attributes: serde_json::Map::new(),
        }
    }
}

/// One (hit, location) pair inside a cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitLocation<'a> {
    pub hit: &'a Hit,
    pub location: &'a Location,
}

/// One location inside a cluster, tagged with its 1-based input position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceLocationEntry<'a> {
    pub location: &'a Location,
    #[serde(rename = "markerIndex")]
    pub marker_index: usize,
}

/// Renderable position of one cluster member: epicenter plus grid displacement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridOffset {
    #[serde(rename = "offsetLat")]
    pub offset_lat: f64,
    #[serde(rename = "offsetLng")]
    pub offset_lng: f64,
}

impl From<GridOffset> for Point<f64> {
    fn from(offset: GridOffset) -> Self {
        Point::new(offset.offset_lng, offset.offset_lat)
    }
}

/// A cluster member with its final marker position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker<T> {
    #[serde(flatten)]
    pub member: T,
    #[serde(rename = "coordinateKey")]
    pub coordinate_key: String,
    #[serde(rename = "clusterSize")]
    pub cluster_size: usize,
    #[serde(rename = "clusterIndex")]
    pub cluster_index: usize,
    pub lat: f64,
    pub lng: f64,
}

impl<T> PlacedMarker<T> {
    pub fn position(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    /// Whether the marker was moved off its own coordinate
    pub fn is_displaced(&self) -> bool {
        self.cluster_size > 1
    }
}
