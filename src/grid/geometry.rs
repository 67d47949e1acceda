//! GeoJSON-shaped geometries and representative-point resolution.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair in decimal degrees.
///
/// Serialized as a two-element `[lon, lat]` array, matching GeoJSON order.
/// On input any further positions (altitude) are accepted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct LonLat {
    /// Longitude (negative = west).
    pub longitude: f64,
    /// Latitude (negative = south).
    pub latitude: f64,
}

impl LonLat {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl TryFrom<Vec<f64>> for LonLat {
    type Error = String;

    fn try_from(position: Vec<f64>) -> Result<Self, Self::Error> {
        match position[..] {
            [longitude, latitude, ..] => Ok(Self::new(longitude, latitude)),
            _ => Err(format!(
                "coordinate needs at least 2 numbers, got {}",
                position.len()
            )),
        }
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        [p.longitude, p.latitude]
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.longitude, self.latitude)
    }
}

/// Location of a grid component or balancing authority.
///
/// Any GeoJSON `type` other than the three supported ones deserializes to
/// [`Geometry::Unsupported`], which keeps the type name and never resolves to
/// a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point {
        coordinates: LonLat,
    },
    LineString {
        coordinates: Vec<LonLat>,
    },
    Polygon {
        /// Rings; the first is the outer ring.
        coordinates: Vec<Vec<LonLat>>,
    },
    Unsupported {
        /// GeoJSON `type` as written, e.g. `"MultiPoint"`.
        kind: String,
    },
}

/// Wire shape shared by every geometry type.
#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawGeometry::deserialize(deserializer)?;
        let coords = raw.coordinates;
        let geometry = match raw.kind.as_str() {
            "Point" => Self::Point {
                coordinates: serde_json::from_value(coords).map_err(de::Error::custom)?,
            },
            "LineString" => Self::LineString {
                coordinates: serde_json::from_value(coords).map_err(de::Error::custom)?,
            },
            "Polygon" => Self::Polygon {
                coordinates: serde_json::from_value(coords).map_err(de::Error::custom)?,
            },
            _ => Self::Unsupported { kind: raw.kind },
        };
        Ok(geometry)
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Geometry", 2)?;
        state.serialize_field("type", self.kind())?;
        match self {
            Self::Point { coordinates } => state.serialize_field("coordinates", coordinates)?,
            Self::LineString { coordinates } => {
                state.serialize_field("coordinates", coordinates)?
            }
            Self::Polygon { coordinates } => state.serialize_field("coordinates", coordinates)?,
            Self::Unsupported { .. } => state.skip_field("coordinates")?,
        }
        state.end()
    }
}

impl Geometry {
    /// Returns the single point used to look up weather for this geometry.
    ///
    /// - `Point` returns the point itself.
    /// - `LineString` returns the vertex at index `len / 2`; for an even vertex
    ///   count that is the second of the two middle vertices.
    /// - `Polygon` returns the unweighted mean of the outer ring's vertices as
    ///   stored (a closing vertex that repeats the first one is counted).
    /// - Empty lines/rings and unsupported kinds return `None`.
    pub fn representative_point(&self) -> Option<LonLat> {
        match self {
            Self::Point { coordinates } => Some(*coordinates),
            Self::LineString { coordinates } => coordinates.get(coordinates.len() / 2).copied(),
            Self::Polygon { coordinates } => {
                let ring = coordinates.first()?;
                if ring.is_empty() {
                    return None;
                }
                let n = ring.len() as f64;
                let lon = ring.iter().map(|p| p.longitude).sum::<f64>() / n;
                let lat = ring.iter().map(|p| p.latitude).sum::<f64>() / n;
                Some(LonLat::new(lon, lat))
            }
            Self::Unsupported { .. } => None,
        }
    }

    /// GeoJSON type name as read from the document.
    pub fn kind(&self) -> &str {
        match self {
            Self::Point { .. } => "Point",
            Self::LineString { .. } => "LineString",
            Self::Polygon { .. } => "Polygon",
            Self::Unsupported { kind } => kind,
        }
    }
}
