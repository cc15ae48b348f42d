use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees.
///
/// Serialized as a GeoJSON position, `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

/// A closed polygon boundary. The first and last points need not repeat.
pub type Ring = Vec<LonLat>;

/// The two polygonal GeoJSON geometry kinds.
///
/// In both variants, ring 0 of each polygon is the outer ring and the rest
/// are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}
