use serde::{Deserialize, Serialize};

use super::geometry::LonLat;

/// A rectangle in geographic degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Running min/max over every point, in one pass.
    ///
    /// Empty input yields `{+inf, -inf, +inf, -inf}`; callers must check
    /// [`GeoBounds::is_empty`] before projecting.
    pub fn from_coordinates<'a>(points: impl IntoIterator<Item = &'a LonLat>) -> Self {
        let mut bounds = Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for p in points {
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.max_lon = bounds.max_lon.max(p.lon);
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lat = bounds.max_lat.max(p.lat);
        }
        bounds
    }

    /// Pad each axis symmetrically by `ratio` times its span.
    pub fn expand(&self, ratio: f64) -> Self {
        let lon_pad = self.lon_span() * ratio;
        let lat_pad = self.lat_span() * ratio;
        Self {
            min_lon: self.min_lon - lon_pad,
            max_lon: self.max_lon + lon_pad,
            min_lat: self.min_lat - lat_pad,
            max_lat: self.max_lat + lat_pad,
        }
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn mid_lat(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }

    /// True for the sentinel produced by [`GeoBounds::from_coordinates`] on
    /// empty input, or any bounds with non-finite edges.
    pub fn is_empty(&self) -> bool {
        ![self.min_lon, self.max_lon, self.min_lat, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Inclusive containment.
    pub fn contains(&self, p: LonLat) -> bool {
        p.lon >= self.min_lon && p.lon <= self.max_lon && p.lat >= self.min_lat && p.lat <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_points() {
        let pts = [
            LonLat::new(141.0, 43.0),
            LonLat::new(145.5, 42.1),
            LonLat::new(139.9, 45.4),
        ];
        let b = GeoBounds::from_coordinates(&pts);
        assert_eq!(b, GeoBounds::new(139.9, 145.5, 42.1, 45.4));
        assert!(!b.is_empty());
    }

    #[test]
    fn empty_input_yields_inverted_infinities() {
        let b = GeoBounds::from_coordinates(std::iter::empty());
        assert_eq!(b.min_lon, f64::INFINITY);
        assert_eq!(b.max_lon, f64::NEG_INFINITY);
        assert_eq!(b.min_lat, f64::INFINITY);
        assert_eq!(b.max_lat, f64::NEG_INFINITY);
        assert!(b.is_empty());
    }

    #[test]
    fn expand_pads_each_axis_by_its_span() {
        let b = GeoBounds::new(140.0, 150.0, 40.0, 45.0).expand(0.1);
        assert!((b.min_lon - 139.0).abs() < 1e-9);
        assert!((b.max_lon - 151.0).abs() < 1e-9);
        assert!((b.min_lat - 39.5).abs() < 1e-9);
        assert!((b.max_lat - 45.5).abs() < 1e-9);
        assert!((b.mid_lat() - 42.5).abs() < 1e-9);
    }

    #[test]
    fn contains_is_inclusive() {
        let b = GeoBounds::new(145.0, 149.2, 43.0, 46.0);
        assert!(b.contains(LonLat::new(145.0, 46.0)));
        assert!(!b.contains(LonLat::new(144.99, 44.0)));
    }

    #[test]
    fn deserializes_camel_case() {
        let b: GeoBounds = serde_json::from_str(
            r#"{"minLon":139.2,"maxLon":146.4,"minLat":41.2,"maxLat":45.9}"#,
        )
        .unwrap();
        assert_eq!(b, GeoBounds::new(139.2, 146.4, 41.2, 45.9));
    }
}
