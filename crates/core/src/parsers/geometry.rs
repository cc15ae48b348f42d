use serde_json::Value;

use super::ParseError;
use crate::model::{Geometry, LonLat, Ring};

/// Parse a bare GeoJSON geometry object.
pub fn parse_geometry(data: &[u8]) -> Result<Option<Geometry>, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    Ok(geometry_from_value(&value))
}

/// Convert a GeoJSON geometry value into a [`Geometry`].
///
/// Only `Polygon` and `MultiPolygon` are recognized; anything else, or a
/// value without a `coordinates` array, yields `None`. Vertices that are
/// not at least two finite numbers are skipped.
pub fn geometry_from_value(value: &Value) -> Option<Geometry> {
    let kind = value.get("type")?.as_str()?;
    let coordinates = value.get("coordinates")?.as_array()?;
    match kind {
        "Polygon" => Some(Geometry::Polygon(polygon_rings(coordinates))),
        "MultiPolygon" => Some(Geometry::MultiPolygon(
            coordinates
                .iter()
                .map(|polygon| polygon.as_array().map(|r| polygon_rings(r)).unwrap_or_default())
                .collect(),
        )),
        other => {
            tracing::debug!(kind = other, "ignoring non-polygonal geometry");
            None
        }
    }
}

fn polygon_rings(rings: &[Value]) -> Vec<Ring> {
    rings.iter().map(ring_from_value).collect()
}

fn ring_from_value(value: &Value) -> Ring {
    value
        .as_array()
        .map(|points| points.iter().filter_map(position_from_value).collect())
        .unwrap_or_default()
}

/// A GeoJSON position; extra elements such as altitude are ignored.
pub(crate) fn position_from_value(value: &Value) -> Option<LonLat> {
    let pos = value.as_array()?;
    let lon = pos.first()?.as_f64()?;
    let lat = pos.get(1)?.as_f64()?;
    (lon.is_finite() && lat.is_finite()).then(|| LonLat::new(lon, lat))
}
