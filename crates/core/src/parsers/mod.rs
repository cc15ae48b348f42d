//! Parsers for the JSON payloads the catalog layer hands over: GeoJSON
//! geometry, iNaturalist place and observation responses, and monthly
//! histograms.
//!
//! A document that cannot be read at all is an error. Anything readable but
//! unusable inside it (an unsupported geometry type, a coordinate that is
//! not two numbers) degrades to "absent" instead.

pub mod geometry;
pub mod histogram;
pub mod observations;

use serde_json::Value;
use thiserror::Error;

use crate::model::Geometry;

pub use geometry::{geometry_from_value, parse_geometry};
pub use histogram::parse_histogram;
pub use observations::parse_observations;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("unable to detect boundary format")]
    UnknownFormat,
}

/// Read boundary geometry from any of the accepted shapes.
///
/// Detection strategy:
/// 1. An object with `results` is a place response; the geometry is
///    `results[0].geometry_geojson`.
/// 2. A `Feature` contributes its `geometry`.
/// 3. An object with `type` and `coordinates` is a bare geometry.
///
/// Returns `Ok(None)` when the document is recognized but carries no usable
/// polygonal geometry.
pub fn parse_boundary_auto(data: &[u8]) -> Result<Option<Geometry>, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj = value.as_object().ok_or(ParseError::UnknownFormat)?;

    if let Some(results) = obj.get("results") {
        let results = results.as_array().ok_or(ParseError::MissingField("results"))?;
        return Ok(results
            .first()
            .and_then(|place| place.get("geometry_geojson"))
            .and_then(geometry_from_value));
    }

    if obj.get("type").and_then(Value::as_str) == Some("Feature") {
        return Ok(obj.get("geometry").and_then(geometry_from_value));
    }

    if obj.contains_key("type") && obj.contains_key("coordinates") {
        return Ok(geometry_from_value(&value));
    }

    Err(ParseError::UnknownFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "[[[141,43],[142,43],[142,44],[141,44]]]";

    #[test]
    fn detects_place_response() {
        let json = format!(
            r#"{{"total_results":1,"results":[{{"id":13078,"geometry_geojson":{{"type":"Polygon","coordinates":{SQUARE}}}}}]}}"#
        );
        let geom = parse_boundary_auto(json.as_bytes()).unwrap();
        assert!(matches!(geom, Some(Geometry::Polygon(ref rings)) if rings[0].len() == 4));
    }

    #[test]
    fn empty_place_results_are_absent() {
        let geom = parse_boundary_auto(br#"{"results":[]}"#);
        assert!(matches!(geom, Ok(None)));
    }

    #[test]
    fn detects_feature_and_bare_geometry() {
        let feature = format!(
            r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"Polygon","coordinates":{SQUARE}}}}}"#
        );
        assert!(matches!(parse_boundary_auto(feature.as_bytes()), Ok(Some(_))));

        let bare = format!(r#"{{"type":"MultiPolygon","coordinates":[{SQUARE}]}}"#);
        assert!(matches!(
            parse_boundary_auto(bare.as_bytes()),
            Ok(Some(Geometry::MultiPolygon(_)))
        ));
    }

    #[test]
    fn unsupported_geometry_is_absent_not_error() {
        let line = br#"{"type":"LineString","coordinates":[[141,43],[142,44]]}"#;
        assert!(matches!(parse_boundary_auto(line), Ok(None)));
    }

    #[test]
    fn unknown_documents_error() {
        assert!(matches!(parse_boundary_auto(b"[1,2]"), Err(ParseError::UnknownFormat)));
        assert!(matches!(parse_boundary_auto(br#"{"a":1}"#), Err(ParseError::UnknownFormat)));
        assert!(matches!(parse_boundary_auto(b"{"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_boundary_auto(br#"{"results":3}"#),
            Err(ParseError::MissingField("results"))
        ));
    }
}
