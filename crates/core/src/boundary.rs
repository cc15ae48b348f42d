//! Boundary geometry: outer-ring extraction, centroid filtering, and
//! projection of rings into closed outline paths.

use mycomap_protocol::PathData;

use crate::config::MapConfig;
use crate::model::{GeoBounds, Geometry, LonLat, Ring};
use crate::projection::{Projection, compute_projection};

/// Fewest vertices a ring needs to enclose anything.
pub const MIN_RING_POINTS: usize = 3;

/// Outer ring of every polygon in `geometry`; holes are discarded.
///
/// A `Polygon` yields its outer ring if it has one. For a `MultiPolygon`,
/// outer rings with fewer than [`MIN_RING_POINTS`] vertices are dropped.
/// Absent geometry yields nothing.
pub fn extract_outer_rings(geometry: Option<&Geometry>) -> Vec<Ring> {
    match geometry {
        Some(Geometry::Polygon(rings)) => rings
            .first()
            .filter(|ring| !ring.is_empty())
            .cloned()
            .into_iter()
            .collect(),
        Some(Geometry::MultiPolygon(polygons)) => polygons
            .iter()
            .filter_map(|polygon| polygon.first())
            .filter(|ring| ring.len() >= MIN_RING_POINTS)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Unweighted mean of the ring's vertices, `None` for an empty ring.
///
/// Not area-weighted, so very non-convex rings can land outside their
/// own shape.
pub fn ring_centroid(ring: &[LonLat]) -> Option<LonLat> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (lon, lat) = ring
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
    Some(LonLat::new(lon / n, lat / n))
}

/// Keep rings whose centroid lies inside `test_bounds` (inclusive).
pub fn filter_rings_by_centroid(rings: Vec<Ring>, test_bounds: &GeoBounds) -> Vec<Ring> {
    let before = rings.len();
    let kept: Vec<Ring> = rings
        .into_iter()
        .filter(|ring| ring_centroid(ring).is_some_and(|c| test_bounds.contains(c)))
        .collect();
    tracing::trace!(before, kept = kept.len(), "filtered rings by centroid");
    kept
}

/// Shoelace area in squared degrees; positive for counter-clockwise rings.
pub fn signed_area(ring: &[LonLat]) -> f64 {
    let n = ring.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.lon * b.lat - b.lon * a.lat
        })
        .sum();
    sum / 2.0
}

/// The outer ring with the largest absolute area.
///
/// For a `Polygon` this is simply its outer ring.
pub fn largest_outer_ring(geometry: Option<&Geometry>) -> Option<&Ring> {
    match geometry? {
        Geometry::Polygon(rings) => rings.first(),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|polygon| polygon.first())
            .filter(|ring| ring.len() >= MIN_RING_POINTS)
            .map(|ring| (signed_area(ring).abs(), ring))
            .fold(None, |best: Option<(f64, &Ring)>, (area, ring)| match best {
                Some((best_area, _)) if best_area >= area => best,
                _ => Some((area, ring)),
            })
            .map(|(_, ring)| ring),
    }
}

/// Project a ring into a closed path.
///
/// Vertices that fail to project are skipped; if fewer than
/// [`MIN_RING_POINTS`] survive the ring yields no path.
pub fn build_path_from_ring(ring: &[LonLat], projection: &Projection) -> Option<PathData> {
    let points: Vec<_> = ring
        .iter()
        .filter_map(|p| projection.project(p.lon, p.lat))
        .collect();
    if points.len() < MIN_RING_POINTS {
        tracing::debug!(
            vertices = ring.len(),
            projected = points.len(),
            "ring has too few projectable points"
        );
        return None;
    }
    Some(PathData::polygon(points))
}

/// One path covering every drawable ring, so a region made of several
/// disjoint parts (islands) is a single outline.
pub fn build_outline_path(rings: &[Ring], projection: &Projection) -> Option<PathData> {
    let mut outline = PathData::new();
    for path in rings.iter().filter_map(|ring| build_path_from_ring(ring, projection)) {
        outline.extend(path);
    }
    (!outline.is_empty()).then_some(outline)
}

/// Projection and outline paths for one map rendering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOutline {
    /// Padded bounds the projection was fitted to.
    pub bounds: GeoBounds,
    pub projection: Projection,
    /// Outline of the primary region.
    pub land: Option<PathData>,
    /// Outline of the centroid-filtered part of the secondary region.
    pub disputed: Option<PathData>,
}

impl MapOutline {
    /// Projection over the configured default bounds, with no outlines.
    pub fn fallback(config: &MapConfig) -> Self {
        let bounds = config.default_bounds;
        Self {
            bounds,
            projection: compute_projection(&bounds, None, config.canvas),
            land: None,
            disputed: None,
        }
    }

    /// Fit the map to the rings of `primary` plus the rings of `secondary`
    /// whose centroid falls inside `config.disputed_filter`.
    ///
    /// Bounds are padded by `config.bounds_padding`; the reference latitude
    /// is the midpoint of the unpadded bounds. With no usable rings at all
    /// this is [`MapOutline::fallback`].
    pub fn build(primary: Option<&Geometry>, secondary: Option<&Geometry>, config: &MapConfig) -> Self {
        let land_rings: Vec<Ring> = extract_outer_rings(primary)
            .into_iter()
            .filter(|ring| ring.len() >= MIN_RING_POINTS)
            .collect();
        let disputed_rings =
            filter_rings_by_centroid(extract_outer_rings(secondary), &config.disputed_filter);

        let raw = GeoBounds::from_coordinates(land_rings.iter().chain(&disputed_rings).flatten());
        if raw.is_empty() {
            tracing::debug!("no boundary rings, using default bounds");
            return Self::fallback(config);
        }

        let bounds = raw.expand(config.bounds_padding);
        let projection = compute_projection(&bounds, Some(raw.mid_lat()), config.canvas);
        Self {
            bounds,
            projection,
            land: build_outline_path(&land_rings, &projection),
            disputed: build_outline_path(&disputed_rings, &projection),
        }
    }
}
