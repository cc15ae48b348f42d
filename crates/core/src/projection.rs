//! Single-reference-latitude equirectangular projection onto a fixed canvas.
//!
//! Longitude is foreshortened by `cos(reference latitude)` and the result is
//! fitted into the canvas with one uniform scale, centered on the shorter
//! axis. This is not a conformal projection; distortion grows with the
//! latitude span of the bounds.

use mycomap_protocol::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::model::GeoBounds;

/// An immutable geographic-to-canvas transform.
///
/// Built once per bounding box with [`compute_projection`] and passed by
/// value into the boundary and heatmap stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Foreshortened longitude extents.
    pub min_x: f64,
    pub max_x: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub ref_lat_rad: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Projection {
    /// Whether both screen-space extents are positive. A degenerate
    /// projection projects nothing.
    pub fn is_degenerate(&self) -> bool {
        !(has_extent(self.max_x - self.min_x) && has_extent(self.max_lat - self.min_lat))
    }

    /// See [`project_point`].
    pub fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        project_point(lon, lat, self)
    }
}

/// NaN extents count as empty.
fn has_extent(range: f64) -> bool {
    range > 0.0
}

fn lon_to_projected_x(lon: f64, ref_lat_rad: f64) -> f64 {
    lon * ref_lat_rad.cos()
}

/// Fit `bounds` into `canvas`.
///
/// `reference_lat` defaults to the latitude midpoint of `bounds`. Padding is
/// the caller's job; the bounds are used as given. Zero or inverted extents
/// produce `scale = 1` with offsets at the canvas origin.
pub fn compute_projection(bounds: &GeoBounds, reference_lat: Option<f64>, canvas: Rect) -> Projection {
    let reference_lat = reference_lat.unwrap_or_else(|| bounds.mid_lat());
    let ref_lat_rad = reference_lat.to_radians();
    let min_x = lon_to_projected_x(bounds.min_lon, ref_lat_rad);
    let max_x = lon_to_projected_x(bounds.max_lon, ref_lat_rad);
    let x_range = max_x - min_x;
    let lat_range = bounds.max_lat - bounds.min_lat;

    let mut projection = Projection {
        min_x,
        max_x,
        min_lat: bounds.min_lat,
        max_lat: bounds.max_lat,
        ref_lat_rad,
        scale: 1.0,
        offset_x: canvas.x,
        offset_y: canvas.y,
    };

    if !(has_extent(x_range) && has_extent(lat_range)) {
        tracing::debug!(x_range, lat_range, "degenerate bounds, using unit projection");
        return projection;
    }

    let scale = (canvas.w / x_range).min(canvas.h / lat_range);
    let draw_width = x_range * scale;
    let draw_height = lat_range * scale;
    projection.scale = scale;
    projection.offset_x = canvas.x + (canvas.w - draw_width) / 2.0;
    projection.offset_y = canvas.y + (canvas.h - draw_height) / 2.0;
    projection
}

/// Map a geographic point to canvas pixels, Y growing downwards.
///
/// Returns `None` for a degenerate projection or a non-finite result.
pub fn project_point(lon: f64, lat: f64, projection: &Projection) -> Option<Point> {
    if projection.is_degenerate() {
        return None;
    }
    let projected_x = lon_to_projected_x(lon, projection.ref_lat_rad);
    let x = projection.offset_x + (projected_x - projection.min_x) * projection.scale;
    let y = projection.offset_y + (projection.max_lat - lat) * projection.scale;
    let p = Point::new(x, y);
    p.is_finite().then_some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn hokkaido() -> GeoBounds {
        GeoBounds::new(140.0, 145.0, 42.0, 45.0)
    }

    #[test]
    fn uniform_scale_is_min_of_axis_scales() {
        let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = compute_projection(&hokkaido(), None, canvas);
        let lon_extent = 5.0 * 43.5_f64.to_radians().cos();
        let expected = (100.0 / lon_extent).min(100.0 / 3.0);
        assert!((p.scale - expected).abs() < EPS, "scale={}", p.scale);
    }

    #[test]
    fn box_center_lands_on_canvas_center() {
        let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = compute_projection(&hokkaido(), None, canvas);
        let c = project_point(142.5, 43.5, &p).unwrap();
        assert!((c.x - 50.0).abs() <= 1.0, "x={}", c.x);
        assert!((c.y - 50.0).abs() <= 1.0, "y={}", c.y);
    }

    #[test]
    fn corners_stay_inside_canvas() {
        let cases = [
            (GeoBounds::new(139.2, 146.4, 41.2, 45.9), Rect::new(20.0, 20.0, 560.0, 320.0)),
            (GeoBounds::new(-10.0, 30.0, 35.0, 70.0), Rect::new(0.0, 0.0, 300.0, 800.0)),
            (GeoBounds::new(-180.0, 180.0, -60.0, 60.0), Rect::new(5.0, 7.0, 640.0, 220.0)),
            (GeoBounds::new(0.0, 0.5, 0.0, 0.001), Rect::new(0.0, 0.0, 50.0, 50.0)),
        ];
        for (bounds, canvas) in cases {
            let p = compute_projection(&bounds, None, canvas);
            for (lon, lat) in [
                (bounds.min_lon, bounds.min_lat),
                (bounds.min_lon, bounds.max_lat),
                (bounds.max_lon, bounds.min_lat),
                (bounds.max_lon, bounds.max_lat),
            ] {
                let pt = project_point(lon, lat, &p);
                assert!(
                    pt.is_some_and(|pt| canvas.contains_approx(pt, 1e-6)),
                    "{bounds:?} corner ({lon}, {lat}) -> {pt:?}"
                );
            }
        }
    }

    #[test]
    fn north_is_up() {
        let p = compute_projection(&hokkaido(), None, Rect::new(0.0, 0.0, 100.0, 100.0));
        let north = project_point(142.0, 44.9, &p).map(|pt| pt.y);
        let south = project_point(142.0, 42.1, &p).map(|pt| pt.y);
        assert!(north < south);
    }

    #[test]
    fn identical_inputs_give_identical_projection() {
        let canvas = Rect::new(20.0, 20.0, 560.0, 320.0);
        let a = compute_projection(&hokkaido(), Some(43.0), canvas);
        let b = compute_projection(&hokkaido(), Some(43.0), canvas);
        assert_eq!(a, b);
        assert_eq!(a.scale.to_bits(), b.scale.to_bits());
        assert_eq!(a.offset_x.to_bits(), b.offset_x.to_bits());
    }

    #[test]
    fn degenerate_bounds_are_finite_and_project_nothing() {
        let canvas = Rect::new(20.0, 30.0, 100.0, 100.0);
        let p = compute_projection(&GeoBounds::new(10.0, 10.0, 5.0, 5.0), None, canvas);
        for v in [
            p.min_x,
            p.max_x,
            p.min_lat,
            p.max_lat,
            p.ref_lat_rad,
            p.scale,
            p.offset_x,
            p.offset_y,
        ] {
            assert!(v.is_finite());
        }
        assert_eq!(p.scale, 1.0);
        assert_eq!((p.offset_x, p.offset_y), (20.0, 30.0));
        assert!(p.is_degenerate());
        assert_eq!(project_point(10.0, 5.0, &p), None);
    }

    #[test]
    fn inverted_bounds_are_degenerate() {
        let p = compute_projection(
            &GeoBounds::new(145.0, 140.0, 42.0, 45.0),
            None,
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.project(142.0, 43.0), None);
    }

    #[test]
    fn non_finite_input_is_dropped() {
        let p = compute_projection(&hokkaido(), None, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(project_point(f64::NAN, 43.0, &p), None);
        assert_eq!(project_point(142.0, f64::INFINITY, &p), None);
    }

    #[test]
    fn explicit_reference_latitude_changes_width() {
        let canvas = Rect::new(0.0, 0.0, 1000.0, 100.0);
        let equator = compute_projection(&hokkaido(), Some(0.0), canvas);
        let north = compute_projection(&hokkaido(), Some(60.0), canvas);
        assert!((equator.max_x - equator.min_x) > (north.max_x - north.min_x));
    }
}
