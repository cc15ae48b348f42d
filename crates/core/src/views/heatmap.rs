use std::collections::BTreeMap;

use mycomap_protocol::{Point, RenderCommand, ThemeToken};
use serde::{Deserialize, Serialize};

use crate::config::HeatStyle;
use crate::model::LonLat;
use crate::projection::Projection;

/// One occupied bucket of the screen-space density grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub gx: i64,
    pub gy: i64,
    pub count: u32,
}

impl GridCell {
    /// Canvas position of the cell's anchor.
    pub fn position(&self, cell_size: f64) -> Point {
        Point::new(self.gx as f64 * cell_size, self.gy as f64 * cell_size)
    }
}

/// Result of binning one set of observation points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heatmap {
    /// Occupied cells ordered by `(gx, gy)`.
    pub cells: Vec<GridCell>,
    /// Points that projected successfully.
    pub located: usize,
}

impl Heatmap {
    pub fn max_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// A heat circle ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCircle {
    pub center: Point,
    pub radius: f64,
    pub fill_opacity: f64,
    pub count: u32,
}

/// Grid index of a screen coordinate; ties round up.
fn grid_index(v: f64, cell_size: f64) -> i64 {
    (v / cell_size + 0.5).floor() as i64
}

/// Project points and count them per grid cell.
///
/// Absent and unprojectable points are dropped. Counts are summed, so the
/// result does not depend on the order of `points`.
pub fn aggregate(points: &[Option<LonLat>], projection: &Projection, cell_size: f64) -> Heatmap {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        tracing::debug!(cell_size, "invalid cell size, heatmap left empty");
        return Heatmap::default();
    }

    let mut grid: BTreeMap<(i64, i64), u32> = BTreeMap::new();
    let mut located = 0;
    for p in points.iter().flatten() {
        let Some(screen) = projection.project(p.lon, p.lat) else {
            continue;
        };
        located += 1;
        let key = (grid_index(screen.x, cell_size), grid_index(screen.y, cell_size));
        *grid.entry(key).or_default() += 1;
    }

    if located == 0 {
        tracing::debug!(total = points.len(), "no projectable points, heatmap left empty");
    } else if located < points.len() {
        tracing::debug!(
            total = points.len(),
            located,
            "dropped points without a projectable location"
        );
    }

    let cells = grid
        .into_iter()
        .map(|((gx, gy), count)| GridCell { gx, gy, count })
        .collect();
    Heatmap { cells, located }
}

/// The occupied grid cells for `points`; see [`aggregate`].
pub fn build_heatmap(points: &[Option<LonLat>], projection: &Projection, cell_size: f64) -> Vec<GridCell> {
    aggregate(points, projection, cell_size).cells
}

/// Derive radius and opacity for every cell.
///
/// Intensity is the cell's share of the busiest cell in `cells`. Radius grows
/// with the square root of the count so circle area tracks the count;
/// opacity interpolates linearly between the style's floor and ceiling.
pub fn heat_circles(cells: &[GridCell], cell_size: f64, style: &HeatStyle) -> Vec<HeatCircle> {
    let max_count = cells.iter().map(|c| c.count).max().unwrap_or(0);
    if max_count == 0 {
        return Vec::new();
    }
    cells
        .iter()
        .map(|cell| {
            let intensity = f64::from(cell.count) / f64::from(max_count);
            HeatCircle {
                center: cell.position(cell_size),
                radius: style.base_radius + f64::from(cell.count).sqrt() * style.radius_factor,
                fill_opacity: style.opacity_floor
                    + intensity * (style.opacity_ceiling - style.opacity_floor),
                count: cell.count,
            }
        })
        .collect()
}

/// Render heat circles as one group. Empty input renders nothing.
pub fn render_heatmap(circles: &[HeatCircle]) -> Vec<RenderCommand> {
    if circles.is_empty() {
        return Vec::new();
    }
    let mut commands = Vec::with_capacity(circles.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "heat".into(),
        label: Some("Observation density".into()),
    });
    commands.extend(circles.iter().map(|c| RenderCommand::DrawCircle {
        center: c.center,
        radius: c.radius,
        color: ThemeToken::HeatFill,
        fill_opacity: c.fill_opacity,
    }));
    commands.push(RenderCommand::EndGroup);
    commands
}
