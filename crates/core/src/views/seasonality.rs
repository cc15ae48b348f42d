use mycomap_protocol::{PathData, Point, Rect, RenderCommand, TextAlign, ThemeToken};
use serde::{Deserialize, Serialize};

use crate::config::ChartLayout;
use crate::model::MonthlySeries;

const GRID_FONT_SIZE: f64 = 10.0;
const MONTH_FONT_SIZE: f64 = 11.0;
const GRID_LABEL_GAP: f64 = 8.0;
const MONTH_LABEL_BASELINE: f64 = 8.0;
const POINT_RADIUS: f64 = 2.6;
const AREA_OPACITY: f64 = 0.45;
/// Gridline spacing widens tenfold until at most this many intervals remain.
const MAX_GRID_INTERVALS: u64 = 100;

/// Horizontal gridline weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEmphasis {
    Major,
    Minor,
}

/// Month label weight, driven only by the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthEmphasis {
    /// The month has the highest count (ties included).
    Peak,
    /// Nonzero, below the peak.
    Observed,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    /// Vertical position of the line.
    pub y: f64,
    pub value: u64,
    pub text: String,
    pub emphasis: GridEmphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub position: Point,
    pub text: String,
    pub emphasis: MonthEmphasis,
}

/// Everything needed to draw the seasonality chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityCurve {
    pub step: u32,
    /// Top of the value axis. Wider than `u32` so the largest counts still round up.
    pub max_rounded: u64,
    /// Spacing between gridlines; `step` unless that would draw too many lines.
    pub grid_step: u64,
    /// One control point per month.
    pub points: Vec<Point>,
    pub line: PathData,
    /// `line` closed along the bottom of the plot.
    pub area: PathData,
    pub grid_lines: Vec<GridLine>,
    pub axis_labels: Vec<AxisLabel>,
}

/// Gridline spacing for a series whose largest value is `max`.
pub fn axis_step(max: u32) -> u32 {
    match max {
        0..=10 => 1,
        11..=19 => 2,
        20..=49 => 5,
        _ => 10,
    }
}

/// Smallest multiple of `step` that is at least `max`, never below `step`.
pub fn rounded_axis_max(max: u32, step: u32) -> u64 {
    let step = u64::from(step.max(1));
    (u64::from(max).div_ceil(step) * step).max(step)
}

/// Gridline spacing for an axis topped at `max_rounded`: `step`, widened by
/// factors of ten until no more than `MAX_GRID_INTERVALS` intervals fit.
pub fn grid_step(max_rounded: u64, step: u32) -> u64 {
    let mut grid = u64::from(step.max(1));
    while max_rounded / grid > MAX_GRID_INTERVALS {
        grid *= 10;
    }
    grid
}

pub fn month_emphasis(count: u32, max: u32) -> MonthEmphasis {
    if max > 0 && count == max {
        MonthEmphasis::Peak
    } else if count > 0 {
        MonthEmphasis::Observed
    } else {
        MonthEmphasis::Empty
    }
}

/// Cardinal (Catmull-Rom, tension 1/6) spline through `points`.
///
/// Endpoints stand in for their own missing neighbor. The vertical
/// component of every handle is clamped to `[min_y, max_y]`, so with
/// in-range points the curve never leaves that band.
pub fn smooth_curve_path(points: &[Point], min_y: f64, max_y: f64) -> PathData {
    let mut path = PathData::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);

    for i in 0..points.len().saturating_sub(1) {
        let p0 = if i == 0 { points[i] } else { points[i - 1] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let cp1 = Point::new(
            p1.x + (p2.x - p0.x) / 6.0,
            (p1.y + (p2.y - p0.y) / 6.0).clamp(min_y, max_y),
        );
        let cp2 = Point::new(
            p2.x - (p3.x - p1.x) / 6.0,
            (p2.y - (p3.y - p1.y) / 6.0).clamp(min_y, max_y),
        );
        path.cubic_to(cp1, cp2, p2);
    }
    path
}

/// Lay out the chart for `counts` inside `layout`.
pub fn build_seasonality_curve(counts: &MonthlySeries, layout: &ChartLayout) -> SeasonalityCurve {
    let max = counts.max();
    let step = axis_step(max);
    let max_rounded = rounded_axis_max(max, step);
    let grid_step = grid_step(max_rounded, step);

    let gw = layout.plot_width();
    let gh = layout.plot_height();
    let top = layout.plot_top();
    let bottom = layout.plot_bottom();
    let value_y = |v: u64| top + gh - gh * v as f64 / max_rounded as f64;
    let month_x = |i: usize| layout.pad_left + gw * i as f64 / 11.0;

    let points: Vec<Point> = counts
        .counts()
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new(month_x(i), value_y(u64::from(v))))
        .collect();

    let line = smooth_curve_path(&points, top, bottom);
    let mut area = line.clone();
    area.line_to(Point::new(layout.pad_left + gw, bottom))
        .line_to(Point::new(layout.pad_left, bottom))
        .close();

    let grid_lines = (0..=max_rounded / grid_step)
        .map(|i| i * grid_step)
        .map(|v| GridLine {
            y: value_y(v),
            value: v,
            text: v.to_string(),
            emphasis: if v % (grid_step * 2) == 0 {
                GridEmphasis::Major
            } else {
                GridEmphasis::Minor
            },
        })
        .collect();

    let axis_labels = counts
        .counts()
        .iter()
        .enumerate()
        .map(|(i, &v)| AxisLabel {
            position: Point::new(month_x(i), layout.height - MONTH_LABEL_BASELINE),
            text: format!("{}月", i + 1),
            emphasis: month_emphasis(v, max),
        })
        .collect();

    SeasonalityCurve {
        step,
        max_rounded,
        grid_step,
        points,
        line,
        area,
        grid_lines,
        axis_labels,
    }
}

/// Render the seasonality chart: frame, gridlines with value labels, area
/// fill, curve, month dots and month labels.
pub fn render_seasonality(counts: &MonthlySeries, layout: &ChartLayout) -> Vec<RenderCommand> {
    let curve = build_seasonality_curve(counts, layout);
    let mut commands = Vec::with_capacity(curve.grid_lines.len() * 2 + 32);

    commands.push(RenderCommand::BeginGroup {
        id: "seasonality".into(),
        label: Some("Monthly observations".into()),
    });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, layout.width, layout.height),
        color: ThemeToken::ChartBackground,
        border_color: Some(ThemeToken::ChartFrame),
        label: None,
    });

    let right = layout.pad_left + layout.plot_width();
    for grid in &curve.grid_lines {
        commands.push(RenderCommand::DrawLine {
            from: Point::new(layout.pad_left, grid.y),
            to: Point::new(right, grid.y),
            color: ThemeToken::GridLine,
            width: match grid.emphasis {
                GridEmphasis::Major => 1.5,
                GridEmphasis::Minor => 1.0,
            },
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(layout.pad_left - GRID_LABEL_GAP, grid.y + 4.0),
            text: grid.text.clone(),
            color: ThemeToken::GridLabel,
            font_size: GRID_FONT_SIZE,
            align: TextAlign::Right,
        });
    }

    commands.push(RenderCommand::DrawPath {
        d: curve.area.to_string(),
        fill: Some(ThemeToken::CurveArea),
        fill_opacity: AREA_OPACITY,
        stroke: None,
        stroke_width: 0.0,
    });
    commands.push(RenderCommand::DrawPath {
        d: curve.line.to_string(),
        fill: None,
        fill_opacity: 0.0,
        stroke: Some(ThemeToken::CurveLine),
        stroke_width: 2.0,
    });

    commands.extend(curve.points.iter().map(|&center| RenderCommand::DrawCircle {
        center,
        radius: POINT_RADIUS,
        color: ThemeToken::CurvePoint,
        fill_opacity: 1.0,
    }));

    commands.extend(curve.axis_labels.into_iter().map(|label| RenderCommand::DrawText {
        position: label.position,
        text: label.text,
        color: match label.emphasis {
            MonthEmphasis::Peak => ThemeToken::MonthPeak,
            MonthEmphasis::Observed => ThemeToken::MonthObserved,
            MonthEmphasis::Empty => ThemeToken::MonthEmpty,
        },
        font_size: MONTH_FONT_SIZE,
        align: TextAlign::Center,
    }));

    commands.push(RenderCommand::EndGroup);
    commands
}
