//! Vector path data shared by outlines and chart curves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// One drawing operation of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bézier: two control points, then the end point.
    CubicTo(Point, Point, Point),
    Close,
}

/// An ordered list of path segments.
///
/// `Display` writes SVG path syntax with coordinates rounded to two
/// decimals, e.g. `M 1.00 2.00 L 3.00 4.00 Z`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points`: move to the first, line to each of
    /// the rest, then close. Yields an empty path for an empty iterator.
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::new();
        };
        let segments = std::iter::once(PathSegment::MoveTo(first))
            .chain(iter.map(PathSegment::LineTo))
            .chain(std::iter::once(PathSegment::Close))
            .collect();
        Self { segments }
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.segments.push(PathSegment::CubicTo(c1, c2, to));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Append every segment of `other`, keeping its own move-to so disjoint
    /// parts stay disjoint.
    pub fn extend(&mut self, other: PathData) {
        self.segments.extend(other.segments);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every coordinate the path passes through or uses as a handle.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|seg| {
            let pts: Vec<Point> = match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![p],
                PathSegment::CubicTo(c1, c2, p) => vec![c1, c2, p],
                PathSegment::Close => Vec::new(),
            };
            pts
        })
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match seg {
                PathSegment::MoveTo(p) => write!(f, "M {:.2} {:.2}", p.x, p.y)?,
                PathSegment::LineTo(p) => write!(f, "L {:.2} {:.2}", p.x, p.y)?,
                PathSegment::CubicTo(c1, c2, p) => write!(
                    f,
                    "C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
                    c1.x, c1.y, c2.x, c2.y, p.x, p.y
                )?,
                PathSegment::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_is_closed() {
        let path = PathData::polygon([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.5),
        ]);
        assert_eq!(path.to_string(), "M 0.00 0.00 L 10.00 0.00 L 10.00 5.50 Z");
    }

    #[test]
    fn empty_polygon_renders_nothing() {
        let path = PathData::polygon(std::iter::empty());
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn cubic_uses_comma_separated_pairs() {
        let mut path = PathData::new();
        path.move_to(Point::new(1.0, 2.0)).cubic_to(
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
            Point::new(7.0, 8.126),
        );
        assert_eq!(
            path.to_string(),
            "M 1.00 2.00 C 3.00 4.00, 5.00 6.00, 7.00 8.13"
        );
        assert_eq!(path.points().count(), 4);
    }

    #[test]
    fn extend_keeps_parts_disjoint() {
        let mut a = PathData::polygon([Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        a.extend(PathData::polygon([Point::new(5.0, 5.0), Point::new(6.0, 6.0)]));
        let moves = a
            .segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }
}
