use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each view. Renderers consume
/// this list sequentially, and each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally outlined and titled.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
    },

    /// Draw vector path data (SVG path syntax, see [`crate::PathData`]).
    ///
    /// A path with no `fill` is stroked only.
    DrawPath {
        d: String,
        fill: Option<ThemeToken>,
        fill_opacity: f64,
        stroke: Option<ThemeToken>,
        stroke_width: f64,
    },

    /// Draw a filled circle.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        fill_opacity: f64,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (e.g. the heat layer). Renderers may use this
    /// for layer separation or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_serializes_with_variant_tag() {
        let cmd = RenderCommand::DrawCircle {
            center: Point::new(10.0, 20.0),
            radius: 9.2,
            color: ThemeToken::HeatFill,
            fill_opacity: 0.32,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.starts_with(r#"{"DrawCircle":"#), "{json}");
        assert!(json.contains(r#""color":"HeatFill""#));

        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
