//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use mycomap_protocol::{RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 120 + 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));

    for cmd in commands {
        write_command(&mut svg, cmd, dark);
    }

    svg.push_str("</svg>");
    svg
}

fn write_command(svg: &mut String, cmd: &RenderCommand, dark: bool) {
    match cmd {
        RenderCommand::DrawRect {
            rect,
            color,
            border_color,
            label,
        } => {
            let fill = resolve_color(*color, dark);
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                rect.x, rect.y, rect.w, rect.h,
            ));
            if let Some(border) = border_color {
                svg.push_str(&format!(r#" stroke="{}""#, resolve_color(*border, dark)));
            }
            svg.push('>');
            if let Some(label) = label {
                svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
            }
            svg.push_str("</rect>");
        }
        RenderCommand::DrawPath {
            d,
            fill,
            fill_opacity,
            stroke,
            stroke_width,
        } => {
            let fill = fill.map_or("none", |t| resolve_color(t, dark));
            svg.push_str(&format!(r#"<path d="{d}" fill="{fill}""#));
            if fill != "none" && *fill_opacity < 1.0 {
                svg.push_str(&format!(r#" fill-opacity="{fill_opacity}""#));
            }
            if let Some(stroke) = stroke {
                svg.push_str(&format!(
                    r#" stroke="{}" stroke-width="{stroke_width}" stroke-linejoin="round" stroke-linecap="round""#,
                    resolve_color(*stroke, dark),
                ));
            }
            svg.push_str("/>");
        }
        RenderCommand::DrawCircle {
            center,
            radius,
            color,
            fill_opacity,
        } => {
            svg.push_str(&format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{}" fill-opacity="{fill_opacity:.3}"/>"#,
                center.x,
                center.y,
                resolve_color(*color, dark),
            ));
        }
        RenderCommand::DrawLine {
            from,
            to,
            color,
            width: line_width,
        } => {
            let stroke = resolve_color(*color, dark);
            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                from.x, from.y, to.x, to.y,
            ));
        }
        RenderCommand::DrawText {
            text,
            position,
            color,
            font_size,
            align,
        } => {
            let anchor = match align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
                TextAlign::Right => "end",
            };
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" fill="{}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                position.x,
                position.y,
                resolve_color(*color, dark),
                escape_xml(text),
            ));
        }
        RenderCommand::BeginGroup { id, .. } => {
            svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
        }
        RenderCommand::EndGroup => svg.push_str("</g>"),
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#0d1712",
            ThemeToken::Border => "#1f7a3f",
            ThemeToken::TextPrimary => "#e4efe7",
            ThemeToken::TextMuted | ThemeToken::GridLabel | ThemeToken::MonthEmpty => "#8eac98",
            ThemeToken::MapLand => "#16301f",
            ThemeToken::MapLandBorder => "#3f9d63",
            ThemeToken::MapDisputed => "#2a2a1a",
            ThemeToken::MapDisputedBorder => "#b59f3b",
            ThemeToken::HeatFill | ThemeToken::MonthPeak => "#ff4d4d",
            ThemeToken::ChartBackground => "#08110c",
            ThemeToken::ChartFrame => "#1f7a3f",
            ThemeToken::GridLine => "#2f4f40",
            ThemeToken::CurveLine | ThemeToken::CurvePoint => "#39b268",
            ThemeToken::CurveArea => "#173325",
            ThemeToken::MonthObserved => "#f2d15b",
        }
    } else {
        match token {
            ThemeToken::Background => "#f8f9fa",
            ThemeToken::Border => "#dee2e6",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextMuted | ThemeToken::GridLabel | ThemeToken::MonthEmpty => "#666677",
            ThemeToken::MapLand => "#e3efe6",
            ThemeToken::MapLandBorder => "#2e7d4f",
            ThemeToken::MapDisputed => "#f3ecd2",
            ThemeToken::MapDisputedBorder => "#a8872a",
            ThemeToken::HeatFill => "#e63946",
            ThemeToken::MonthPeak => "#d62828",
            ThemeToken::ChartBackground => "#ffffff",
            ThemeToken::ChartFrame => "#adb5bd",
            ThemeToken::GridLine => "#dee2e6",
            ThemeToken::CurveLine | ThemeToken::CurvePoint => "#2e7d4f",
            ThemeToken::CurveArea => "#cde8d6",
            ThemeToken::MonthObserved => "#b8860b",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycomap_protocol::{Point, Rect};

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::DrawRect {
                rect: Rect::new(0.0, 0.0, 640.0, 220.0),
                color: ThemeToken::ChartBackground,
                border_color: Some(ThemeToken::ChartFrame),
                label: None,
            },
            RenderCommand::DrawCircle {
                center: Point::new(100.0, 50.0),
                radius: 9.2,
                color: ThemeToken::HeatFill,
                fill_opacity: 0.32,
            },
        ];
        let svg = render_svg(&commands, 640.0, 220.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("#08110c"));
        assert!(svg.contains(r#"fill-opacity="0.320""#));
        assert!(svg.contains(r#"r="9.20""#));
    }

    #[test]
    fn stroke_only_path_has_no_fill() {
        let commands = vec![RenderCommand::DrawPath {
            d: "M 0.00 0.00 L 1.00 1.00".into(),
            fill: None,
            fill_opacity: 0.0,
            stroke: Some(ThemeToken::CurveLine),
            stroke_width: 2.0,
        }];
        let svg = render_svg(&commands, 10.0, 10.0, false);
        assert!(svg.contains(r##"<path d="M 0.00 0.00 L 1.00 1.00" fill="none" stroke="#2e7d4f""##));
        assert!(!svg.contains("fill-opacity"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 10.0),
            text: "<Amanita & co>".into(),
            color: ThemeToken::TextPrimary,
            font_size: 11.0,
            align: TextAlign::Center,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("&lt;Amanita &amp; co&gt;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn groups_nest() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "heat".into(),
                label: None,
            },
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 1.0, 1.0, true);
        assert!(svg.contains(r#"<g id="heat"></g>"#));
    }

    #[test]
    fn commands_are_written_in_order() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "chart".into(),
                label: None,
            },
            RenderCommand::DrawLine {
                from: Point::new(52.0, 30.0),
                to: Point::new(588.0, 30.0),
                color: ThemeToken::GridLine,
                width: 1.5,
            },
            RenderCommand::DrawRect {
                rect: Rect::new(1.0, 2.0, 3.0, 4.0),
                color: ThemeToken::MapLand,
                border_color: None,
                label: Some("Hokkaido".into()),
            },
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 640.0, 220.0, false);
        let expected = concat!(
            r#"<g id="chart">"#,
            r##"<line x1="52.00" y1="30.00" x2="588.00" y2="30.00" stroke="#dee2e6" stroke-width="1.5"/>"##,
            r##"<rect x="1" y="2" width="3" height="4" fill="#e3efe6"><title>Hokkaido</title></rect>"##,
            "</g></svg>",
        );
        assert!(svg.ends_with(expected), "{svg}");
    }
}
