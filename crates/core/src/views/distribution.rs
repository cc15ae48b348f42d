use mycomap_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::boundary::MapOutline;
use crate::config::MapConfig;
use crate::model::{LonLat, Observation};

use super::heatmap::{aggregate, heat_circles, render_heatmap};

const SUMMARY_FONT_SIZE: f64 = 11.0;
const SUMMARY_GAP: f64 = 14.0;

/// What the heat layer ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionSummary {
    /// Observations with a projectable location.
    pub located: usize,
    /// Heat circles drawn.
    pub cells: usize,
}

impl DistributionSummary {
    pub fn message(&self) -> String {
        if self.located == 0 {
            "座標付き観察が見つかりませんでした。".to_string()
        } else {
            format!("座標付き観察 {}件（表示点 {}）", self.located, self.cells)
        }
    }
}

/// Render the distribution map: outlines first, heat circles on top, then a
/// one-line summary below the canvas.
pub fn render_distribution_map(
    outline: &MapOutline,
    observations: &[Observation],
    config: &MapConfig,
) -> (Vec<RenderCommand>, DistributionSummary) {
    let (width, height) = config.surface_size();
    let mut commands = Vec::with_capacity(observations.len().min(1024) + 16);

    commands.push(RenderCommand::BeginGroup {
        id: "distribution".into(),
        label: Some("Distribution map".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, height),
        color: ThemeToken::Background,
        border_color: Some(ThemeToken::Border),
        label: None,
    });

    if let Some(land) = &outline.land {
        commands.push(RenderCommand::DrawPath {
            d: land.to_string(),
            fill: Some(ThemeToken::MapLand),
            fill_opacity: 1.0,
            stroke: Some(ThemeToken::MapLandBorder),
            stroke_width: 1.0,
        });
    }
    if let Some(disputed) = &outline.disputed {
        commands.push(RenderCommand::DrawPath {
            d: disputed.to_string(),
            fill: Some(ThemeToken::MapDisputed),
            fill_opacity: 1.0,
            stroke: Some(ThemeToken::MapDisputedBorder),
            stroke_width: 1.0,
        });
    }

    let points: Vec<Option<LonLat>> = observations.iter().map(|o| o.coordinates).collect();
    let heatmap = aggregate(&points, &outline.projection, config.cell_size);
    let circles = heat_circles(&heatmap.cells, config.cell_size, &config.heat);
    commands.extend(render_heatmap(&circles));

    let summary = DistributionSummary {
        located: heatmap.located,
        cells: circles.len(),
    };
    commands.push(RenderCommand::DrawText {
        position: Point::new(config.canvas.x, config.canvas.bottom() + SUMMARY_GAP),
        text: summary.message(),
        color: ThemeToken::TextMuted,
        font_size: SUMMARY_FONT_SIZE,
        align: TextAlign::Left,
    });

    commands.push(RenderCommand::EndGroup);
    tracing::trace!(located = summary.located, cells = summary.cells, "rendered distribution map");
    (commands, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn island() -> Geometry {
        Geometry::Polygon(vec![vec![
            LonLat::new(140.0, 42.0),
            LonLat::new(145.0, 42.0),
            LonLat::new(145.0, 45.0),
            LonLat::new(140.0, 45.0),
        ]])
    }

    #[test]
    fn draws_outline_heat_and_summary() {
        let config = MapConfig::default();
        let outline = MapOutline::build(Some(&island()), None, &config);
        let observations = [
            Observation::at(141.35, 43.06),
            Observation::at(141.35, 43.06),
            Observation::at(144.0, 43.5),
            Observation::default(),
        ];
        let (cmds, summary) = render_distribution_map(&outline, &observations, &config);
        assert_eq!(summary, DistributionSummary { located: 3, cells: 2 });
        let paths = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawPath { .. }))
            .count();
        assert_eq!(paths, 1);
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text == "座標付き観察 3件（表示点 2）"
        )));
    }

    #[test]
    fn reports_no_data_without_coordinates() {
        let config = MapConfig::default();
        let outline = MapOutline::fallback(&config);
        let (cmds, summary) =
            render_distribution_map(&outline, &[Observation::default()], &config);
        assert_eq!(summary.located, 0);
        assert!(!cmds.iter().any(|c| matches!(c, RenderCommand::DrawCircle { .. })));
        assert!(summary.message().contains("見つかりません"));
    }
}
