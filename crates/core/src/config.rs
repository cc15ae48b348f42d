//! Render configuration: canvas sizes, margins, and visual constants.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use mycomap_protocol::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GeoBounds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub map: MapConfig,
    pub chart: ChartLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Drawing area inside the map surface.
    pub canvas: Rect,
    /// Used when no boundary geometry is available.
    pub default_bounds: GeoBounds,
    /// Fraction of each axis span added on both sides of boundary bounds.
    pub bounds_padding: f64,
    /// Heatmap grid cell edge, in pixels.
    pub cell_size: f64,
    /// Secondary-geometry rings are kept only if their centroid falls here.
    pub disputed_filter: GeoBounds,
    pub heat: HeatStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::new(20.0, 20.0, 560.0, 320.0),
            default_bounds: GeoBounds::new(139.2, 146.4, 41.2, 45.9),
            bounds_padding: 0.08,
            cell_size: 5.0,
            disputed_filter: GeoBounds::new(145.0, 149.2, 43.0, 46.0),
            heat: HeatStyle::default(),
        }
    }
}

impl MapConfig {
    /// Full surface size: canvas plus its margin on every side.
    pub fn surface_size(&self) -> (f64, f64) {
        (
            self.canvas.w + 2.0 * self.canvas.x,
            self.canvas.h + 2.0 * self.canvas.y,
        )
    }
}

/// How grid cell counts become circle radius and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatStyle {
    pub base_radius: f64,
    pub radius_factor: f64,
    pub opacity_floor: f64,
    pub opacity_ceiling: f64,
}

impl Default for HeatStyle {
    fn default() -> Self {
        Self {
            base_radius: 7.0,
            radius_factor: 2.2,
            opacity_floor: 0.1,
            opacity_ceiling: 0.32,
        }
    }
}

/// Seasonality chart surface and plot margins, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 220.0,
            pad_left: 52.0,
            pad_right: 52.0,
            pad_top: 16.0,
            pad_bottom: 30.0,
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }

    pub fn plot_top(&self) -> f64 {
        self.pad_top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.pad_top + self.plot_height()
    }
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let map = &self.map;
        if !(is_positive(map.canvas.w) && is_positive(map.canvas.h)) {
            return Err(ConfigError::Invalid(format!(
                "map canvas must have a positive size, got {}x{}",
                map.canvas.w, map.canvas.h
            )));
        }
        if !is_positive(map.cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                map.cell_size
            )));
        }
        if map.bounds_padding.is_nan() || map.bounds_padding < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bounds_padding must not be negative, got {}",
                map.bounds_padding
            )));
        }
        if map.heat.opacity_floor > map.heat.opacity_ceiling {
            return Err(ConfigError::Invalid(format!(
                "heat opacity floor {} exceeds ceiling {}",
                map.heat.opacity_floor, map.heat.opacity_ceiling
            )));
        }
        let chart = &self.chart;
        if !(is_positive(chart.plot_width()) && is_positive(chart.plot_height())) {
            return Err(ConfigError::Invalid(format!(
                "chart margins leave no plot area ({}x{})",
                chart.plot_width(),
                chart.plot_height()
            )));
        }
        Ok(())
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
