//! Stateless bridge for the browser: JSON payloads in, render commands out.
//!
//! Every export builds its projection from the arguments of that call, so
//! independent rendering passes never share state.

use mycomap_core::RenderConfig;
use mycomap_core::boundary::MapOutline;
use mycomap_core::model::{Geometry, MonthlySeries, Observation};
use mycomap_core::parsers::{geometry_from_value, parse_observations};
use mycomap_core::views::{distribution, seasonality};
use mycomap_protocol::RenderCommand;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Arguments for [`render_map`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MapRequest {
    /// GeoJSON geometry of the primary region.
    primary: Option<serde_json::Value>,
    /// GeoJSON geometry whose rings are filtered by centroid.
    secondary: Option<serde_json::Value>,
    config: Option<RenderConfig>,
}

#[derive(Debug, Serialize)]
struct MapResponse {
    commands: Vec<RenderCommand>,
    located: usize,
    cells: usize,
    message: String,
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn geometry(value: Option<&serde_json::Value>) -> Option<Geometry> {
    value.and_then(geometry_from_value)
}

fn config_or_default(config: Option<RenderConfig>) -> Result<RenderConfig, JsError> {
    let config = config.unwrap_or_default();
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

/// Render the distribution map.
///
/// `request_json` is `{"primary": <geometry>?, "secondary": <geometry>?,
/// "config": <RenderConfig>?}`; `observations_json` is an observation search
/// response or a bare array. Returns `{commands, located, cells, message}`.
#[wasm_bindgen]
pub fn render_map(request_json: &str, observations_json: &str) -> Result<String, JsError> {
    let request: MapRequest = serde_json::from_str(request_json).map_err(to_js_error)?;
    let config = config_or_default(request.config)?;
    let observations: Vec<Observation> =
        parse_observations(observations_json.as_bytes()).map_err(to_js_error)?;

    let outline = MapOutline::build(
        geometry(request.primary.as_ref()).as_ref(),
        geometry(request.secondary.as_ref()).as_ref(),
        &config.map,
    );
    let (commands, summary) =
        distribution::render_distribution_map(&outline, &observations, &config.map);

    let response = MapResponse {
        commands,
        located: summary.located,
        cells: summary.cells,
        message: summary.message(),
    };
    serde_json::to_string(&response).map_err(to_js_error)
}

/// Render the seasonality chart from a 12-element JSON array of counts.
///
/// `config_json` may be empty to use the default layout.
#[wasm_bindgen]
pub fn render_seasonality(counts_json: &str, config_json: &str) -> Result<String, JsError> {
    let counts: MonthlySeries = serde_json::from_str(counts_json).map_err(to_js_error)?;
    let config = if config_json.trim().is_empty() {
        RenderConfig::default()
    } else {
        RenderConfig::from_json(config_json.as_bytes()).map_err(to_js_error)?
    };
    let commands = seasonality::render_seasonality(&counts, &config.chart);
    serde_json::to_string(&commands).map_err(to_js_error)
}

/// Tally observations by month, returning a 12-element JSON array.
#[wasm_bindgen]
pub fn monthly_counts(observations_json: &str) -> Result<String, JsError> {
    let observations = parse_observations(observations_json.as_bytes()).map_err(to_js_error)?;
    serde_json::to_string(&MonthlySeries::from_observations(&observations)).map_err(to_js_error)
}
