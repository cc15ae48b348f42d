//! Geospatial and statistical visualization engine.
//!
//! Turns longitude/latitude points and polygon boundaries into drawing
//! primitives on a fixed-size canvas, and monthly counts into a smooth
//! seasonality curve. Every operation is a pure function of its inputs.
//!
//! ```text
//!   GeoBounds ──▶ projection ──┬──▶ boundary  ──▶ outline paths ─┐
//!                              └──▶ heatmap   ──▶ heat circles  ─┼─▶ RenderCommand[] ──▶ svg
//!   MonthlySeries ──────────────────▶ seasonality ──▶ curve ─────┘
//! ```

pub mod boundary;
pub mod config;
pub mod model;
pub mod parsers;
pub mod projection;
pub mod svg;
pub mod views;

pub use config::RenderConfig;
pub use projection::{Projection, compute_projection, project_point};
