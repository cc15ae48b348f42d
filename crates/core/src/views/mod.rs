pub mod distribution;
pub mod heatmap;
pub mod seasonality;
