use serde::{Deserialize, Serialize};

use super::geometry::LonLat;

/// One catalog observation, reduced to what the visualizations need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// `None` when the observation carries no location.
    pub coordinates: Option<LonLat>,
    /// Calendar month, 1 = January.
    pub month: Option<u32>,
}

impl Observation {
    pub fn at(lon: f64, lat: f64) -> Self {
        Self {
            coordinates: Some(LonLat::new(lon, lat)),
            month: None,
        }
    }
}

/// Observation counts for January through December.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries(pub [u32; 12]);

impl MonthlySeries {
    pub fn new(counts: [u32; 12]) -> Self {
        Self(counts)
    }

    /// Tally observations by month; absent or out-of-range months are
    /// ignored.
    pub fn from_observations<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Self {
        let mut counts = [0u32; 12];
        for month in observations.into_iter().filter_map(|o| o.month) {
            if (1..=12).contains(&month) {
                counts[month as usize - 1] += 1;
            }
        }
        Self(counts)
    }

    pub fn counts(&self) -> &[u32; 12] {
        &self.0
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }
}
