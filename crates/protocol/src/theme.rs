use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Border,

    TextPrimary,
    TextMuted,

    // Distribution map
    MapLand,
    MapLandBorder,
    MapDisputed,
    MapDisputedBorder,
    HeatFill,

    // Seasonality chart
    ChartBackground,
    ChartFrame,
    GridLine,
    GridLabel,
    CurveLine,
    CurveArea,
    CurvePoint,

    // Month label emphasis
    MonthPeak,
    MonthObserved,
    MonthEmpty,
}
