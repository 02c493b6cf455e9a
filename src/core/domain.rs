use serde::{Deserialize, Serialize};

use crate::core::stacking::StackedSeries;

/// Reference value the value axis always includes.
pub const DEFAULT_BASELINE: f64 = 0.0;

/// Closed numeric interval `[min, max]` of the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Replaces either end with a user-configured bound when one is set.
    #[must_use]
    pub fn with_user_bounds(self, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.filter(|value| value.is_finite()).unwrap_or(self.min),
            max: max.filter(|value| value.is_finite()).unwrap_or(self.max),
        }
    }
}

/// Domain spanning every stacked segment end, always including `baseline`.
///
/// With no points the domain collapses to `[baseline, baseline]`.
#[must_use]
pub fn stacked_domain(series: &[StackedSeries], baseline: f64) -> AxisDomain {
    series
        .iter()
        .flat_map(|series| series.points.iter())
        .map(|point| point.stacked_value())
        .fold(AxisDomain::new(baseline, baseline), |domain, value| {
            AxisDomain::new(domain.min.min(value), domain.max.max(value))
        })
}
