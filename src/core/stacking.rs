use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::types::{EntityName, SeriesName};

/// One entity's contribution to a series.
///
/// `value_offset` is the sum of the values of every lower series that also has
/// a point for `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub position: EntityName,
    pub value: f64,
    pub value_offset: f64,
}

impl StackedPoint {
    #[must_use]
    pub fn new(position: impl Into<EntityName>, value: f64) -> Self {
        Self {
            position: position.into(),
            value,
            value_offset: 0.0,
        }
    }

    /// End of the stacked segment (`value + value_offset`).
    #[must_use]
    pub fn stacked_value(&self) -> f64 {
        self.value + self.value_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub series_name: SeriesName,
    pub color: Color,
    pub points: Vec<StackedPoint>,
}

impl StackedSeries {
    /// Looks up the point of an entity; `None` means the series has no data for
    /// it, which is different from a zero value.
    #[must_use]
    pub fn point_for(&self, position: &str) -> Option<&StackedPoint> {
        self.points.iter().find(|point| point.position == position)
    }
}

/// Stacks series bottom to top, keyed by entity.
///
/// Offsets only accumulate across series that contain the entity; a series
/// without a point for an entity neither contributes to nor receives a point
/// for it. Series order and point order are preserved.
#[must_use]
pub fn stack_series(series: &[StackedSeries]) -> Vec<StackedSeries> {
    let mut running: IndexMap<&str, f64> = IndexMap::new();
    series
        .iter()
        .map(|current| {
            let points = current
                .points
                .iter()
                .map(|point| {
                    let total = running.entry(point.position.as_str()).or_insert(0.0);
                    let value_offset = *total;
                    *total += point.value;
                    StackedPoint {
                        position: point.position.clone(),
                        value: point.value,
                        value_offset,
                    }
                })
                .collect();
            StackedSeries {
                series_name: current.series_name.clone(),
                color: current.color,
                points,
            }
        })
        .collect()
}
