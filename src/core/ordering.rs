use std::cmp::Reverse;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::color::Color;
use crate::core::stacking::{StackedPoint, StackedSeries};
use crate::core::types::{EntityName, SeriesName};

/// A stacked point paired with its owning series' name and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub point: StackedPoint,
    pub color: Color,
    pub series_name: SeriesName,
}

/// Bars are inline up to this many series per row.
pub type RowBars = SmallVec<[Bar; 4]>;

/// One render row: an entity label plus its bars in stacking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub label: EntityName,
    pub bars: RowBars,
}

impl Item {
    /// Stacked end of the topmost bar, or `baseline` when the row has no bars.
    #[must_use]
    pub fn total(&self, baseline: f64) -> f64 {
        self.bars
            .last()
            .map_or(baseline, |bar| bar.point.stacked_value())
    }
}

/// Joins stacked series onto the selected entities.
///
/// An entity missing from a series simply has no bar for it.
#[must_use]
pub fn build_items(series: &[StackedSeries], selected_entities: &[EntityName]) -> Vec<Item> {
    let lookups: Vec<IndexMap<&str, &StackedPoint>> = series
        .iter()
        .map(|series| {
            series
                .points
                .iter()
                .map(|point| (point.position.as_str(), point))
                .collect()
        })
        .collect();

    selected_entities
        .iter()
        .map(|entity| Item {
            label: entity.clone(),
            bars: series
                .iter()
                .zip(&lookups)
                .filter_map(|(series, lookup)| {
                    lookup.get(entity.as_str()).map(|point| Bar {
                        point: (*point).clone(),
                        color: series.color,
                        series_name: series.series_name.clone(),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Sorts rows by topmost total, largest first.
///
/// The sort is stable: rows with equal totals (including rows without bars,
/// which count as `baseline`) keep their selection order.
pub fn sort_items_descending(items: &mut [Item], baseline: f64) {
    items.sort_by_cached_key(|item| Reverse(OrderedFloat(item.total(baseline))));
}

/// Builds and orders the rows for the selected entities.
#[must_use]
pub fn ordered_items(
    series: &[StackedSeries],
    selected_entities: &[EntityName],
    baseline: f64,
) -> Vec<Item> {
    let mut items = build_items(series, selected_entities);
    sort_items_descending(&mut items, baseline);
    items
}
