use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::color::Color;
use crate::core::ordering::Item;
use crate::core::scale::LinearScale;
use crate::core::types::{Bounds, EntityName, SeriesName};
use crate::error::ChartResult;

/// Share of each row band occupied by bars; the rest is spacing.
pub const DEFAULT_BAR_FILL_RATIO: f64 = 0.8;

/// Vertical sizing shared by every row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    pub bar_height: f64,
    pub bar_spacing: f64,
}

/// Splits `available_height` into equal row bands.
///
/// Returns `None` for zero rows instead of dividing by zero.
#[must_use]
pub fn row_metrics(available_height: f64, item_count: usize, fill_ratio: f64) -> Option<RowMetrics> {
    if item_count == 0 {
        return None;
    }
    let band = available_height / item_count as f64;
    let bar_height = fill_ratio * band;
    Some(RowMetrics {
        bar_height,
        bar_spacing: band - bar_height,
    })
}

/// Pixel geometry of one bar segment.
///
/// `width` is signed: negative values extend left of `x`. Consumers mirror
/// those when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub series_name: SeriesName,
    pub color: Color,
    pub x: f64,
    pub width: f64,
    pub y_top: f64,
    pub height: f64,
    pub value: f64,
    pub value_offset: f64,
}

/// Pixel geometry of one entity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGeometry {
    pub label: EntityName,
    pub y_center: f64,
    pub bars: SmallVec<[BarGeometry; 4]>,
}

/// Lays out rows top to bottom inside `inner_bounds`, in item order.
///
/// Each row is vertically centered within its band. Bars start at
/// `baseline + value_offset` and span `scale(value) - scale(baseline)` pixels;
/// nothing is clamped here.
pub fn project_rows(
    items: &[Item],
    scale: LinearScale,
    inner_bounds: Bounds,
    baseline: f64,
    fill_ratio: f64,
) -> ChartResult<Vec<RowGeometry>> {
    let Some(metrics) = row_metrics(inner_bounds.height, items.len(), fill_ratio) else {
        return Ok(Vec::new());
    };

    let baseline_px = scale.domain_to_pixel(baseline)?;
    let mut y_center = inner_bounds.top() + metrics.bar_height / 2.0;
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let mut bars = SmallVec::with_capacity(item.bars.len());
        for bar in &item.bars {
            let x = scale.domain_to_pixel(baseline + bar.point.value_offset)?;
            let width = scale.domain_to_pixel(bar.point.value)? - baseline_px;
            bars.push(BarGeometry {
                series_name: bar.series_name.clone(),
                color: bar.color,
                x,
                width,
                y_top: y_center - metrics.bar_height / 2.0,
                height: metrics.bar_height,
                value: bar.point.value,
                value_offset: bar.point.value_offset,
            });
        }
        rows.push(RowGeometry {
            label: item.label.clone(),
            y_center,
            bars,
        });
        y_center += metrics.bar_height + metrics.bar_spacing;
    }
    Ok(rows)
}
