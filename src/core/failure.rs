use crate::core::stacking::StackedSeries;
use crate::core::table::ColumnSlice;
use crate::error::ChartFailure;

/// Decides whether the chart has anything to draw.
///
/// Checks run in order and the first match wins: no configured value column,
/// then an empty selection, then every transformed column being empty.
#[must_use]
pub fn classify_failure(
    y_column_slugs: &[String],
    has_selection: bool,
    columns: &[ColumnSlice],
) -> Option<ChartFailure> {
    if y_column_slugs.is_empty() {
        return Some(ChartFailure::NoColumnToChart);
    }
    if !has_selection {
        return Some(ChartFailure::NoDataSelected);
    }
    if columns.iter().all(ColumnSlice::is_empty) {
        return Some(ChartFailure::NoMatchingData {
            columns: y_column_slugs.to_vec(),
        });
    }
    None
}

/// Flags stacks whose running sums overflowed. Finite cells can still add up
/// past `f64::MAX`, and such a stack has no drawable extent.
#[must_use]
pub fn non_finite_stack_failure(series: &[StackedSeries]) -> Option<ChartFailure> {
    let overflowed = series
        .iter()
        .flat_map(|series| series.points.iter())
        .any(|point| !point.value_offset.is_finite() || !point.stacked_value().is_finite());
    overflowed.then_some(ChartFailure::NonFiniteStack)
}

/// User-facing message for an optional failure; empty means the chart is fine.
#[must_use]
pub fn fail_message(failure: Option<&ChartFailure>) -> String {
    failure.map(ToString::to_string).unwrap_or_default()
}
