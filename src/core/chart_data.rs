use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::color_scheme::ColorScheme;
use crate::core::domain::{AxisDomain, stacked_domain};
use crate::core::failure::{classify_failure, fail_message, non_finite_stack_failure};
use crate::core::ordering::{Item, ordered_items};
use crate::core::source::{SelectionProvider, SeriesSource};
use crate::core::stacking::{StackedSeries, stack_series};
use crate::core::table::ColumnSlice;
use crate::core::transform::{TransformRequest, transform_table, unstacked_series};
use crate::error::ChartFailure;

/// Everything derived from one input snapshot, before pixel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub y_column_slugs: Vec<String>,
    pub columns: Vec<ColumnSlice>,
    pub series: Vec<StackedSeries>,
    pub items: Vec<Item>,
    pub domain: AxisDomain,
    pub failure: Option<ChartFailure>,
}

impl ChartData {
    #[must_use]
    pub fn fail_message(&self) -> String {
        fail_message(self.failure.as_ref())
    }
}

/// Runs transform, extraction, stacking, domain and ordering for one snapshot.
///
/// Columns without an explicit color take the scheme entry at their index.
#[must_use]
pub fn derive_chart_data(
    source: &dyn SeriesSource,
    selection: &dyn SelectionProvider,
    color_scheme: ColorScheme,
    baseline: f64,
) -> ChartData {
    let y_column_slugs = source
        .y_column_slugs()
        .map_or_else(|| source.table().numeric_column_slugs(), <[String]>::to_vec);
    let selected = selection.selected_entity_names();

    let columns = match source.transformed_table() {
        Some(table) => table.get_columns(&y_column_slugs),
        None => transform_table(
            source.table(),
            TransformRequest {
                selected_entities: selected,
                y_column_slugs: &y_column_slugs,
                relative_mode: source.is_relative_mode(),
            },
        )
        .get_columns(&y_column_slugs),
    };

    let palette = color_scheme.get_colors(columns.len());
    let series = stack_series(&unstacked_series(&columns, &palette, source.end_time()));

    let failure = classify_failure(&y_column_slugs, selection.has_selection(), &columns)
        .or_else(|| non_finite_stack_failure(&series));
    if let Some(failure) = &failure {
        debug!(reason = %failure, "chart has nothing to draw");
    }

    let items = ordered_items(&series, selected, baseline);
    let domain = stacked_domain(&series, baseline);
    debug!(
        series = series.len(),
        items = items.len(),
        domain_min = domain.min,
        domain_max = domain.max,
        "derived chart data"
    );

    ChartData {
        y_column_slugs,
        columns,
        series,
        items,
        domain,
        failure,
    }
}
