use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::core::color::Color;
use crate::core::color_scheme::resolve_color;
use crate::core::stacking::{StackedPoint, StackedSeries};
use crate::core::table::{ColumnRow, ColumnSlice, Table};
use crate::core::types::{EntityName, Time};

/// Inputs of one table preprocessing pass.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    pub selected_entities: &'a [EntityName],
    pub y_column_slugs: &'a [String],
    pub relative_mode: bool,
}

/// Prepares a raw table for series extraction.
///
/// Stages run in a fixed order: entity restriction, error marking, dropping
/// fully invalid rows, per-column tolerance interpolation, then optional
/// percentage normalization. Reordering them changes results (interpolated
/// cells must take part in the percentage sums).
#[must_use]
pub fn transform_table(table: &Table, request: TransformRequest<'_>) -> Table {
    if request.y_column_slugs.is_empty() {
        return table.clone();
    }
    let slugs = request.y_column_slugs;

    let mut table = table.filter_by_entities(request.selected_entities);
    trace!(rows = table.row_count(), "filtered by selected entities");

    table = table.replace_non_numeric_with_errors(slugs);

    table = table.drop_rows_with_errors_for_all_columns(slugs);
    trace!(rows = table.row_count(), "dropped fully invalid rows");

    for slug in slugs {
        table = table.interpolate_column_with_tolerance(slug);
    }

    if request.relative_mode {
        table = table.to_percentage_across_columns(slugs);
    }

    debug!(
        rows = table.row_count(),
        columns = slugs.len(),
        relative_mode = request.relative_mode,
        "transformed table"
    );
    table
}

/// Time each entity is read at: `end_time` when given, otherwise the latest
/// time where any column holds a valid value for that entity. Every column is
/// read at the same time so one bar never mixes rows from different times.
fn entity_times(columns: &[ColumnSlice], end_time: Option<Time>) -> IndexMap<&str, Time> {
    let mut times: IndexMap<&str, Time> = IndexMap::new();
    for row in columns.iter().flat_map(|column| column.rows.iter()) {
        if end_time.is_some_and(|time| row.time != time) {
            continue;
        }
        match times.entry(row.entity.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(row.time);
            }
            Entry::Occupied(mut slot) => {
                if row.time > *slot.get() {
                    slot.insert(row.time);
                }
            }
        }
    }
    times
}

/// Picks the row of each entity at its target time. A later duplicate at the
/// same time wins. Entities keep their first-seen order.
fn rows_at_entity_times<'a>(
    rows: &'a [ColumnRow],
    times: &IndexMap<&str, Time>,
) -> Vec<&'a ColumnRow> {
    let mut picked: IndexMap<&str, &ColumnRow> = IndexMap::new();
    for row in rows {
        if times.get(row.entity.as_str()) == Some(&row.time) {
            picked.insert(row.entity.as_str(), row);
        }
    }
    picked.into_values().collect()
}

/// Builds one unstacked series per column, in column order.
///
/// Each entity contributes at most one point per column, read at the entity's
/// target time (see [`entity_times`]). A column without a value at that time
/// gives the entity no segment. Colors come from the column override or the
/// palette entry at the column's index. Columns without any point are dropped.
#[must_use]
pub fn unstacked_series(
    columns: &[ColumnSlice],
    palette: &[Color],
    end_time: Option<Time>,
) -> Vec<StackedSeries> {
    let times = entity_times(columns, end_time);
    trace!(entities = times.len(), "resolved entity times");

    columns
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            let points: Vec<StackedPoint> = rows_at_entity_times(&column.rows, &times)
                .into_iter()
                .map(|row| StackedPoint::new(row.entity.clone(), row.value))
                .collect();
            if points.is_empty() {
                debug!(column = %column.slug, "dropping series without data");
                return None;
            }
            Some(StackedSeries {
                series_name: column.display_name.clone(),
                color: resolve_color(column.color, palette, index),
                points,
            })
        })
        .collect()
}
