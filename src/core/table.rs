//! In-memory tabular store consumed by the transform pipeline.
//!
//! Rows are keyed by `(entity, time)` and carry one [`CellValue`] per value
//! column. Every operation returns a new table; inputs are never mutated, so a
//! table can be shared as an immutable snapshot between recomputations.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::primitives::{datetime_to_day_time, decimal_to_f64};
use crate::core::types::{EntityName, Time};
use crate::error::{ChartError, ChartResult};

/// Why a cell carries no usable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorValue {
    MissingValue,
    InvalidNumber,
    NoValueWithinTolerance,
    DivideByZero,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(ErrorValue),
}

impl CellValue {
    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        Ok(Self::Number(decimal_to_f64(value, "cell value")?))
    }

    /// Returns the cell as a finite number.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Metadata of one value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub slug: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
    /// Maximum time distance a missing cell may borrow a neighbor's value from.
    #[serde(default)]
    pub tolerance: u32,
}

impl ColumnDef {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            display_name: None,
            color: None,
            tolerance: 0,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub entity: EntityName,
    pub time: Time,
    pub cells: Vec<CellValue>,
}

/// One valid `(entity, time, value)` triple read from a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub entity: EntityName,
    pub time: Time,
    pub value: f64,
}

/// A column extracted from a table: metadata plus its valid rows only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSlice {
    pub slug: String,
    pub display_name: String,
    pub color: Option<Color>,
    pub rows: Vec<ColumnRow>,
}

impl ColumnSlice {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Deserialized tables go through [`Table::new`] and [`Table::push_row`], so
/// every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<TableRow>,
}

#[derive(Deserialize)]
struct TableRepr {
    columns: Vec<ColumnDef>,
    #[serde(default)]
    rows: Vec<TableRow>,
}

impl TryFrom<TableRepr> for Table {
    type Error = ChartError;

    fn try_from(repr: TableRepr) -> ChartResult<Self> {
        let mut table = Self::new(repr.columns)?;
        for row in repr.rows {
            table.push_row(row.entity, row.time, row.cells)?;
        }
        Ok(table)
    }
}

impl Table {
    pub fn new(columns: Vec<ColumnDef>) -> ChartResult<Self> {
        for (index, column) in columns.iter().enumerate() {
            if column.slug.is_empty() {
                return Err(ChartError::InvalidData(
                    "column slug must not be empty".to_owned(),
                ));
            }
            if columns[..index].iter().any(|other| other.slug == column.slug) {
                return Err(ChartError::InvalidData(format!(
                    "duplicate column slug `{}`",
                    column.slug
                )));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(
        &mut self,
        entity: impl Into<EntityName>,
        time: Time,
        cells: Vec<CellValue>,
    ) -> ChartResult<()> {
        if cells.len() != self.columns.len() {
            return Err(ChartError::InvalidData(format!(
                "row has {} cells but table has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(TableRow {
            entity: entity.into(),
            time,
            cells,
        });
        Ok(())
    }

    /// Appends a row keyed by a UTC timestamp mapped to a day index.
    pub fn push_row_at(
        &mut self,
        entity: impl Into<EntityName>,
        time: DateTime<Utc>,
        cells: Vec<CellValue>,
    ) -> ChartResult<()> {
        self.push_row(entity, datetime_to_day_time(time), cells)
    }

    pub fn with_row(
        mut self,
        entity: impl Into<EntityName>,
        time: Time,
        cells: Vec<CellValue>,
    ) -> ChartResult<Self> {
        self.push_row(entity, time, cells)?;
        Ok(self)
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_index(&self, slug: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.slug == slug)
    }

    #[must_use]
    pub fn column_def(&self, slug: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.slug == slug)
    }

    /// Pins the series color of one column, overriding the palette.
    pub fn set_column_color(&mut self, slug: &str, color: Color) -> ChartResult<()> {
        color.validate()?;
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.slug == slug)
            .ok_or_else(|| ChartError::UnknownColumn(slug.to_owned()))?;
        column.color = Some(color);
        Ok(())
    }

    /// Slugs of every column holding at least one numeric cell, in table order.
    #[must_use]
    pub fn numeric_column_slugs(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                self.rows
                    .iter()
                    .any(|row| row.cells[*index].number().is_some())
            })
            .map(|(_, column)| column.slug.clone())
            .collect()
    }

    fn resolve_indices(&self, slugs: &[String]) -> Vec<usize> {
        slugs
            .iter()
            .filter_map(|slug| self.column_index(slug))
            .collect()
    }

    fn with_rows(&self, rows: Vec<TableRow>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Keeps only rows of the given entities, preserving row order.
    #[must_use]
    pub fn filter_by_entities(&self, entities: &[EntityName]) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|row| entities.contains(&row.entity))
            .cloned()
            .collect();
        self.with_rows(rows)
    }

    /// Replaces text and non-finite cells of the given columns with
    /// [`ErrorValue::InvalidNumber`]. Existing error cells are kept as they are.
    #[must_use]
    pub fn replace_non_numeric_with_errors(&self, slugs: &[String]) -> Self {
        let indices = self.resolve_indices(slugs);
        let mut table = self.clone();
        for row in &mut table.rows {
            for &index in &indices {
                let cell = &mut row.cells[index];
                if !cell.is_error() && cell.number().is_none() {
                    *cell = CellValue::Error(ErrorValue::InvalidNumber);
                }
            }
        }
        table
    }

    /// Drops rows whose cells are unusable in every one of the given columns.
    /// Rows with at least one valid cell are kept.
    #[must_use]
    pub fn drop_rows_with_errors_for_all_columns(&self, slugs: &[String]) -> Self {
        let indices = self.resolve_indices(slugs);
        if indices.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                indices
                    .iter()
                    .any(|&index| row.cells[index].number().is_some())
            })
            .cloned()
            .collect();
        self.with_rows(rows)
    }

    /// Fills unusable cells of one column from the nearest valid row of the same
    /// entity whose time lies within the column tolerance.
    ///
    /// When the previous and next candidates are equally far away the later one
    /// wins. Cells with no candidate become [`ErrorValue::NoValueWithinTolerance`].
    #[must_use]
    pub fn interpolate_column_with_tolerance(&self, slug: &str) -> Self {
        let Some(column_index) = self.column_index(slug) else {
            return self.clone();
        };
        let tolerance = u64::from(self.columns[column_index].tolerance);

        let mut by_entity: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            by_entity.entry(row.entity.as_str()).or_default().push(row_index);
        }

        let mut table = self.clone();
        for (_, mut row_indices) in by_entity {
            row_indices.sort_by_key(|&row_index| self.rows[row_index].time);
            let values: Vec<Option<f64>> = row_indices
                .iter()
                .map(|&row_index| self.rows[row_index].cells[column_index].number())
                .collect();

            for (position, &row_index) in row_indices.iter().enumerate() {
                if values[position].is_some() {
                    continue;
                }
                let time = self.rows[row_index].time;
                let previous = (0..position)
                    .rev()
                    .find_map(|candidate| values[candidate].map(|value| (candidate, value)));
                let next = (position + 1..values.len())
                    .find_map(|candidate| values[candidate].map(|value| (candidate, value)));

                let distance =
                    |candidate: usize| self.rows[row_indices[candidate]].time.abs_diff(time);
                let previous_distance = previous.map_or(u64::MAX, |(idx, _)| distance(idx));
                let next_distance = next.map_or(u64::MAX, |(idx, _)| distance(idx));

                let filled = match (previous, next) {
                    (_, Some((_, value)))
                        if next_distance <= previous_distance && next_distance <= tolerance =>
                    {
                        CellValue::Number(value)
                    }
                    (Some((_, value)), _) if previous_distance <= tolerance => {
                        CellValue::Number(value)
                    }
                    _ => CellValue::Error(ErrorValue::NoValueWithinTolerance),
                };
                table.rows[row_index].cells[column_index] = filled;
            }
        }
        table
    }

    /// Rewrites each valid cell of the given columns as a percentage of the sum
    /// of those columns in the same row.
    ///
    /// A row whose sum is zero, or whose shares overflow, turns its valid cells
    /// into [`ErrorValue::DivideByZero`].
    #[must_use]
    pub fn to_percentage_across_columns(&self, slugs: &[String]) -> Self {
        let indices = self.resolve_indices(slugs);
        let mut table = self.clone();
        for row in &mut table.rows {
            let sum: f64 = indices
                .iter()
                .filter_map(|&index| row.cells[index].number())
                .sum();
            for &index in &indices {
                let Some(value) = row.cells[index].number() else {
                    continue;
                };
                let share = value / sum * 100.0;
                row.cells[index] = if sum == 0.0 || !share.is_finite() {
                    CellValue::Error(ErrorValue::DivideByZero)
                } else {
                    CellValue::Number(share)
                };
            }
        }
        table
    }

    /// Extracts the given columns in request order.
    ///
    /// Unknown slugs yield an empty slice named after the slug, so callers can
    /// still report which columns had no data.
    #[must_use]
    pub fn get_columns(&self, slugs: &[String]) -> Vec<ColumnSlice> {
        slugs
            .iter()
            .map(|slug| match self.column_index(slug) {
                Some(index) => {
                    let column = &self.columns[index];
                    ColumnSlice {
                        slug: column.slug.clone(),
                        display_name: column.display_name().to_owned(),
                        color: column.color,
                        rows: self
                            .rows
                            .iter()
                            .filter_map(|row| {
                                row.cells[index].number().map(|value| ColumnRow {
                                    entity: row.entity.clone(),
                                    time: row.time,
                                    value,
                                })
                            })
                            .collect(),
                    }
                }
                None => ColumnSlice {
                    slug: slug.clone(),
                    display_name: slug.clone(),
                    color: None,
                    rows: Vec::new(),
                },
            })
            .collect()
    }
}
