mod chart_config;
mod chart_layout;
mod chart_snapshot;
mod derived_cache;
mod focus_controller;
mod legend;
mod render_frame_builder;

use std::cell::RefCell;
use std::sync::Arc;

use tracing::debug;

pub use chart_config::{AxisConfig, LegendConfig, StackedBarChartConfig};
pub use chart_layout::ChartLayout;
pub use chart_snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};
pub use derived_cache::DerivedCacheStats;
pub use legend::{CategoricalBin, estimate_legend_height, legend_bins};

use crate::core::{
    AxisDomain, Bounds, ChartData, ColorScheme, EntityName, EstimatedTextMeasurer,
    SelectionArray, SelectionProvider, SeriesSource, Table, TextMeasurer, Time,
    derive_chart_data,
};
use crate::error::ChartResult;
use crate::interaction::FocusState;
use crate::render::Renderer;

use derived_cache::DerivedCache;

/// Data-side inputs of a chart: the table and how to read it.
#[derive(Debug, Clone, Default)]
pub struct ChartInputs {
    pub table: Arc<Table>,
    pub transformed_table: Option<Arc<Table>>,
    pub y_column_slugs: Option<Vec<String>>,
    pub relative_mode: bool,
    pub end_time: Option<Time>,
}

impl ChartInputs {
    #[must_use]
    pub fn new(table: impl Into<Arc<Table>>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_y_column_slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y_column_slugs = Some(slugs.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_relative_mode(mut self, relative_mode: bool) -> Self {
        self.relative_mode = relative_mode;
        self
    }

    #[must_use]
    pub fn with_end_time(mut self, end_time: Time) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn with_transformed_table(mut self, table: impl Into<Arc<Table>>) -> Self {
        self.transformed_table = Some(table.into());
        self
    }
}

impl SeriesSource for ChartInputs {
    fn table(&self) -> &Table {
        &self.table
    }

    fn transformed_table(&self) -> Option<&Table> {
        self.transformed_table.as_deref()
    }

    fn y_column_slugs(&self) -> Option<&[String]> {
        self.y_column_slugs.as_deref()
    }

    fn is_relative_mode(&self) -> bool {
        self.relative_mode
    }

    fn end_time(&self) -> Option<Time> {
        self.end_time
    }
}

/// Stacked discrete bar chart: one horizontal row per selected entity, one
/// stacked segment per value column.
///
/// Derived data and layout are recomputed lazily and memoized per input
/// generation; the renderer only ever receives finished frames.
pub struct StackedBarChart<R: Renderer> {
    renderer: R,
    inputs: ChartInputs,
    selection: SelectionArray,
    config: StackedBarChartConfig,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    focus: FocusState,
    data_generation: u64,
    layout_generation: u64,
    cache: RefCell<DerivedCache>,
}

impl<R: Renderer> StackedBarChart<R> {
    pub fn new(renderer: R, config: StackedBarChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            inputs: ChartInputs::default(),
            selection: SelectionArray::default(),
            config,
            measurer: Arc::new(EstimatedTextMeasurer),
            focus: FocusState::default(),
            data_generation: 0,
            layout_generation: 0,
            cache: RefCell::new(DerivedCache::default()),
        })
    }

    /// Replaces the label-width estimator, e.g. with a real font backend.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self.layout_generation = self.layout_generation.wrapping_add(1);
        self
    }

    fn bump_data(&mut self) {
        self.data_generation = self.data_generation.wrapping_add(1);
    }

    pub fn set_inputs(&mut self, inputs: ChartInputs) {
        self.inputs = inputs;
        self.bump_data();
    }

    pub fn set_table(&mut self, table: impl Into<Arc<Table>>) {
        self.inputs.table = table.into();
        self.bump_data();
    }

    /// Supplies an already transformed table; the transform stages are skipped
    /// while it is set.
    pub fn set_transformed_table(&mut self, table: Option<Arc<Table>>) {
        self.inputs.transformed_table = table;
        self.bump_data();
    }

    pub fn set_y_column_slugs(&mut self, slugs: Option<Vec<String>>) {
        self.inputs.y_column_slugs = slugs;
        self.bump_data();
    }

    pub fn set_relative_mode(&mut self, relative_mode: bool) {
        if self.inputs.relative_mode != relative_mode {
            self.inputs.relative_mode = relative_mode;
            self.bump_data();
        }
    }

    pub fn set_end_time(&mut self, end_time: Option<Time>) {
        if self.inputs.end_time != end_time {
            self.inputs.end_time = end_time;
            self.bump_data();
        }
    }

    pub fn set_selection(&mut self, selection: SelectionArray) {
        self.selection = selection;
        self.bump_data();
    }

    pub fn select_entity(&mut self, entity: impl Into<EntityName>) {
        self.selection.select(entity);
        self.bump_data();
    }

    pub fn deselect_entity(&mut self, entity: &str) {
        self.selection.deselect(entity);
        self.bump_data();
    }

    /// Replaces the whole config after validating it.
    pub fn set_config(&mut self, config: StackedBarChartConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        self.bump_data();
        self.layout_generation = self.layout_generation.wrapping_add(1);
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> ChartResult<()> {
        self.config.bounds = bounds.validate()?;
        self.layout_generation = self.layout_generation.wrapping_add(1);
        debug!(width = bounds.width, height = bounds.height, "chart bounds updated");
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &StackedBarChartConfig {
        &self.config
    }

    #[must_use]
    pub fn inputs(&self) -> &ChartInputs {
        &self.inputs
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionArray {
        &self.selection
    }

    #[must_use]
    pub fn selected_entity_names(&self) -> &[EntityName] {
        self.selection.selected_entity_names()
    }

    /// Derived series, items, domain and failure for the current inputs.
    #[must_use]
    pub fn data(&self) -> Arc<ChartData> {
        self.cache
            .borrow_mut()
            .data_or_insert_with(self.data_generation, || {
                derive_chart_data(
                    &self.inputs,
                    &self.selection,
                    ColorScheme::resolve(self.config.color_scheme.as_deref()),
                    self.config.baseline,
                )
            })
    }

    /// Empty when the chart has something to draw.
    #[must_use]
    pub fn fail_message(&self) -> String {
        self.data().fail_message()
    }

    /// Value-axis domain after applying user min/max settings.
    #[must_use]
    pub fn axis_domain(&self) -> AxisDomain {
        self.data()
            .domain
            .with_user_bounds(self.config.axis.min, self.config.axis.max)
    }

    #[must_use]
    pub fn derived_cache_stats(&self) -> DerivedCacheStats {
        self.cache.borrow().stats()
    }

    pub fn clear_derived_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
