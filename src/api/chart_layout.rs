use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    AxisDomain, Bounds, ChartData, LinearScale, RowGeometry, RowMetrics, TextMeasurer, TextStyle,
    longest_label_width, project_rows, row_metrics,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{StackedBarChart, StackedBarChartConfig, estimate_legend_height, legend_bins};
use super::derived_cache::LayoutCacheKey;

/// Pixel layout of a chart that has something to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Chart bounds after the right padding.
    pub bounds: Bounds,
    /// Area the rows are laid out in.
    pub inner_bounds: Bounds,
    pub label_width: f64,
    pub label_style: TextStyle,
    pub legend_height: f64,
    pub axis_height: f64,
    pub axis_range: (f64, f64),
    pub domain: AxisDomain,
    pub scale: LinearScale,
    pub row_metrics: RowMetrics,
    pub rows: Vec<RowGeometry>,
    /// Pixel position of the baseline on the value axis.
    pub baseline_px: f64,
}

impl ChartLayout {
    /// Lays out `data` inside the configured bounds.
    ///
    /// Returns `Ok(None)` when the data carries a failure or has no rows.
    pub fn compute(
        data: &ChartData,
        config: &StackedBarChartConfig,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Option<Self>> {
        if data.failure.is_some() {
            debug!(reason = %data.fail_message(), "layout skipped for failed chart");
            return Ok(None);
        }

        let bounds = config.bounds.pad_right(config.right_padding_px);
        let label_style = TextStyle::new(config.label_font_size(), true);
        let label_width = longest_label_width(
            data.items.iter().map(|item| item.label.as_str()),
            measurer,
            label_style,
        );

        let bins = legend_bins(&data.series);
        let legend_height = estimate_legend_height(
            &bins,
            bounds.width,
            config.base_font_size,
            config.legend,
            measurer,
        );
        let axis_height = config.axis.resolved_height(config.base_font_size);

        let inner_bounds = bounds
            .pad_left(label_width)
            .pad_bottom(axis_height)
            .pad_top(config.base_font_size)
            .pad_top(legend_height);

        let axis_range = (bounds.left() + label_width, bounds.right());
        let domain = data
            .domain
            .with_user_bounds(config.axis.min, config.axis.max);
        let scale = LinearScale::new(domain.as_tuple(), axis_range)?;

        let Some(metrics) = row_metrics(
            inner_bounds.height,
            data.items.len(),
            config.bar_fill_ratio,
        ) else {
            debug!("layout skipped for chart without rows");
            return Ok(None);
        };

        let rows = project_rows(
            &data.items,
            scale,
            inner_bounds,
            config.baseline,
            config.bar_fill_ratio,
        )?;
        let baseline_px = scale.domain_to_pixel(config.baseline)?;

        debug!(
            rows = rows.len(),
            label_width,
            legend_height,
            bar_height = metrics.bar_height,
            "computed chart layout"
        );

        Ok(Some(Self {
            bounds,
            inner_bounds,
            label_width,
            label_style,
            legend_height,
            axis_height,
            axis_range,
            domain,
            scale,
            row_metrics: metrics,
            rows,
            baseline_px,
        }))
    }
}

impl<R: Renderer> StackedBarChart<R> {
    /// Current pixel layout, or `None` while the chart shows a fail message.
    #[must_use]
    pub fn layout(&self) -> Option<Arc<ChartLayout>> {
        let key = LayoutCacheKey {
            data_generation: self.data_generation,
            layout_generation: self.layout_generation,
        };
        if let Some(layout) = self.cache.borrow_mut().cached_layout(key) {
            return layout;
        }

        let data = self.data();
        let layout = match ChartLayout::compute(&data, &self.config, self.measurer.as_ref()) {
            Ok(layout) => layout.map(Arc::new),
            Err(err) => {
                warn!(error = %err, "failed to compute chart layout");
                None
            }
        };
        self.cache.borrow_mut().store_layout(key, layout.clone());
        layout
    }

    /// Width reserved for entity labels, `0.0` without a layout.
    #[must_use]
    pub fn label_width(&self) -> f64 {
        self.layout().map_or(0.0, |layout| layout.label_width)
    }

    #[must_use]
    pub fn inner_bounds(&self) -> Option<Bounds> {
        self.layout().map(|layout| layout.inner_bounds)
    }
}
