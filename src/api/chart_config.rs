use serde::{Deserialize, Serialize};

use crate::core::{Bounds, DEFAULT_BAR_FILL_RATIO, DEFAULT_BASELINE};
use crate::error::{ChartError, ChartResult};

/// User settings of the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisConfig {
    /// Overrides the lower domain end.
    #[serde(default)]
    pub min: Option<f64>,
    /// Overrides the upper domain end.
    #[serde(default)]
    pub max: Option<f64>,
    /// Height reserved below the rows for ticks and tick labels.
    #[serde(default)]
    pub height_px: Option<f64>,
}

impl AxisConfig {
    #[must_use]
    pub fn resolved_height(self, base_font_size: f64) -> f64 {
        self.height_px.unwrap_or(base_font_size * 1.5)
    }
}

/// Sizing of the horizontal categorical legend above the rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_legend_font_scale")]
    pub font_scale: f64,
    #[serde(default = "default_legend_marker_size_px")]
    pub marker_size_px: f64,
    #[serde(default = "default_legend_marker_label_gap_px")]
    pub marker_label_gap_px: f64,
    #[serde(default = "default_legend_item_gap_px")]
    pub item_gap_px: f64,
    #[serde(default = "default_legend_row_gap_px")]
    pub row_gap_px: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            font_scale: default_legend_font_scale(),
            marker_size_px: default_legend_marker_size_px(),
            marker_label_gap_px: default_legend_marker_label_gap_px(),
            item_gap_px: default_legend_item_gap_px(),
            row_gap_px: default_legend_row_gap_px(),
        }
    }
}

/// Public chart configuration.
///
/// Serializable so host applications can persist/load chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarChartConfig {
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default = "default_base_font_size")]
    pub base_font_size: f64,
    #[serde(default = "default_label_font_scale")]
    pub label_font_scale: f64,
    #[serde(default = "default_label_to_bar_padding_px")]
    pub label_to_bar_padding_px: f64,
    #[serde(default = "default_right_padding_px")]
    pub right_padding_px: f64,
    #[serde(default = "default_bar_fill_ratio")]
    pub bar_fill_ratio: f64,
    #[serde(default = "default_focused_opacity")]
    pub focused_opacity: f64,
    #[serde(default = "default_faint_opacity")]
    pub faint_opacity: f64,
    #[serde(default = "default_baseline")]
    pub baseline: f64,
    #[serde(default)]
    pub axis: AxisConfig,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub legend: LegendConfig,
}

impl Default for StackedBarChartConfig {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl StackedBarChartConfig {
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            base_font_size: default_base_font_size(),
            label_font_scale: default_label_font_scale(),
            label_to_bar_padding_px: default_label_to_bar_padding_px(),
            right_padding_px: default_right_padding_px(),
            bar_fill_ratio: default_bar_fill_ratio(),
            focused_opacity: default_focused_opacity(),
            faint_opacity: default_faint_opacity(),
            baseline: default_baseline(),
            axis: AxisConfig::default(),
            color_scheme: None,
            legend: LegendConfig::default(),
        }
    }

    #[must_use]
    pub fn with_base_font_size(mut self, base_font_size: f64) -> Self {
        self.base_font_size = base_font_size;
        self
    }

    #[must_use]
    pub fn with_bar_fill_ratio(mut self, bar_fill_ratio: f64) -> Self {
        self.bar_fill_ratio = bar_fill_ratio;
        self
    }

    #[must_use]
    pub fn with_opacities(mut self, focused_opacity: f64, faint_opacity: f64) -> Self {
        self.focused_opacity = focused_opacity;
        self.faint_opacity = faint_opacity;
        self
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets user overrides for the value-axis domain ends.
    #[must_use]
    pub fn with_axis_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.axis.min = min;
        self.axis.max = max;
        self
    }

    #[must_use]
    pub fn with_axis_height(mut self, height_px: f64) -> Self {
        self.axis.height_px = Some(height_px);
        self
    }

    #[must_use]
    pub fn with_color_scheme(mut self, name: impl Into<String>) -> Self {
        self.color_scheme = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    /// Font size of entity labels.
    #[must_use]
    pub fn label_font_size(&self) -> f64 {
        self.label_font_scale * self.base_font_size
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.bounds.validate()?;

        for (name, value) in [
            ("base_font_size", self.base_font_size),
            ("label_font_scale", self.label_font_scale),
            ("legend.font_scale", self.legend.font_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("label_to_bar_padding_px", self.label_to_bar_padding_px),
            ("right_padding_px", self.right_padding_px),
            ("legend.marker_size_px", self.legend.marker_size_px),
            ("legend.marker_label_gap_px", self.legend.marker_label_gap_px),
            ("legend.item_gap_px", self.legend.item_gap_px),
            ("legend.row_gap_px", self.legend.row_gap_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        for (name, value) in [
            ("bar_fill_ratio", self.bar_fill_ratio),
            ("focused_opacity", self.focused_opacity),
            ("faint_opacity", self.faint_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and in [0, 1]"
                )));
            }
        }

        if !self.baseline.is_finite() {
            return Err(ChartError::InvalidData(
                "baseline must be finite".to_owned(),
            ));
        }
        if let Some(height_px) = self.axis.height_px {
            if !height_px.is_finite() || height_px < 0.0 {
                return Err(ChartError::InvalidData(
                    "axis height must be finite and >= 0".to_owned(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.axis.min, self.axis.max) {
            if min > max {
                return Err(ChartError::InvalidData(
                    "axis min must be <= axis max".to_owned(),
                ));
            }
        }

        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse chart config: {e}"))
        })?;
        config.validate()
    }
}

fn default_base_font_size() -> f64 {
    16.0
}

fn default_label_font_scale() -> f64 {
    0.75
}

fn default_label_to_bar_padding_px() -> f64 {
    5.0
}

fn default_right_padding_px() -> f64 {
    10.0
}

fn default_bar_fill_ratio() -> f64 {
    DEFAULT_BAR_FILL_RATIO
}

fn default_focused_opacity() -> f64 {
    0.85
}

fn default_faint_opacity() -> f64 {
    0.1
}

fn default_baseline() -> f64 {
    DEFAULT_BASELINE
}

fn default_legend_font_scale() -> f64 {
    0.75
}

fn default_legend_marker_size_px() -> f64 {
    11.0
}

fn default_legend_marker_label_gap_px() -> f64 {
    5.0
}

fn default_legend_item_gap_px() -> f64 {
    15.0
}

fn default_legend_row_gap_px() -> f64 {
    5.0
}
