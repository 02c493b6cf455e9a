use serde::{Deserialize, Serialize};

use crate::core::{Color, SeriesName, StackedSeries, TextMeasurer, TextStyle};

use super::LegendConfig;

/// One entry of the categorical color legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalBin {
    pub index: usize,
    pub value: SeriesName,
    pub label: String,
    pub color: Color,
}

/// Builds one bin per stacked series, in stacking order.
#[must_use]
pub fn legend_bins(series: &[StackedSeries]) -> Vec<CategoricalBin> {
    series
        .iter()
        .enumerate()
        .map(|(index, series)| CategoricalBin {
            index,
            value: series.series_name.clone(),
            label: series.series_name.clone(),
            color: series.color,
        })
        .collect()
}

/// Height of a left-aligned horizontal legend wrapping bins across `max_width`.
///
/// A bin wider than `max_width` still gets its own line.
#[must_use]
pub fn estimate_legend_height(
    bins: &[CategoricalBin],
    max_width: f64,
    base_font_size: f64,
    config: LegendConfig,
    measurer: &dyn TextMeasurer,
) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }

    let style = TextStyle::new(config.font_scale * base_font_size, false);
    let line_height = measurer.line_height_px(style).max(config.marker_size_px);

    let mut lines = 1_usize;
    let mut cursor_x = 0.0;
    for bin in bins {
        let width = config.marker_size_px
            + config.marker_label_gap_px
            + measurer.text_width_px(&bin.label, style);
        if cursor_x > 0.0 && cursor_x + width > max_width {
            lines += 1;
            cursor_x = 0.0;
        }
        cursor_x += width + config.item_gap_px;
    }

    lines as f64 * line_height + (lines - 1) as f64 * config.row_gap_px
}

#[cfg(test)]
mod tests {
    use super::{CategoricalBin, estimate_legend_height, legend_bins};
    use crate::api::LegendConfig;
    use crate::core::{Color, EstimatedTextMeasurer, StackedPoint, StackedSeries, TextMeasurer};

    #[derive(Debug)]
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn text_width_px(&self, text: &str, _style: crate::core::TextStyle) -> f64 {
            text.chars().count() as f64 * 10.0
        }

        fn line_height_px(&self, _style: crate::core::TextStyle) -> f64 {
            14.0
        }
    }

    fn bin(index: usize, label: &str) -> CategoricalBin {
        CategoricalBin {
            index,
            value: label.to_owned(),
            label: label.to_owned(),
            color: Color::rgb(0.0, 0.0, 0.0),
        }
    }

    #[test]
    fn bins_follow_series_order() {
        let series = vec![
            StackedSeries {
                series_name: "coal".to_owned(),
                color: Color::rgb(0.1, 0.1, 0.1),
                points: vec![StackedPoint::new("A", 1.0)],
            },
            StackedSeries {
                series_name: "gas".to_owned(),
                color: Color::rgb(0.9, 0.9, 0.9),
                points: Vec::new(),
            },
        ];

        let bins = legend_bins(&series);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[1].index, 1);
        assert_eq!(bins[1].value, "gas");
        assert_eq!(bins[1].label, "gas");
        assert_eq!(bins[1].color, Color::rgb(0.9, 0.9, 0.9));
    }

    #[test]
    fn no_bins_reserve_no_height() {
        let height = estimate_legend_height(
            &[],
            500.0,
            16.0,
            LegendConfig::default(),
            &EstimatedTextMeasurer,
        );
        assert_eq!(height, 0.0);
    }

    #[test]
    fn bins_wrap_onto_new_lines() {
        let config = LegendConfig::default();
        // each bin: 11 marker + 5 gap + 40 text = 56px, plus 15px item gap
        let bins = [bin(0, "aaaa"), bin(1, "bbbb"), bin(2, "cccc")];

        let one_line = estimate_legend_height(&bins, 1000.0, 16.0, config, &FixedMeasurer);
        assert!((one_line - 14.0).abs() <= 1e-9);

        let two_lines = estimate_legend_height(&bins, 130.0, 16.0, config, &FixedMeasurer);
        assert!((two_lines - (2.0 * 14.0 + 5.0)).abs() <= 1e-9);
    }
}
