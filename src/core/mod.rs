pub mod chart_data;
pub mod color;
pub mod color_scheme;
pub mod domain;
pub mod failure;
pub mod layout;
pub mod ordering;
pub mod primitives;
pub mod scale;
pub mod source;
pub mod stacking;
pub mod table;
pub mod text_metrics;
pub mod transform;
pub mod types;

pub use chart_data::{ChartData, derive_chart_data};
pub use color::Color;
pub use color_scheme::{ColorScheme, DEFAULT_COLOR_SCHEME, resolve_color};
pub use domain::{AxisDomain, DEFAULT_BASELINE, stacked_domain};
pub use failure::{classify_failure, fail_message, non_finite_stack_failure};
pub use layout::{
    BarGeometry, DEFAULT_BAR_FILL_RATIO, RowGeometry, RowMetrics, project_rows, row_metrics,
};
pub use ordering::{Bar, Item, RowBars, build_items, ordered_items, sort_items_descending};
pub use scale::LinearScale;
pub use source::{SelectionArray, SelectionProvider, SeriesSource};
pub use stacking::{StackedPoint, StackedSeries, stack_series};
pub use table::{CellValue, ColumnDef, ColumnRow, ColumnSlice, ErrorValue, Table, TableRow};
pub use text_metrics::{EstimatedTextMeasurer, TextMeasurer, TextStyle, longest_label_width};
pub use transform::{TransformRequest, transform_table, unstacked_series};
pub use types::{Bounds, EntityName, SeriesName, Time};
