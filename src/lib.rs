//! stackbar-rs: layout core of a stacked discrete bar chart.
//!
//! Each selected entity becomes one horizontal row and each value column one
//! stacked segment. `core` holds the table transforms, stacking, ordering and
//! layout math; `api` wraps them in a memoized chart facade that produces
//! backend-agnostic render frames.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartInputs, StackedBarChart, StackedBarChartConfig};
pub use error::{ChartError, ChartFailure, ChartResult};
