use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid bounds: width={width}, height={height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Non-fatal reasons a chart has nothing to draw.
///
/// The `Display` text is the user-facing message shown in place of the bars.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ChartFailure {
    #[error("No column to chart")]
    NoColumnToChart,

    #[error("No data selected")]
    NoDataSelected,

    #[error("No matching data in columns {}", .columns.join(", "))]
    NoMatchingData { columns: Vec<String> },

    #[error("Stacked values are too large to chart")]
    NonFiniteStack,
}
