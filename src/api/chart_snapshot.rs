use serde::{Deserialize, Serialize};

use crate::core::{AxisDomain, Bounds, Item, RowGeometry, StackedSeries};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{CategoricalBin, StackedBarChart, legend_bins};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the derived chart state, for regression tests and
/// host-side inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub bounds: Bounds,
    pub y_column_slugs: Vec<String>,
    pub domain: AxisDomain,
    pub series: Vec<StackedSeries>,
    pub items: Vec<Item>,
    pub legend_bins: Vec<CategoricalBin>,
    pub rows: Vec<RowGeometry>,
    pub fail_message: String,
    pub focus_series_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::Serialization(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> StackedBarChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let data = self.data();
        let layout = self.layout();
        ChartSnapshot {
            bounds: self.config.bounds,
            y_column_slugs: data.y_column_slugs.clone(),
            domain: self.axis_domain(),
            series: data.series.clone(),
            items: data.items.clone(),
            legend_bins: legend_bins(&data.series),
            rows: layout.map(|layout| layout.rows.clone()).unwrap_or_default(),
            fail_message: data.fail_message(),
            focus_series_name: self.focus_series_name().map(str::to_owned),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
