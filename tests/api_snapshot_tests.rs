use stackbar_rs::api::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartInputs, ChartSnapshot, StackedBarChart,
    StackedBarChartConfig,
};
use stackbar_rs::core::{Bounds, ColumnDef, SelectionArray, Table};
use stackbar_rs::render::NullRenderer;

fn sample_chart() -> StackedBarChart<NullRenderer> {
    let table = Table::new(vec![ColumnDef::new("x"), ColumnDef::new("y")])
        .expect("table")
        .with_row("A", 2020, vec![3.0.into(), 1.0.into()])
        .expect("row")
        .with_row("B", 2020, vec![0.0.into(), 2.0.into()])
        .expect("row");
    let config = StackedBarChartConfig::new(Bounds::from_size(500.0, 300.0));
    let mut chart = StackedBarChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_inputs(ChartInputs::new(table).with_y_column_slugs(["x", "y"]));
    chart.set_selection(SelectionArray::new(["B", "A"]));
    chart
}

#[test]
fn snapshot_captures_derived_state() {
    let mut chart = sample_chart();
    chart.set_focus_series_name(Some("y".to_owned()));
    let snapshot = chart.snapshot();

    assert_eq!(snapshot.y_column_slugs, vec!["x".to_owned(), "y".to_owned()]);
    assert_eq!(snapshot.domain.as_tuple(), (0.0, 4.0));
    assert_eq!(snapshot.series.len(), 2);
    assert_eq!(snapshot.items[0].label, "A");
    assert_eq!(snapshot.legend_bins.len(), 2);
    assert_eq!(snapshot.legend_bins[0].value, "x");
    assert_eq!(snapshot.rows.len(), 2);
    assert_eq!(snapshot.fail_message, "");
    assert_eq!(snapshot.focus_series_name.as_deref(), Some("y"));
}

#[test]
fn snapshot_json_contract_v1_round_trips() {
    let chart = sample_chart();
    let snapshot = chart.snapshot();

    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("serialize bare");
    let parsed_bare = ChartSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare, snapshot);
}

#[test]
fn snapshot_contract_rejects_unknown_schema_version() {
    let chart = sample_chart();
    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract");
    let bumped = json.replace(
        &format!("\"schema_version\": {CHART_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );

    let err = ChartSnapshot::from_json_compat_str(&bumped).expect_err("unsupported version");
    assert!(err.to_string().contains("unsupported snapshot schema version: 99"));
    assert!(ChartSnapshot::from_json_compat_str("{").is_err());
}

#[test]
fn failed_snapshot_has_message_and_no_rows() {
    let mut chart = sample_chart();
    chart.set_y_column_slugs(Some(Vec::new()));
    let snapshot = chart.snapshot();

    assert_eq!(snapshot.fail_message, "No column to chart");
    assert!(snapshot.rows.is_empty());
    assert!(snapshot.series.is_empty());
}
