use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use stackbar_rs::core::{
    CellValue, ColorScheme, ColumnDef, ErrorValue, SelectionArray, SeriesSource, Table,
    TransformRequest, derive_chart_data, transform_table,
};
use stackbar_rs::{ChartFailure, ChartInputs};

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

fn two_column_table() -> Table {
    Table::new(vec![ColumnDef::new("x"), ColumnDef::new("y")])
        .expect("table")
        .with_row("A", 2020, vec![3.0.into(), 1.0.into()])
        .expect("row")
        .with_row("B", 2020, vec![0.0.into(), 2.0.into()])
        .expect("row")
}

#[test]
fn end_to_end_two_entities_two_columns() {
    let inputs = ChartInputs::new(two_column_table()).with_y_column_slugs(["x", "y"]);
    let selection = SelectionArray::new(["A", "B"]);

    let data = derive_chart_data(&inputs, &selection, ColorScheme::resolve(None), 0.0);

    assert!(data.failure.is_none());
    assert_eq!(data.series.len(), 2);

    let x = &data.series[0];
    let x_a = x.point_for("A").expect("x at A");
    let x_b = x.point_for("B").expect("x at B");
    assert_eq!((x_a.value, x_a.value_offset), (3.0, 0.0));
    assert_eq!((x_b.value, x_b.value_offset), (0.0, 0.0));

    let y = &data.series[1];
    let y_a = y.point_for("A").expect("y at A");
    let y_b = y.point_for("B").expect("y at B");
    assert_eq!((y_a.value, y_a.value_offset), (1.0, 3.0));
    assert_eq!((y_b.value, y_b.value_offset), (2.0, 0.0));

    assert_eq!(data.domain.as_tuple(), (0.0, 4.0));
    let labels: Vec<&str> = data.items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);
    assert_eq!(data.items[0].total(0.0), 4.0);
    assert_eq!(data.items[1].total(0.0), 2.0);
}

#[test]
fn series_take_palette_colors_unless_column_overrides() {
    let pinned = stackbar_rs::core::Color::rgb8(0xaa, 0x00, 0x00);
    let mut table = two_column_table();
    table.set_column_color("y", pinned).expect("known column");

    let inputs = ChartInputs::new(table).with_y_column_slugs(["x", "y"]);
    let selection = SelectionArray::new(["A"]);
    let scheme = ColorScheme::resolve(Some("tableau10"));
    let data = derive_chart_data(&inputs, &selection, scheme, 0.0);

    assert_eq!(data.series[0].color, scheme.get_colors(2)[0]);
    assert_eq!(data.series[1].color, pinned);
}

#[test]
fn display_names_become_series_names() {
    let table = Table::new(vec![
        ColumnDef::new("coal_twh").with_display_name("Coal"),
        ColumnDef::new("gas_twh"),
    ])
    .expect("table")
    .with_row("A", 2020, vec![1.0.into(), 2.0.into()])
    .expect("row");

    let inputs = ChartInputs::new(table).with_y_column_slugs(["coal_twh", "gas_twh"]);
    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["A"]),
        ColorScheme::resolve(None),
        0.0,
    );

    let names: Vec<&str> = data
        .series
        .iter()
        .map(|series| series.series_name.as_str())
        .collect();
    assert_eq!(names, vec!["Coal", "gas_twh"]);
}

#[test]
fn value_columns_are_auto_detected_when_not_configured() {
    let table = Table::new(vec![
        ColumnDef::new("name"),
        ColumnDef::new("x"),
        ColumnDef::new("y"),
    ])
    .expect("table")
    .with_row("A", 2020, vec!["Alpha".into(), 1.0.into(), 2.0.into()])
    .expect("row");

    let inputs = ChartInputs::new(table);
    assert!(inputs.y_column_slugs().is_none());

    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["A"]),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(data.y_column_slugs, owned(&["x", "y"]));
    assert_eq!(data.series.len(), 2);
}

#[test]
fn failures_are_classified_in_order() {
    let empty_columns = Table::new(vec![ColumnDef::new("x")]).expect("table");
    let data = derive_chart_data(
        &ChartInputs::new(empty_columns),
        &SelectionArray::default(),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(data.failure, Some(ChartFailure::NoColumnToChart));
    assert_eq!(data.fail_message(), "No column to chart");

    let inputs = ChartInputs::new(two_column_table()).with_y_column_slugs(["x", "y"]);
    let data = derive_chart_data(
        &inputs,
        &SelectionArray::default(),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(data.fail_message(), "No data selected");

    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["Z"]),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(data.fail_message(), "No matching data in columns x, y");
    assert!(data.series.is_empty());
    assert_eq!(data.domain.as_tuple(), (0.0, 0.0));
}

#[test]
fn relative_mode_normalizes_each_row_to_one_hundred() {
    let table = Table::new(vec![ColumnDef::new("x"), ColumnDef::new("y")])
        .expect("table")
        .with_row("A", 2020, vec![1.0.into(), 3.0.into()])
        .expect("row")
        .with_row("B", 2020, vec![0.0.into(), 0.0.into()])
        .expect("row");
    let inputs = ChartInputs::new(table)
        .with_y_column_slugs(["x", "y"])
        .with_relative_mode(true);

    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["A", "B"]),
        ColorScheme::resolve(None),
        0.0,
    );

    let x_a = data.series[0].point_for("A").expect("x at A");
    let y_a = data.series[1].point_for("A").expect("y at A");
    assert_relative_eq!(x_a.value, 25.0, epsilon = 1e-9);
    assert_relative_eq!(y_a.stacked_value(), 100.0, epsilon = 1e-9);

    // zero-sum rows are omitted rather than drawn as 0%
    assert!(data.series[0].point_for("B").is_none());
    assert!(data.series[1].point_for("B").is_none());
    assert_eq!(data.items[1].label, "B");
    assert!(data.items[1].bars.is_empty());
}

#[test]
fn pipeline_interpolates_before_normalizing() {
    let table = Table::new(vec![
        ColumnDef::new("x").with_tolerance(1),
        ColumnDef::new("y"),
    ])
    .expect("table")
    .with_row("A", 2019, vec![2.0.into(), 1.0.into()])
    .expect("row")
    .with_row("A", 2020, vec!["n/a".into(), 2.0.into()])
    .expect("row");

    let slugs = owned(&["x", "y"]);
    let selected = owned(&["A"]);
    let transformed = transform_table(
        &table,
        TransformRequest {
            selected_entities: &selected,
            y_column_slugs: &slugs,
            relative_mode: true,
        },
    );

    let latest = &transformed.rows()[1];
    assert_eq!(latest.time, 2020);
    let x = latest.cells[0].number().expect("interpolated x");
    let y = latest.cells[1].number().expect("normalized y");
    assert_relative_eq!(x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(y, 50.0, epsilon = 1e-9);
}

#[test]
fn gaps_wider_than_tolerance_stay_errors() {
    let table = Table::new(vec![ColumnDef::new("x").with_tolerance(1)])
        .expect("table")
        .with_row("A", 2010, vec![2.0.into()])
        .expect("row")
        .with_row("A", 2020, vec![CellValue::Error(ErrorValue::MissingValue)])
        .expect("row");

    let slugs = owned(&["x"]);
    let interpolated = table.interpolate_column_with_tolerance("x");
    assert_eq!(
        interpolated.rows()[1].cells[0],
        CellValue::Error(ErrorValue::NoValueWithinTolerance)
    );
    assert_eq!(interpolated.get_columns(&slugs)[0].rows.len(), 1);
}

#[test]
fn end_time_picks_the_row_at_that_time() {
    let table = Table::new(vec![ColumnDef::new("x")])
        .expect("table")
        .with_row("A", 2019, vec![5.0.into()])
        .expect("row")
        .with_row("A", 2020, vec![7.0.into()])
        .expect("row");

    let latest = derive_chart_data(
        &ChartInputs::new(table.clone()).with_y_column_slugs(["x"]),
        &SelectionArray::new(["A"]),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(latest.series[0].points.len(), 1);
    assert_eq!(latest.series[0].points[0].value, 7.0);

    let pinned = derive_chart_data(
        &ChartInputs::new(table)
            .with_y_column_slugs(["x"])
            .with_end_time(2019),
        &SelectionArray::new(["A"]),
        ColorScheme::resolve(None),
        0.0,
    );
    assert_eq!(pinned.series[0].points[0].value, 5.0);
}

#[test]
fn relative_bars_never_mix_rows_from_different_times() {
    let table = Table::new(vec![ColumnDef::new("x"), ColumnDef::new("y")])
        .expect("table")
        .with_row("A", 2000, vec![1.0.into(), 1.0.into()])
        .expect("row")
        .with_row("A", 2010, vec![1.0.into(), "n/a".into()])
        .expect("row");
    let inputs = ChartInputs::new(table)
        .with_y_column_slugs(["x", "y"])
        .with_relative_mode(true);

    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["A"]),
        ColorScheme::resolve(None),
        0.0,
    );

    let x_a = data.series[0].point_for("A").expect("x at A");
    assert_relative_eq!(x_a.value, 100.0, epsilon = 1e-9);
    assert!(data.series.iter().skip(1).all(|series| series.point_for("A").is_none()));
    assert_relative_eq!(data.items[0].total(0.0), 100.0, epsilon = 1e-9);
    assert_relative_eq!(data.domain.max, 100.0, epsilon = 1e-9);
}

#[test]
fn each_entity_is_read_at_its_latest_valid_time() {
    // every time misses a different column
    let table = Table::new(vec![ColumnDef::new("x"), ColumnDef::new("y")])
        .expect("table")
        .with_row("A", 2000, vec!["n/a".into(), 4.0.into()])
        .expect("row")
        .with_row("A", 2010, vec![2.0.into(), "n/a".into()])
        .expect("row")
        .with_row("B", 2000, vec![1.0.into(), "n/a".into()])
        .expect("row")
        .with_row("B", 2010, vec!["n/a".into(), 3.0.into()])
        .expect("row");
    let selection = SelectionArray::new(["A", "B"]);

    let latest = derive_chart_data(
        &ChartInputs::new(table.clone()).with_y_column_slugs(["x", "y"]),
        &selection,
        ColorScheme::resolve(None),
        0.0,
    );
    let x = &latest.series[0];
    let y = &latest.series[1];
    assert_eq!(x.point_for("A").map(|point| point.value), Some(2.0));
    assert!(x.point_for("B").is_none());
    assert!(y.point_for("A").is_none());
    let y_b = y.point_for("B").expect("y at B");
    assert_eq!((y_b.value, y_b.value_offset), (3.0, 0.0));
    assert_eq!(latest.domain.as_tuple(), (0.0, 3.0));
    let labels: Vec<&str> = latest.items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["B", "A"]);

    let pinned = derive_chart_data(
        &ChartInputs::new(table)
            .with_y_column_slugs(["x", "y"])
            .with_end_time(2000),
        &selection,
        ColorScheme::resolve(None),
        0.0,
    );
    let x = &pinned.series[0];
    let y = &pinned.series[1];
    assert_eq!(x.point_for("B").map(|point| point.value), Some(1.0));
    assert!(x.point_for("A").is_none());
    assert_eq!(y.point_for("A").map(|point| point.value), Some(4.0));
    assert!(y.point_for("B").is_none());
}

#[test]
fn transformed_table_override_skips_the_pipeline() {
    let raw = two_column_table();
    // already restricted to A, so B never shows up even though it is selected
    let prepared = raw.filter_by_entities(&owned(&["A"]));
    let inputs = ChartInputs::new(raw)
        .with_y_column_slugs(["x", "y"])
        .with_transformed_table(prepared);

    let data = derive_chart_data(
        &inputs,
        &SelectionArray::new(["A", "B"]),
        ColorScheme::resolve(None),
        0.0,
    );
    assert!(data.series[0].point_for("B").is_none());
    assert_eq!(data.domain.as_tuple(), (0.0, 4.0));
}

#[test]
fn decimal_and_datetime_inputs_are_accepted() {
    let mut table = Table::new(vec![ColumnDef::new("x")]).expect("table");
    let day = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).single().expect("time");
    table
        .push_row_at(
            "A",
            day,
            vec![CellValue::from_decimal(Decimal::new(125, 2)).expect("decimal")],
        )
        .expect("row");

    let row = &table.rows()[0];
    assert_eq!(row.time, 19_724);
    assert_relative_eq!(row.cells[0].number().expect("number"), 1.25, epsilon = 1e-12);
}
