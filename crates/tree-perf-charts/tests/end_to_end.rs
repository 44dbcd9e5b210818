// File: crates/tree-perf-charts/tests/end_to_end.rs
// Purpose: Load -> classify -> derive -> render scenarios against real files.

use std::path::Path;

use chart_core::RenderOptions;
use tree_perf_charts::derive::ratio_points;
use tree_perf_charts::render::{comparison_series, ratio_chart, trend_chart};
use tree_perf_charts::{
    detect_schema, load, render_comparison, render_log_scale, render_ratio, render_trend, Column, Operation,
    RenderOutcome, SchemaKind,
};

fn write_csv(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).expect("write csv");
    path
}

fn quiet_opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.width = 400;
    opts.height = 300;
    opts.draw_labels = false;
    opts
}

const SCENARIO: &str = "size,avltree_insert,binarytree_insert\n100,0.001,0.002\n200,0.0015,-1\n300,0.002,0.003\n";

#[test]
fn sentinel_row_only_drops_from_binary_series() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "scenario.csv", SCENARIO)).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::InsertPair);

    let series = comparison_series(&table, kind, &RenderOptions::default().theme);
    assert_eq!(series.len(), 2);
    let binary = series.iter().find(|s| s.label.as_deref() == Some("BinaryTree Insert")).expect("binary");
    let avl = series.iter().find(|s| s.label.as_deref() == Some("AVLTree Insert")).expect("avl");
    assert_eq!(avl.xs().collect::<Vec<_>>(), vec![100.0, 200.0, 300.0]);
    assert_eq!(binary.xs().collect::<Vec<_>>(), vec![100.0, 300.0]);
}

#[test]
fn ratio_has_two_points_and_reference_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "scenario.csv", SCENARIO)).expect("load");
    let chart = ratio_chart(&table, detect_schema(&table), "Scenario", &RenderOptions::default().theme).expect("chart");

    assert_eq!(chart.series.len(), 1);
    let ratio = &chart.series[0].data_xy;
    assert_eq!(ratio.len(), 2);
    assert!((ratio[0].1 - 2.0).abs() < 1e-9);
    assert!((ratio[1].1 - 1.5).abs() < 1e-9);

    let reference = chart.overlay_series();
    assert_eq!(reference.len(), 1);
    assert!(reference[0].ys().all(|y| y == 1.0));
    assert!(chart.y_axis.min <= 1.0 && chart.y_axis.max >= 2.0);
}

#[test]
fn insert_pair_series_follow_table_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "size,binarytree_insert,avltree_insert\n500,0.5,0.4\n100,0.1,0.1\n900,0.9,0.5\n";
    let table = load(write_csv(dir.path(), "unsorted.csv", csv)).expect("load");
    let series = comparison_series(&table, detect_schema(&table), &RenderOptions::default().theme);
    let sizes: Vec<f64> = table.sizes().map(|s| s as f64).collect();
    assert_eq!(series.len(), 2);
    for s in &series {
        assert_eq!(s.xs().collect::<Vec<_>>(), sizes);
    }
}

#[test]
fn all_rows_filtered_writes_no_ratio_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "size,avltree_insert,binarytree_insert\n100,0.001,-1\n200,0.002,0\n";
    let table = load(write_csv(dir.path(), "skipped.csv", csv)).expect("load");
    let out = dir.path().join("skipped_ratio.png");

    let outcome = render_ratio(&table, detect_schema(&table), "Skipped", &out, &quiet_opts()).expect("render");
    assert!(matches!(outcome, RenderOutcome::Skipped(_)));
    assert!(!out.exists());
}

#[test]
fn charts_are_valid_pngs_of_requested_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "scenario.csv", SCENARIO)).expect("load");
    let kind = detect_schema(&table);
    let opts = quiet_opts();

    let comparison = dir.path().join("scenario_comparison.png");
    let log_scale = dir.path().join("scenario_log_scale.png");
    assert_eq!(
        render_comparison(&table, kind, "Scenario", &comparison, &opts).expect("comparison"),
        RenderOutcome::Written(comparison.clone())
    );
    assert_eq!(
        render_log_scale(&table, kind, "Scenario", &log_scale, &opts).expect("log"),
        RenderOutcome::Written(log_scale.clone())
    );
    for path in [&comparison, &log_scale] {
        let img = image::open(path).expect("decode png").to_rgba8();
        assert_eq!(img.dimensions(), (400, 300));
    }
}

#[test]
fn rendering_twice_gives_identical_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "scenario.csv", SCENARIO)).expect("load");
    let kind = detect_schema(&table);
    let out = dir.path().join("again_ratio.png");

    render_ratio(&table, kind, "Again", &out, &quiet_opts()).expect("first");
    let first = std::fs::read(&out).expect("read first");
    render_ratio(&table, kind, "Again", &out, &quiet_opts()).expect("second");
    let second = std::fs::read(&out).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn unknown_schema_renders_label_only_chart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "odd.csv", "size,binarytree_insert\n1,0.1\n2,0.2\n")).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::Unknown);
    assert!(comparison_series(&table, kind, &RenderOptions::default().theme).is_empty());

    let out = dir.path().join("odd_comparison.png");
    let outcome = render_comparison(&table, kind, "Odd", &out, &RenderOptions::default()).expect("render");
    assert_eq!(outcome, RenderOutcome::Written(out.clone()));
    assert!(out.exists());
}

#[test]
fn trend_fit_labels_coefficients() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut csv = String::from("size,avltree_insert\n");
    for n in [1_000u64, 10_000, 100_000, 1_000_000] {
        csv.push_str(&format!("{n},{}\n", 0.25 * (n as f64).ln() + 1.5));
    }
    let table = load(write_csv(dir.path(), "large_avl.csv", &csv)).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::AvlOnly(Operation::Insert));

    let chart = trend_chart(&table, kind, "Large", &RenderOptions::default().theme).expect("chart");
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].len(), 4);
    assert_eq!(chart.series[1].label.as_deref(), Some("Fit: 0.2500·ln(n) + 1.5000"));

    let out = dir.path().join("large_avl_avl_only.png");
    let outcome = render_trend(&table, kind, "Large", &out, &quiet_opts()).expect("render");
    assert_eq!(outcome, RenderOutcome::Written(out.clone()));
}

#[test]
fn trend_without_avl_column_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = load(write_csv(dir.path(), "bt.csv", "size,binarytree_insert\n1,0.1\n")).expect("load");
    assert!(!table.has_column(Column::AvlInsert));
    let out = dir.path().join("bt_avl_only.png");
    let outcome = render_trend(&table, detect_schema(&table), "BT", &out, &quiet_opts()).expect("render");
    assert!(matches!(outcome, RenderOutcome::Skipped(_)));
    assert!(!out.exists());
}

fn labels_and_counts(series: &[chart_core::Series]) -> Vec<(String, usize)> {
    series.iter().map(|s| (s.label.clone().unwrap_or_default(), s.len())).collect()
}

#[test]
fn search_pair_feeds_every_chart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "size,binarytree_search,avltree_search\n1000,0.004,0.001\n10000,0.05,0.002\n100000,0.7,0.003\n";
    let table = load(write_csv(dir.path(), "search.csv", csv)).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::SearchPair);
    let theme = RenderOptions::default().theme;

    assert_eq!(
        labels_and_counts(&comparison_series(&table, kind, &theme)),
        vec![("BinaryTree Search".to_string(), 3), ("AVLTree Search".to_string(), 3)]
    );
    assert_eq!(ratio_points(&table, kind).len(), 3);
    let trend = trend_chart(&table, kind, "Search", &theme).expect("trend");
    assert_eq!(trend.series[0].label.as_deref(), Some("AVLTree Search (measured)"));
    assert_eq!(trend.series[0].len(), 3);
}

#[test]
fn precomputed_ratio_with_timing_pair() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "size,avltree_insert,binarytree_insert,ratio\n\
1000,0.1,0.5,5.0\n10000,0.2,-1,-1\n100000,0.3,2.4,8.0\n";
    let table = load(write_csv(dir.path(), "large_sorted.csv", csv)).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::RatioPrecomputed { timings: Some(Operation::Insert), avl: Some(Operation::Insert) });
    let theme = RenderOptions::default().theme;

    assert_eq!(
        labels_and_counts(&comparison_series(&table, kind, &theme)),
        vec![("BinaryTree Insert".to_string(), 2), ("AVLTree Insert".to_string(), 3)]
    );
    assert_eq!(ratio_points(&table, kind), vec![(1000.0, 5.0), (100000.0, 8.0)]);
    let trend = trend_chart(&table, kind, "Large", &theme).expect("trend");
    assert_eq!(trend.series[0].label.as_deref(), Some("AVLTree Insert (measured)"));
    assert_eq!(trend.series[0].len(), 3);
}

#[test]
fn precomputed_ratio_with_lone_avl_column() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "size,avltree_insert,ratio\n1000,0.1,2.0\n10000,0.2,2.5\n100000,0.3,3.0\n";
    let table = load(write_csv(dir.path(), "large_avl_ratio.csv", csv)).expect("load");
    let kind = detect_schema(&table);
    assert_eq!(kind, SchemaKind::RatioPrecomputed { timings: None, avl: Some(Operation::Insert) });
    let theme = RenderOptions::default().theme;

    assert_eq!(
        labels_and_counts(&comparison_series(&table, kind, &theme)),
        vec![("AVLTree Insert".to_string(), 3)]
    );
    assert_eq!(ratio_points(&table, kind).len(), 3);
    let trend = trend_chart(&table, kind, "AVL", &theme).expect("trend");
    assert_eq!(trend.series[0].len(), 3);

    let opts = quiet_opts();
    let trend_out = dir.path().join("large_avl_ratio_avl_only.png");
    assert_eq!(
        render_trend(&table, kind, "AVL", &trend_out, &opts).expect("trend render"),
        RenderOutcome::Written(trend_out.clone())
    );
    let comparison_out = dir.path().join("large_avl_ratio_comparison.png");
    assert_eq!(
        render_comparison(&table, kind, "AVL", &comparison_out, &opts).expect("comparison render"),
        RenderOutcome::Written(comparison_out.clone())
    );
    assert!(trend_out.exists() && comparison_out.exists());
}
