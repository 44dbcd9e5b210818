// File: crates/chart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use chart_core::{Axis, Chart, HLineOverlay, RenderOptions, Series, SeriesType};

fn sample_chart() -> Chart {
    let mut chart = Chart::new().with_title("Smoke");
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(
        Series::with_data(SeriesType::Line, vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)])
            .with_label("line"),
    );
    chart.add_overlay(HLineOverlay::new(1.0).with_label("y = 1"));
    chart
}

#[test]
fn render_smoke_png() {
    let chart = sample_chart();
    let opts = RenderOptions::default();
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested/smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn repeated_renders_are_identical() {
    let chart = sample_chart();
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    let a = chart.render_to_png_bytes(&opts).expect("first");
    let b = chart.render_to_png_bytes(&opts).expect("second");
    assert_eq!(a, b);
}

#[test]
fn legend_lists_series_then_overlays() {
    let chart = sample_chart();
    let theme = RenderOptions::default().theme;
    let labels: Vec<String> = chart.legend_entries(&theme).into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["line".to_string(), "y = 1".to_string()]);
}

#[test]
fn empty_chart_still_renders() {
    let mut chart = Chart::new();
    chart.autoscale_axes(0.05);
    let bytes = chart.render_to_png_bytes(&RenderOptions::default()).expect("render");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
