// File: crates/tree-perf-charts/src/render.rs
// Summary: Builds and writes the comparison, log-scale, ratio and AVL trend charts.

use std::fmt;
use std::path::{Path, PathBuf};

use chart_core::{Axis, Chart, HLineOverlay, LogTrendIndicator, RenderOptions, Series, SeriesType, Theme};
use tracing::debug;

use crate::derive::{avl_trend, ratio_points};
use crate::error::RenderError;
use crate::schema::SchemaKind;
use crate::table::{Column, MeasurementTable};

pub const X_LABEL: &str = "Number of elements";
pub const TIME_LABEL: &str = "Time (seconds)";
pub const RATIO_LABEL: &str = "BinaryTree time / AVLTree time";

/// Vertical padding around the data, as a fraction of the Y span.
const Y_MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Comparison,
    Ratio,
    LogScale,
    AvlOnly,
}

impl ChartKind {
    /// File name suffix appended to the input's stem.
    pub const fn suffix(self) -> &'static str {
        match self {
            ChartKind::Comparison => "_comparison.png",
            ChartKind::Ratio => "_ratio.png",
            ChartKind::LogScale => "_log_scale.png",
            ChartKind::AvlOnly => "_avl_only.png",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Comparison => "comparison",
            ChartKind::Ratio => "ratio",
            ChartKind::LogScale => "log_scale",
            ChartKind::AvlOnly => "avl_only",
        })
    }
}

/// What a render call did with its output path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Written(PathBuf),
    /// Nothing was written; the reason is meant for humans.
    Skipped(String),
}

fn tree_label(column: Column) -> &'static str {
    match column {
        Column::BinaryInsert => "BinaryTree Insert",
        Column::AvlInsert => "AVLTree Insert",
        Column::BinarySearch => "BinaryTree Search",
        Column::AvlSearch => "AVLTree Search",
        Column::Ratio => "Ratio",
    }
}

// Palette slot keyed by tree so a lone AVL series keeps its usual colour.
fn palette_index(column: Column) -> usize {
    match column {
        Column::BinaryInsert | Column::BinarySearch => 0,
        Column::AvlInsert | Column::AvlSearch => 1,
        Column::Ratio => 2,
    }
}

/// One line per tree column the schema provides; X follows table order.
/// Rows with a skipped measurement are left out of that series only.
pub fn comparison_series(table: &MeasurementTable, kind: SchemaKind, theme: &Theme) -> Vec<Series> {
    kind.comparison_columns()
        .into_iter()
        .map(|column| {
            Series::with_data(SeriesType::Line, table.points(column))
                .with_label(tree_label(column))
                .with_color(theme.series_color(palette_index(column)))
        })
        .collect()
}

pub fn comparison_chart(table: &MeasurementTable, kind: SchemaKind, title: &str, theme: &Theme, log_y: bool) -> Chart {
    let mut chart = Chart::new().with_title(title);
    chart.x_axis = Axis::new(X_LABEL, 0.0, 1.0);
    chart.y_axis = if log_y { Axis::log10(TIME_LABEL, 1.0, 10.0) } else { Axis::new(TIME_LABEL, 0.0, 1.0) };
    for s in comparison_series(table, kind, theme) {
        chart.add_series(s);
    }
    chart.autoscale_axes(Y_MARGIN);
    chart
}

/// Ratio chart with a reference line at 1, or `None` when no row yields a ratio.
pub fn ratio_chart(table: &MeasurementTable, kind: SchemaKind, title: &str, theme: &Theme) -> Option<Chart> {
    let points = ratio_points(table, kind);
    if points.is_empty() {
        return None;
    }
    let mut chart = Chart::new().with_title(format!("{title}: Performance Ratio (BinaryTree/AVLTree)"));
    chart.x_axis = Axis::new(X_LABEL, 0.0, 1.0);
    chart.y_axis = Axis::new(RATIO_LABEL, 0.0, 1.0);
    chart.add_series(
        Series::with_data(SeriesType::Line, points)
            .with_label("BinaryTree / AVLTree")
            .with_color(theme.series_color(palette_index(Column::Ratio))),
    );
    chart.add_overlay(HLineOverlay::new(1.0).with_label("Equal performance").with_color(theme.reference_line));
    chart.autoscale_axes(Y_MARGIN);
    Some(chart)
}

/// Measured AVL timings with the fitted `a·ln(n) + b` curve, or `None` when
/// the AVL column is absent or cannot be fitted.
pub fn trend_chart(table: &MeasurementTable, kind: SchemaKind, title: &str, theme: &Theme) -> Option<Chart> {
    let op = kind.avl_operation()?;
    let (points, fit) = avl_trend(table, kind)?;
    debug!(a = fit.a, b = fit.b, "log trend fit");

    let measured = Series::with_data(SeriesType::Scatter, points)
        .with_label(format!("AVLTree {op} (measured)"))
        .with_color(theme.series_color(palette_index(op.avl_column())));
    let trend = LogTrendIndicator::default().curve(fit, &measured).with_color(theme.series_color(0));

    let mut chart = Chart::new().with_title(format!("{title}: AVLTree {op} Trend"));
    chart.x_axis = Axis::new(X_LABEL, 0.0, 1.0);
    chart.y_axis = Axis::new(TIME_LABEL, 0.0, 1.0);
    chart.add_series(measured);
    chart.add_series(trend);
    chart.autoscale_axes(Y_MARGIN);
    Some(chart)
}

fn write(chart: &Chart, out_path: &Path, opts: &RenderOptions) -> Result<RenderOutcome, RenderError> {
    chart.render_to_png(opts, out_path)?;
    debug!(path = %out_path.display(), "wrote chart");
    Ok(RenderOutcome::Written(out_path.to_path_buf()))
}

/// Linear-scale timing comparison. An `Unknown` schema yields a label-only chart.
pub fn render_comparison(
    table: &MeasurementTable,
    kind: SchemaKind,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    write(&comparison_chart(table, kind, title, &opts.theme, false), out_path, opts)
}

/// Same series as [`render_comparison`] on a log10 time axis.
pub fn render_log_scale(
    table: &MeasurementTable,
    kind: SchemaKind,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    let chart = comparison_chart(table, kind, &format!("{title} (Log Scale)"), &opts.theme, true);
    write(&chart, out_path, opts)
}

/// BinaryTree/AVLTree ratio. Writes nothing when no valid row remains.
pub fn render_ratio(
    table: &MeasurementTable,
    kind: SchemaKind,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    match ratio_chart(table, kind, title, &opts.theme) {
        Some(chart) => write(&chart, out_path, opts),
        None => Ok(RenderOutcome::Skipped("no rows with a valid ratio".to_string())),
    }
}

/// AVLTree timings with a logarithmic trend fit. Writes nothing without AVL data.
pub fn render_trend(
    table: &MeasurementTable,
    kind: SchemaKind,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    match trend_chart(table, kind, title, &opts.theme) {
        Some(chart) => write(&chart, out_path, opts),
        None if kind.avl_operation().is_none() => Ok(RenderOutcome::Skipped("no AVLTree column".to_string())),
        None => Ok(RenderOutcome::Skipped("too few AVLTree measurements to fit a trend".to_string())),
    }
}

/// Dispatch by chart kind.
pub fn render(
    chart: ChartKind,
    table: &MeasurementTable,
    kind: SchemaKind,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    match chart {
        ChartKind::Comparison => render_comparison(table, kind, title, out_path, opts),
        ChartKind::Ratio => render_ratio(table, kind, title, out_path, opts),
        ChartKind::LogScale => render_log_scale(table, kind, title, out_path, opts),
        ChartKind::AvlOnly => render_trend(table, kind, title, out_path, opts),
    }
}
