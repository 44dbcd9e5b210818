// File: crates/chart-core/src/plugin.rs
// Summary: Plugin traits (overlay & indicator) plus the reference-line overlay and log-trend indicator.

use skia_safe as skia;

use crate::grid::linspace;
use crate::series::{LineStyle, Series, SeriesType};
use crate::Chart;

/// Indicator transforms an input series into a derived series (typically a Line series).
pub trait Indicator {
    fn id(&self) -> &'static str;
    /// `None` when the input does not support the derivation.
    fn compute(&self, input: &Series) -> Option<Series>;
}

/// Overlay renders extra series on top of a chart, computed from the chart's current state.
pub trait Overlay {
    fn id(&self) -> &'static str;
    /// Compute one or more series to render as overlays on top of the chart.
    fn compute(&self, chart: &Chart) -> Vec<Series>;
    /// Y range the overlay needs visible, folded into autoscaling.
    fn y_extent(&self) -> Option<(f64, f64)> { None }
}

/// Least-squares fit of `y = a * ln(x) + b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogFit {
    pub a: f64,
    pub b: f64,
}

impl LogFit {
    /// Fit over the points with `x > 0` and finite `y`.
    /// Needs at least two distinct `x` values, otherwise `None`.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let pts: Vec<(f64, f64)> = points
            .iter()
            .filter(|&&(x, y)| x > 0.0 && x.is_finite() && y.is_finite())
            .map(|&(x, y)| (x.ln(), y))
            .collect();
        if pts.len() < 2 {
            return None;
        }
        let n = pts.len() as f64;
        let mean_u = pts.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = pts.iter().map(|p| p.1).sum::<f64>() / n;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for &(u, y) in &pts {
            sxx += (u - mean_u) * (u - mean_u);
            sxy += (u - mean_u) * (y - mean_y);
        }
        if sxx <= f64::EPSILON {
            return None;
        }
        let a = sxy / sxx;
        Some(Self { a, b: mean_y - a * mean_u })
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.a * x.ln() + self.b
    }

    /// Legend text with both coefficients at 4 decimal places.
    pub fn label(&self) -> String {
        format!("Fit: {:.4}·ln(n) + {:.4}", self.a, self.b)
    }
}

/// Fits `y = a·ln(x) + b` to a series and emits the fitted curve as a dashed line.
pub struct LogTrendIndicator {
    /// Number of evenly spaced x samples for the fitted curve.
    pub samples: usize,
}

impl Default for LogTrendIndicator {
    fn default() -> Self { Self { samples: 64 } }
}

impl LogTrendIndicator {
    pub fn fit(&self, input: &Series) -> Option<LogFit> {
        LogFit::fit(&input.data_xy)
    }

    /// Dashed line sampling `fit` across the positive x range of `input`.
    /// Empty when `input` has no positive x.
    pub fn curve(&self, fit: LogFit, input: &Series) -> Series {
        let (lo, hi) = input
            .xs()
            .filter(|&x| x > 0.0 && x.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));
        let xy = if lo <= hi {
            linspace(lo, hi, self.samples.max(2)).into_iter().map(|x| (x, fit.eval(x))).collect()
        } else {
            Vec::new()
        };
        Series::with_data(SeriesType::Line, xy)
            .with_label(fit.label())
            .with_line_style(LineStyle::Dashed)
    }
}

impl Indicator for LogTrendIndicator {
    fn id(&self) -> &'static str { "log_trend" }

    fn compute(&self, input: &Series) -> Option<Series> {
        let fit = self.fit(input)?;
        Some(self.curve(fit, input))
    }
}

/// Horizontal reference line spanning the current X range at a fixed Y.
pub struct HLineOverlay {
    pub y: f64,
    pub label: Option<String>,
    pub color: Option<skia::Color>,
    pub line_style: LineStyle,
}

impl HLineOverlay {
    pub fn new(y: f64) -> Self {
        Self { y, label: None, color: None, line_style: LineStyle::Dashed }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Overlay for HLineOverlay {
    fn id(&self) -> &'static str { "h_line" }

    fn compute(&self, chart: &Chart) -> Vec<Series> {
        let x0 = chart.x_axis.min;
        let x1 = chart.x_axis.max;
        let mut s = Series::with_data(SeriesType::Line, vec![(x0, self.y), (x1, self.y)])
            .with_line_style(self.line_style);
        s.label = self.label.clone();
        s.color = self.color;
        vec![s]
    }

    fn y_extent(&self) -> Option<(f64, f64)> {
        Some((self.y, self.y))
    }
}
