// File: crates/chart-core/src/view.rs
// View state: visible data ranges derived from a chart's series and overlays (autoscale).

use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Extents of every series and overlay on `chart`, with `y_margin` (fraction of the
    /// Y span) added above and below. A log Y axis only considers positive values and
    /// applies the margin in decades.
    pub fn from_chart(chart: &Chart, y_margin: f64) -> Self {
        let log_y = chart.y_axis.is_log();
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let take_y = |y: f64, y_min: &mut f64, y_max: &mut f64| {
            if y.is_finite() && (!log_y || y > 0.0) {
                *y_min = y_min.min(y);
                *y_max = y_max.max(y);
            }
        };
        for s in &chart.series {
            for &(x, y) in &s.data_xy {
                if x.is_finite() {
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                }
                take_y(y, &mut y_min, &mut y_max);
            }
        }
        for o in &chart.overlays {
            if let Some((lo, hi)) = o.y_extent() {
                take_y(lo, &mut y_min, &mut y_max);
                take_y(hi, &mut y_min, &mut y_max);
            }
        }

        if !x_min.is_finite() || !x_max.is_finite() {
            x_min = 0.0;
            x_max = 1.0;
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            (y_min, y_max) = if log_y { (1.0, 10.0) } else { (0.0, 1.0) };
        }
        if (x_max - x_min).abs() < 1e-9 {
            x_max = x_min + 1.0;
        }

        let (y_min, y_max) = if log_y {
            let (mut lo, mut hi) = (y_min.log10(), y_max.log10());
            if (hi - lo).abs() < 1e-9 {
                lo -= 0.5;
                hi += 0.5;
            }
            let m = (hi - lo) * y_margin;
            (10f64.powf(lo - m), 10f64.powf(hi + m))
        } else {
            let (lo, mut hi) = (y_min, y_max);
            if (hi - lo).abs() < 1e-9 {
                hi = lo + 1.0;
            }
            let m = (hi - lo) * y_margin;
            (lo - m, hi + m)
        };
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
