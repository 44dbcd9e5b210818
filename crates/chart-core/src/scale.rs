// File: crates/chart-core/src/scale.rs
// Summary: Value-to-pixel transforms for linear and log10 axes.

use crate::axis::{Axis, ScaleKind};

/// Smallest value a log scale will accept; anything below is clamped here.
pub const LOG_FLOOR: f64 = 1e-12;

/// Maps a data range onto a pixel span.
///
/// `start_px` is where `vmin` lands and `end_px` is where `vmax` lands, so a
/// vertical scale is built with `start_px = bottom` and `end_px = top`.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub start_px: f32,
    pub end_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn new_linear(start_px: f32, end_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { start_px, end_px, vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn new_log10(start_px: f32, end_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        // Ensure strictly positive range for log scale
        vmin = if vmin <= LOG_FLOOR { LOG_FLOOR } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        let log_min = vmin.log10();
        let log_max = vmax.log10();
        Self { start_px, end_px, vmin, vmax, log: true, log_min, log_max }
    }

    pub fn for_axis(axis: &Axis, start_px: f32, end_px: f32) -> Self {
        match axis.kind {
            ScaleKind::Linear => Self::new_linear(start_px, end_px, axis.min, axis.max),
            ScaleKind::Log10 => Self::new_log10(start_px, end_px, axis.min, axis.max),
        }
    }

    /// Whether `v` can be placed on this scale at all (log scales reject non-positive values).
    #[inline]
    pub fn accepts(&self, v: f64) -> bool {
        v.is_finite() && (!self.log || v > 0.0)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let frac = if self.log {
            let vv = v.max(LOG_FLOOR).log10();
            let span = (self.log_max - self.log_min).max(1e-12);
            (vv - self.log_min) / span
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            (v - self.vmin) / span
        };
        self.start_px + frac as f32 * (self.end_px - self.start_px)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let extent = self.end_px - self.start_px;
        let frac = if extent.abs() < f32::EPSILON { 0.0 } else { ((px - self.start_px) / extent) as f64 };
        if self.log {
            let span = (self.log_max - self.log_min).max(1e-12);
            10f64.powf(self.log_min + frac * span)
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            self.vmin + frac * span
        }
    }
}
