// File: crates/chart-core/src/grid.rs
// Summary: Grid/tick layout helpers and tick label formatting.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    // last sample is pinned to `end` so accumulated rounding never undershoots it
    (0..steps).map(|i| if i + 1 == steps { end } else { start + step * i as f64 }).collect()
}

/// Round a raw step up to 1, 2 or 5 times a power of ten.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Upper bound on ticks per linear axis.
const MAX_TICKS: usize = 1000;

/// Tick positions on a linear axis, aligned to a nice step, all inside `[min, max]`.
pub fn linear_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(max > min) || !min.is_finite() || !max.is_finite() {
        return vec![min];
    }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() * step;
    let count = ((max - first) / step + 1e-9).floor().clamp(0.0, MAX_TICKS as f64) as usize;
    let mut out: Vec<f64> = (0..=count)
        .map(|k| first + k as f64 * step)
        .filter(|&v| v <= max + step * 1e-9)
        // snap -0.0 and float noise around zero
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect();
    // at large magnitudes the step can fall below float spacing
    out.dedup();
    out
}

/// Decade ticks (powers of ten) inside `[min, max]`; both must be positive.
/// Falls back to the endpoints when the range spans less than one decade.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(min > 0.0) || !(max > min) {
        return vec![min.max(f64::MIN_POSITIVE)];
    }
    let lo = min.log10().ceil() as i32;
    let hi = max.log10().floor() as i32;
    if lo > hi {
        return vec![min, max];
    }
    (lo..=hi).map(|k| 10f64.powi(k)).collect()
}

/// Compact tick label: plain decimals for moderate magnitudes, exponent form otherwise.
pub fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if !(1e-3..1e6).contains(&a) {
        return format!("{v:e}");
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(10.0, 10), 1.0);
        assert_eq!(nice_step(1000.0, 5), 200.0);
        assert!((nice_step(0.003, 6) - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn linear_ticks_stay_in_range() {
        let t = linear_ticks(100.0, 300.0, 5);
        assert_eq!(t.first().copied(), Some(100.0));
        assert_eq!(t.last().copied(), Some(300.0));
        assert!(t.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn linear_ticks_terminate_at_large_magnitudes() {
        let t = linear_ticks(1e16, 1e16 + 4.0, 8);
        assert!(!t.is_empty());
        assert!(t.len() <= MAX_TICKS + 1);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn log_ticks_are_decades() {
        let t = log_ticks(0.0005, 2.0);
        let want = [0.001, 0.01, 0.1, 1.0];
        assert_eq!(t.len(), want.len());
        for (got, want) in t.iter().zip(want) {
            assert!((got - want).abs() < want * 1e-9, "{got} vs {want}");
        }
        assert_eq!(log_ticks(2.0, 3.0), vec![2.0, 3.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(250.0), "250");
        assert_eq!(format_tick(0.0015), "0.0015");
        assert_eq!(format_tick(0.0001), "1e-4");
        assert_eq!(format_tick(10_000_000.0), "1e7");
    }
}
