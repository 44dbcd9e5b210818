// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors and the series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    pub legend_border: skia::Color,
    /// Default colour for reference lines drawn by overlays.
    pub reference_line: skia::Color,
    /// Series colours, assigned in insertion order when a series has no explicit colour.
    pub palette: [skia::Color; 6],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 225, 225, 230),
            axis_line: skia::Color::from_argb(255, 40, 40, 45),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 70, 70, 80),
            title: skia::Color::from_argb(255, 10, 10, 20),
            legend_background: skia::Color::from_argb(230, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 200, 200, 205),
            reference_line: skia::Color::from_argb(255, 214, 39, 40),
            palette: [
                skia::Color::from_argb(255, 31, 119, 180),  // blue
                skia::Color::from_argb(255, 214, 39, 40),   // red
                skia::Color::from_argb(255, 44, 160, 44),   // green
                skia::Color::from_argb(255, 255, 127, 14),  // orange
                skia::Color::from_argb(255, 148, 103, 189), // purple
                skia::Color::from_argb(255, 140, 86, 75),   // brown
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 245, 245, 250),
            legend_background: skia::Color::from_argb(220, 28, 28, 32),
            legend_border: skia::Color::from_argb(255, 70, 70, 80),
            reference_line: skia::Color::from_argb(255, 255, 230, 70),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 255, 170, 60),
                skia::Color::from_argb(255, 190, 140, 255),
                skia::Color::from_argb(255, 200, 160, 120),
            ],
        }
    }

    /// Palette colour for the `index`-th series, wrapping around.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
