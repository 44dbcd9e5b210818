// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::error::ChartError;
use crate::geometry::RectI32;
use crate::grid::{format_tick, linear_ticks, log_ticks};
use crate::plugin::Overlay;
use crate::scale::ValueScale;
use crate::series::{LineStyle, Series, SeriesType};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;
use crate::Axis;

const TICK_FONT: f32 = 12.0;
const LABEL_FONT: f32 = 14.0;
const TITLE_FONT: f32 = 17.0;
const LEGEND_FONT: f32 = 13.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Draw title, axis labels, tick labels and legend. Off gives font-independent output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

/// One row of the legend, resolved against the theme.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: skia::Color,
    pub series_type: SeriesType,
    pub line_style: LineStyle,
}

pub struct Chart {
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub overlays: Vec<Box<dyn Overlay>>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: None,
            series: Vec::new(),
            overlays: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn add_overlay(&mut self, overlay: impl Overlay + 'static) {
        self.overlays.push(Box::new(overlay));
    }

    /// Fit both axis ranges to the data, padding Y by `y_margin` of its span.
    pub fn autoscale_axes(&mut self, y_margin: f64) {
        ViewState::from_chart(self, y_margin).apply_to_chart(self);
    }

    /// Series produced by overlays for the current axis ranges.
    pub fn overlay_series(&self) -> Vec<Series> {
        self.overlays.iter().flat_map(|o| o.compute(self)).collect()
    }

    /// Legend rows: labeled series first (palette colours by series index), then labeled overlays.
    pub fn legend_entries(&self, theme: &Theme) -> Vec<LegendEntry> {
        let series = self.series.iter().enumerate().filter_map(|(i, s)| {
            s.label.as_ref().map(|label| LegendEntry {
                label: label.clone(),
                color: s.color.unwrap_or_else(|| theme.series_color(i)),
                series_type: s.series_type,
                line_style: s.line_style,
            })
        });
        let overlays = self.overlay_series().into_iter().filter_map(|s| {
            s.label.map(|label| LegendEntry {
                label,
                color: s.color.unwrap_or(theme.reference_line),
                series_type: s.series_type,
                line_style: s.line_style,
            })
        });
        series.chain(overlays).collect()
    }

    /// Render into an unpremultiplied RGBA8 buffer. Returns `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or(ChartError::Surface { width: opts.width, height: opts.height })?;
        self.draw(surface.canvas(), opts);

        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::ReadPixels.into());
        }
        Ok((pixels, opts.width as u32, opts.height as u32, stride))
    }

    /// Render and encode as PNG in memory. The encoder writes no timestamps,
    /// so identical charts produce identical bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, width, height, _) = self.render_to_rgba8(opts)?;
        let img = image::RgbaImage::from_raw(width, height, pixels)
            .ok_or(ChartError::BufferSize { width, height })?;
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(ChartError::Encode)?;
        Ok(bytes)
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        // Encode fully before touching the filesystem so a failed render leaves no file behind.
        let data = self.render_to_png_bytes(opts)?;

        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(())
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = RectI32::inset(opts.width, opts.height, &opts.insets);
        let xs = ValueScale::for_axis(&self.x_axis, plot.left as f32, plot.right as f32);
        let ys = ValueScale::for_axis(&self.y_axis, plot.bottom as f32, plot.top as f32);
        let x_ticks = axis_ticks(&self.x_axis, 8);
        let y_ticks = axis_ticks(&self.y_axis, 6);

        // Grid & axes
        draw_grid(canvas, plot, &xs, &ys, &x_ticks, &y_ticks, theme);

        // Series, clipped to the plot area
        canvas.save();
        canvas.clip_rect(plot.to_skia(), skia::ClipOp::Intersect, true);
        for (i, s) in self.series.iter().enumerate() {
            let color = s.color.unwrap_or_else(|| theme.series_color(i));
            draw_series(canvas, &xs, &ys, s, color);
        }
        for s in self.overlay_series() {
            let color = s.color.unwrap_or(theme.reference_line);
            draw_series(canvas, &xs, &ys, &s, color);
        }
        canvas.restore();

        draw_axes(canvas, plot, theme);

        if opts.draw_labels {
            let shaper = TextShaper::new();
            draw_tick_labels(canvas, &shaper, plot, &xs, &ys, &x_ticks, &y_ticks, theme);
            draw_labels(canvas, &shaper, plot, opts, &self.x_axis, &self.y_axis, self.title.as_deref());
            let entries = self.legend_entries(theme);
            draw_legend(canvas, &shaper, plot, &entries, theme);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn axis_ticks(axis: &Axis, target: usize) -> Vec<f64> {
    if axis.is_log() {
        log_ticks(axis.min, axis.max)
    } else {
        linear_ticks(axis.min, axis.max, target)
    }
}

fn stroke_paint(color: skia::Color, width: f32, style: LineStyle) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    if style == LineStyle::Dashed {
        paint.set_path_effect(skia::PathEffect::dash(&[8.0, 5.0], 0.0));
    }
    paint
}

fn draw_grid(
    canvas: &skia::Canvas,
    plot: RectI32,
    xs: &ValueScale,
    ys: &ValueScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let paint = stroke_paint(theme.grid, 1.0, LineStyle::Solid);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    // verticals
    for &x in x_ticks.iter().filter(|&&x| xs.accepts(x)) {
        let px = xs.to_px(x);
        canvas.draw_line((px, t), (px, b), &paint);
    }
    // horizontals
    for &y in y_ticks.iter().filter(|&&y| ys.accepts(y)) {
        let py = ys.to_px(y);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: RectI32, theme: &Theme) {
    let paint = stroke_paint(theme.axis_line, 1.5, LineStyle::Solid);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    // X and Y axis lines
    canvas.draw_line((l, b), (r, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

#[allow(clippy::too_many_arguments)]
fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: RectI32,
    xs: &ValueScale,
    ys: &ValueScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let tick_paint = stroke_paint(theme.axis_line, 1.0, LineStyle::Solid);
    let b = plot.bottom as f32;
    let l = plot.left as f32;
    for &x in x_ticks.iter().filter(|&&x| xs.accepts(x)) {
        let px = xs.to_px(x);
        canvas.draw_line((px, b), (px, b + 5.0), &tick_paint);
        shaper.draw_centered(canvas, &format_tick(x), px, b + 20.0, TICK_FONT, theme.tick, true);
    }
    for &y in y_ticks.iter().filter(|&&y| ys.accepts(y)) {
        let py = ys.to_px(y);
        canvas.draw_line((l - 5.0, py), (l, py), &tick_paint);
        shaper.draw_right(canvas, &format_tick(y), l - 8.0, py + 4.0, TICK_FONT, theme.tick, true);
    }
}

fn draw_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: RectI32,
    opts: &RenderOptions,
    x: &Axis,
    y: &Axis,
    title: Option<&str>,
) {
    let theme = &opts.theme;
    let center_x = (plot.left + plot.right) as f32 * 0.5;

    shaper.draw_centered(canvas, &x.label, center_x, opts.height as f32 - 14.0, LABEL_FONT, theme.axis_label, false);
    shaper.draw_left(canvas, &y.label, 8.0, plot.top as f32 - 10.0, LABEL_FONT, theme.axis_label, false);
    if let Some(title) = title {
        shaper.draw_centered(canvas, title, center_x, TITLE_FONT + 6.0, TITLE_FONT, theme.title, false);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, plot: RectI32, entries: &[LegendEntry], theme: &Theme) {
    if entries.is_empty() {
        return;
    }
    let pad = 8.0f32;
    let swatch = 26.0f32;
    let row_h = LEGEND_FONT + 7.0;
    let text_w = entries
        .iter()
        .map(|e| shaper.measure_width(&e.label, LEGEND_FONT, false))
        .fold(0.0f32, f32::max);
    let left = plot.left as f32 + 10.0;
    let top = plot.top as f32 + 10.0;
    let rect = skia::Rect::from_xywh(left, top, pad * 3.0 + swatch + text_w, pad * 2.0 + row_h * entries.len() as f32);

    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.legend_background);
    canvas.draw_rect(rect, &fill);
    canvas.draw_rect(rect, &stroke_paint(theme.legend_border, 1.0, LineStyle::Solid));

    for (i, e) in entries.iter().enumerate() {
        let mid_y = top + pad + row_h * (i as f32 + 0.5);
        let x0 = left + pad;
        match e.series_type {
            SeriesType::Line => {
                canvas.draw_line((x0, mid_y), (x0 + swatch, mid_y), &stroke_paint(e.color, 2.0, e.line_style));
            }
            SeriesType::Scatter => {
                canvas.draw_circle((x0 + swatch * 0.5, mid_y), 3.5, &marker_paint(e.color));
            }
        }
        shaper.draw_left(canvas, &e.label, x0 + swatch + pad, mid_y + LEGEND_FONT * 0.35, LEGEND_FONT, theme.axis_label, false);
    }
}

fn marker_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn draw_series(canvas: &skia::Canvas, xs: &ValueScale, ys: &ValueScale, series: &Series, color: skia::Color) {
    let points: Vec<(f32, f32)> = series
        .data_xy
        .iter()
        .filter(|&&(x, y)| xs.accepts(x) && ys.accepts(y))
        .map(|&(x, y)| (xs.to_px(x), ys.to_px(y)))
        .collect();

    match (series.series_type, points.as_slice()) {
        (_, []) => {}
        // a lone point has no segment to stroke; mark it instead
        (SeriesType::Line, [only]) => {
            canvas.draw_circle(*only, 3.0, &marker_paint(color));
        }
        (SeriesType::Line, [first, rest @ ..]) => {
            let mut path = skia::Path::new();
            path.move_to(*first);
            for &p in rest {
                path.line_to(p);
            }
            canvas.draw_path(&path, &stroke_paint(color, 2.0, series.line_style));
        }
        (SeriesType::Scatter, pts) => {
            let paint = marker_paint(color);
            for &p in pts {
                canvas.draw_circle(p, 3.5, &paint);
            }
        }
    }
}
