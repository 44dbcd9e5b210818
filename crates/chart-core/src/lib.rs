// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports public API for chart construction and rendering.

pub mod chart;
pub mod error;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod plugin;

pub use chart::{Chart, RenderOptions};
pub use error::ChartError;
pub use series::{LineStyle, Series, SeriesType};
pub use axis::{Axis, ScaleKind};
pub use view::ViewState;
pub use theme::Theme;
pub use text::TextShaper;
pub use plugin::{HLineOverlay, Indicator, LogFit, LogTrendIndicator, Overlay};
