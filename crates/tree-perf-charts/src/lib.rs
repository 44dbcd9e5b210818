// File: crates/tree-perf-charts/src/lib.rs
// Summary: Chart renderer for tree timing tables: load, classify, derive, draw, persist.

pub mod batch;
pub mod derive;
pub mod error;
pub mod render;
pub mod schema;
pub mod table;

pub use batch::{run_batch, BatchConfig, BatchReport, ChartReport, FileReport, InputSpec, INPUTS};
pub use error::{LoadError, ProcessingError, RenderError};
pub use render::{render_comparison, render_log_scale, render_ratio, render_trend, ChartKind, RenderOutcome};
pub use schema::{detect_schema, Operation, SchemaKind};
pub use table::{filter_valid, load, Column, MeasurementTable, Row};
