// File: crates/tree-perf-charts/src/error.rs
// Summary: Error types for loading tables, rendering charts and per-file processing.

use std::path::PathBuf;

use thiserror::Error;

use crate::render::ChartKind;

/// Failure to turn a CSV file into a [`MeasurementTable`](crate::MeasurementTable).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `size`")]
    MissingSize,

    #[error("line {line}: `{value}` in column `{column}` is not a number")]
    InvalidNumber { line: u64, column: &'static str, value: String },

    #[error("line {line}: `{value}` is not a valid size (expected a non-negative integer)")]
    InvalidSize { line: u64, value: String },
}

/// Failure inside the drawing backend or while writing the image.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct RenderError(#[from] anyhow::Error);

/// Per-file diagnostic. `FileNotFound` is the expected "input absent" case;
/// every other variant is a processing failure of an existing input.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("{}: {kind} chart: {source}", path.display())]
    Render {
        path: PathBuf,
        kind: ChartKind,
        #[source]
        source: RenderError,
    },
}

impl ProcessingError {
    pub fn load(path: impl Into<PathBuf>, source: LoadError) -> Self {
        match source {
            LoadError::NotFound(p) => Self::FileNotFound(p),
            source => Self::Load { path: path.into(), source },
        }
    }

    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}
