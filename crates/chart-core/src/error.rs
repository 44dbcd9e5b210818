// File: crates/chart-core/src/error.rs
// Summary: Typed failures of the raster/encode pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back surface pixels")]
    ReadPixels,

    #[error("pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },

    #[error("encode PNG failed: {0}")]
    Encode(#[from] image::ImageError),
}
