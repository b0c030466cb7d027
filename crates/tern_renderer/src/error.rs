use thiserror::Error;

/// Errors reported by the render pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("samples per pixel must be at least 1")]
    InvalidSamples,

    #[error("max depth must be at least 1")]
    InvalidDepth,

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("worker count must be at least 1")]
    InvalidWorkers,

    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),

    #[error("row {0} was assembled more than once")]
    DuplicateRow(u32),

    #[error("row {row} is outside an image of height {height}")]
    RowOutOfBounds { row: u32, height: u32 },

    #[error("row {row} has {actual} pixels, expected {expected}")]
    RowLength { row: u32, expected: usize, actual: usize },

    #[error("{0} rows were never assembled")]
    MissingRows(usize),
}

pub type RenderResult<T> = Result<T, RenderError>;
