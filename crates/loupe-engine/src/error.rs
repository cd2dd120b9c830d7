use thiserror::Error;

use crate::coords::PixelSize;

/// Failures reported by a [`DocumentSource`](crate::document::DocumentSource).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("page {index} out of range (total: {count})")]
    PageOutOfRange { index: usize, count: usize },

    #[error("buffer is {actual}, expected {expected}")]
    BufferFootprintMismatch { expected: PixelSize, actual: PixelSize },

    #[error("invalid relative rectangle: {0}")]
    InvalidRect(String),

    #[error("renderer failure: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("invalid display size: {width}x{height}")]
    InvalidDisplay { width: f32, height: f32 },

    #[error("document has no pages")]
    EmptyDocument,

    #[error("page {index} out of range (total: {count})")]
    PageOutOfRange { index: usize, count: usize },

    #[error("page {index} has zero size")]
    EmptyPage { index: usize },

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
