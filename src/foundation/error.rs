use crate::pixels::format::PixelFormat;

/// Convenience result type used across pixbuf.
pub type PixbufResult<T> = Result<T, PixbufError>;

/// Top-level error taxonomy used by buffer APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixbufError {
    /// A buffer taking part in the operation holds no pixels.
    #[error("buffer is not allocated")]
    NotAllocated,

    /// Source and destination disagree on bytes per pixel.
    #[error("format mismatch: expected {expected:?}, got {actual:?}")]
    FormatMismatch {
        /// Format of the buffer being written.
        expected: PixelFormat,
        /// Format of the buffer being read.
        actual: PixelFormat,
    },

    /// Requested width/height cannot describe a buffer.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Pixel format or bit depth has no supported layout.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Imported byte slice is shorter than the described pixels.
    #[error("insufficient data: need {needed} bytes, got {actual}")]
    InsufficientData {
        /// Bytes required by width, height and format.
        needed: usize,
        /// Bytes actually provided.
        actual: usize,
    },

    /// Source row stride cannot hold one row of pixels.
    #[error("row stride {stride} is smaller than row size {min}")]
    StrideTooSmall {
        /// Stride given by the caller.
        stride: usize,
        /// `width * bytes_per_pixel`.
        min: usize,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixbufError {
    /// Build a [`PixbufError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`PixbufError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
