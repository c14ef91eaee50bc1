//! Error types.
//!
//! Draw calls never fail: degenerate geometry and missing fonts are silent
//! no-ops. Errors only surface from canvas construction, hatch-id parsing,
//! font loading and image export.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the RGB buffer size overflows `usize`.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer could not be allocated.
    #[error("failed to allocate {bytes} byte pixel buffer")]
    Allocation { bytes: usize },

    /// A hatch id outside 0..=8.
    #[error("unknown hatch pattern id {0}")]
    UnknownHatchPattern(i32),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Font file could not be read or parsed.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse font {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Encode/decode failure, carrying a stable numeric status code.
///
/// Code 0 is reserved for success at the boundary; every variant maps to a
/// non-zero code through [`ExportError::code`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{message}")]
    Codec {
        code: u32,
        message: String,
        #[source]
        source: image::ImageError,
    },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

impl ExportError {
    /// Numeric status of this failure (never 0).
    pub fn code(&self) -> u32 {
        match self {
            ExportError::Codec { code, .. } => *code,
            ExportError::BufferSize { .. } => 7,
        }
    }

    /// Human-readable description of this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        let code = match &err {
            image::ImageError::Encoding(_) => 1,
            image::ImageError::Decoding(_) => 2,
            image::ImageError::Parameter(_) => 3,
            image::ImageError::Limits(_) => 4,
            image::ImageError::Unsupported(_) => 5,
            image::ImageError::IoError(_) => 6,
            #[allow(unreachable_patterns)]
            _ => 1,
        };
        ExportError::Codec {
            code,
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_code_6() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ExportError::from(image::ImageError::IoError(io));
        assert_eq!(err.code(), 6);
        assert!(err.message().contains("gone"));
    }

    #[test]
    fn test_buffer_size_code() {
        let err = ExportError::BufferSize {
            expected: 12,
            actual: 9,
        };
        assert_eq!(err.code(), 7);
        assert_eq!(err.message(), "pixel buffer holds 9 bytes, expected 12");
    }

    #[test]
    fn test_export_error_converts_into_crate_error() {
        let err: Error = ExportError::BufferSize {
            expected: 3,
            actual: 0,
        }
        .into();
        assert!(matches!(err, Error::Export(_)));
    }
}
