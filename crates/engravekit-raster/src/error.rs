//! Error types for the raster engine.

use std::io;
use thiserror::Error;

/// Errors from the preprocessing and scanning stages.
#[derive(Error, Debug)]
pub enum RasterError {
    /// No foreground pixel survived thresholding/inversion. Surfaced to the
    /// caller instead of producing a zero-size program.
    #[error("Empty image: no foreground pixels remain after preprocessing")]
    EmptyImage,
}

/// Errors from writing the finished program to its sink.
#[derive(Error, Debug)]
pub enum EmitError {
    /// The destination could not be written. The destination is left in its
    /// prior state.
    #[error("Failed to write toolpath to sink: {0}")]
    SinkWrite(#[from] io::Error),
}

/// Result type alias for preprocessing and scanning.
pub type RasterResult<T> = Result<T, RasterError>;

/// Result type alias for program emission.
pub type EmitResult<T> = Result<T, EmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RasterError::EmptyImage.to_string(),
            "Empty image: no foreground pixels remain after preprocessing"
        );

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: EmitError = io_err.into();
        assert!(matches!(err, EmitError::SinkWrite(_)));
        assert_eq!(
            err.to_string(),
            "Failed to write toolpath to sink: access denied"
        );
    }
}
