//! Crate-level error type and `Result` alias for structured error handling.
//! Converts underlying I/O, GDAL and encoder errors, and provides semantic
//! variants for input validation and processing failures. Callers that need
//! to branch on the failure class use [`Error::kind`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure class of an [`Error`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The input or the requested options are unusable (e.g. too few bands).
    Validation,
    /// Reading the source or writing the destination failed.
    Io,
    /// Anything else that went wrong while composing or encoding the image.
    Processing,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Io => write!(f, "i/o"),
            ErrorKind::Processing => write!(f, "processing"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] crate::io::GdalError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Input needs at least {required} bands (B2, B3, B4, B8), found {found}")]
    InsufficientBands { found: usize, required: usize },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn processing<E: std::fmt::Display>(e: E) -> Self {
        Error::Processing(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InsufficientBands { .. } | Error::InvalidArgument { .. } | Error::Config(_) => {
                ErrorKind::Validation
            }
            Error::Io(_) => ErrorKind::Io,
            Error::Gdal(e) if e.is_io() => ErrorKind::Io,
            Error::Gdal(_) | Error::Jpeg(_) | Error::Processing(_) => ErrorKind::Processing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_bands_is_a_validation_error() {
        let err = Error::InsufficientBands { found: 3, required: 4 };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("at least 4 bands"));
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn io_errors_keep_the_underlying_message() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "I/O error: read-only");
    }

    #[test]
    fn processing_errors_wrap_any_display() {
        let err = Error::processing("shape mismatch");
        assert_eq!(err.kind(), ErrorKind::Processing);
        assert_eq!(err.to_string(), "Processing error: shape mismatch");
    }
}
