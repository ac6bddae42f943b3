//! Error types for tessera.
//!
//! Layout, paint, scrolling and style lookups never fail; they clamp or fall
//! back to defaults. Errors are reserved for I/O, malformed configuration
//! input and programmer mistakes caught at the application boundary.

use std::fmt;
use std::io;

/// Result type alias for tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tessera operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while writing terminal output.
    Io(io::Error),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Size specification that could not be parsed.
    InvalidSize(String),
    /// Theme document that could not be parsed.
    InvalidTheme(String),
    /// Buffer dimension error (e.g., zero width/height).
    InvalidDimensions { width: u32, height: u32 },
    /// An operation that requires a container got a leaf element.
    NotAContainer(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidSize(s) => write!(f, "invalid size specification: {s}"),
            Self::InvalidTheme(s) => write!(f, "invalid theme: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::NotAContainer(kind) => write!(f, "element '{kind}' is not a container"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidTheme(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("0x100"));

        let err = Error::InvalidSize("12q".to_string());
        assert!(err.to_string().contains("12q"));

        let err = Error::NotAContainer("button".to_string());
        assert!(err.to_string().contains("'button'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidTheme(_)));
    }
}
