use std::fmt;

/// The main error type for the halftoner crate
#[derive(Debug)]
pub enum HalftonerError {
    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// Buffer dimensions are zero or paired buffers disagree on shape
    InvalidDimension(String),

    /// A quantization parameter was rejected at the call boundary
    /// (unknown mode, non-power-of-two matrix size, zero block size)
    InvalidParameter(String),
}

impl fmt::Display for HalftonerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalftonerError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            HalftonerError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            HalftonerError::Io(e) => write!(f, "I/O error: {}", e),
            HalftonerError::InvalidDimension(msg) => write!(f, "Invalid dimensions: {}", msg),
            HalftonerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for HalftonerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalftonerError::ImageDecode(e) | HalftonerError::ImageEncode(e) => Some(e),
            HalftonerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for HalftonerError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => HalftonerError::ImageEncode(err),
            _ => HalftonerError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for HalftonerError {
    fn from(err: std::io::Error) -> Self {
        HalftonerError::Io(err)
    }
}

// Convenience type alias for Results using HalftonerError
pub type Result<T = ()> = std::result::Result<T, HalftonerError>;
