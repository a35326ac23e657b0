// modflowrs-arrayfmt/src/error.rs

//! Error types for array formats and the array writer.

use crate::kind::NumericKind;
use thiserror::Error;

/// Result type alias for array format operations.
pub type Result<T> = std::result::Result<T, ArrayFormatError>;

#[derive(Error, Debug)]
pub enum ArrayFormatError {
    /// The text is not a Fortran edit descriptor this crate understands
    #[error("Invalid format '{descriptor}': {message}")]
    Format { descriptor: String, message: String },

    /// Values of one numeric kind written with a format for the other
    #[error("Cannot write {found} values with a {expected} array format")]
    KindMismatch {
        expected: NumericKind,
        found: NumericKind,
    },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArrayFormatError {
    pub fn format_error<S: Into<String>>(descriptor: S, message: S) -> Self {
        ArrayFormatError::Format {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }
}
