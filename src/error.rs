//! Error types for label parsing and dataset conversion.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// A single label line that could not be turned into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 5 space-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{field}' is not an integer: '{value}'")]
    InvalidInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("field '{field}' must not be negative, got {value}")]
    NegativeExtent { field: &'static str, value: i64 },

    #[error(
        "box corners overflow for center ({x_center}, {y_center}) and size {width}x{height}"
    )]
    CoordinateOverflow {
        x_center: i64,
        y_center: i64,
        width: i64,
        height: i64,
    },

    #[error("label {value:?} contains a character that cannot appear in XML")]
    InvalidLabelCharacter { value: String },
}

/// A failure that aborts the conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("split directory does not exist: {}", .path.display())]
    MissingSplit { path: PathBuf },

    #[error("{}:{line}: malformed label line", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseError,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
