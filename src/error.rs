//! Error types for the motor annotation converter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Filesystem failure while reading inputs or writing outputs.
    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The annotation CSV is missing or contains a malformed row.
    #[error("failed to read annotations from {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// An image file name carries no slice number after its final underscore.
    #[error("cannot derive a slice number from image name {}", path.display())]
    InvalidSliceName { path: PathBuf },

    /// A tomogram reports a zero width or height.
    #[error("tomogram {tomo_id} has an empty array shape")]
    InvalidImageSize { tomo_id: String },

    /// `Motor axis 0` is NaN or infinite.
    #[error("tomogram {tomo_id} has a non-finite motor slice coordinate")]
    InvalidSliceIndex { tomo_id: String },

    /// Arguments built outside the command-line parser are out of range.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
