//! # I/O Error Types
//!
//! Errors raised while reading uploads or writing exports.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Upload / Export Errors                          │
//! │                                                                         │
//! │  std::io::Error ───┐                                                   │
//! │  csv::Error ───────┼──► ImportError ──┐                                │
//! │  missing columns ──┘                  ├──► IoError ──► CliError        │
//! │  std::io::Error ──────► ExportError ──┘                                │
//! │                                                                         │
//! │  An ImportError always means the WHOLE batch was rejected.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Upload rejection reasons.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file has no header row.
    #[error("Uploaded file is empty")]
    EmptyFile,

    /// One or more required columns are absent.
    ///
    /// ## When This Occurs
    /// - A sheet exported from another tool with renamed headers
    /// - The wrong file was chosen
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The CSV structure could not be read.
    #[error("Malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// The file could not be read from disk.
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the destination failed.
    #[error("Could not write export: {0}")]
    Write(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("Could not encode export row: {0}")]
    Csv(#[from] csv::Error),

    /// The destination file could not be created.
    #[error("Could not create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any pricedesk-io failure.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("expected {} fields, found {}", expected_len, len),
            _ => err.to_string(),
        };
        ImportError::Malformed { line, message }
    }
}

/// Convenience type alias for pricedesk-io results.
pub type IoResult<T> = Result<T, IoError>;
