//! # CLI Error Type
//!
//! Unified error type for shell and one-shot commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Conversion Flow                                │
//! │                                                                         │
//! │  CoreError ───────┐                                                    │
//! │  ValidationError ─┤                                                    │
//! │  ImportError ─────┼──► CliError { code, message }                      │
//! │  ExportError ─────┤         │                                          │
//! │  std::io::Error ──┘         ├── shell: print "error: ..." and go on    │
//! │                             └── calc:  print, exit with failure code   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed command never changes the session.

use pricedesk_core::{CoreError, ValidationError};
use pricedesk_io::{ExportError, ImportError, IoError};
use serde::Serialize;
use thiserror::Error;

/// Error returned from a command.
///
/// ## Serialization
/// `calc --format json` prints failures on stdout as (see
/// [`write_calc_error`](crate::commands::calc::write_calc_error)):
/// ```json
/// {
///   "code": "UPLOAD_REJECTED",
///   "message": "Missing required column(s): Cost Price"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No product at the given row
    NotFound,

    /// Typed value rejected
    ValidationError,

    /// Shell line could not be understood
    Usage,

    /// Upload rejected as a whole
    UploadRejected,

    /// Export could not be written
    ExportFailed,

    /// Terminal or other I/O failure
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Usage, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self.code {
            ErrorCode::Usage => 2,
            _ => 1,
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IndexOutOfRange { .. } | CoreError::EntryNotFound(_) => {
                CliError::new(ErrorCode::NotFound, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ImportError> for CliError {
    fn from(err: ImportError) -> Self {
        CliError::new(ErrorCode::UploadRejected, format!("Upload rejected: {}", err))
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        tracing::error!(error = %err, "export failed");
        CliError::new(ErrorCode::ExportFailed, format!("Export failed: {}", err))
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Import(e) => e.into(),
            IoError::Export(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Internal, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::new(ErrorCode::Internal, err.to_string())
    }
}
