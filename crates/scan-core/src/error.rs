//! Error Types
//!
//! Domain errors for the scanner, storage and export paths.
//! Adapters translate platform errors into these at the boundary.

use thiserror::Error;

/// Camera / decoder failures reported by a `CameraBackend`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScannerError {
    /// The user (or browser policy) refused camera access.
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    /// No usable camera, or it is already held by another application.
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    /// Any other failure reported by the decoding library.
    #[error("Scanner error: {0}")]
    Backend(String),
}

impl ScannerError {
    /// Classify a raw error message from the decoding library.
    ///
    /// Browsers report `NotAllowedError` / `NotFoundError` / `NotReadableError`
    /// names inside the message text, so matching on those is all we can do.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("NotAllowedError") || message.contains("Permission") {
            ScannerError::PermissionDenied(message)
        } else if message.contains("NotFoundError")
            || message.contains("NotReadableError")
            || message.contains("OverconstrainedError")
        {
            ScannerError::CameraUnavailable(message)
        } else {
            ScannerError::Backend(message)
        }
    }
}

/// Local key-value storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or not present (private mode, sandboxed frame).
    #[error("Local storage unavailable")]
    Unavailable,

    #[error("Failed to read from storage: {0}")]
    Read(String),

    /// Usually a quota error.
    #[error("Failed to write to storage: {0}")]
    Write(String),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
}

/// CSV export failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Nothing to export: the scan list is empty")]
    EmptySession,
}
