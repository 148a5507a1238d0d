use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacropadError {
    /// A file or device picker was dismissed. Callers abort quietly.
    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Malformed configuration: {0}")]
    MalformedConfig(String),

    #[error("Pin '{pin}' must be a list of keys or an object with a 'string' field")]
    InvalidPinShape { pin: String },

    #[error("No configuration file loaded. Please load a file first.")]
    NoFileLoaded,

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Unknown pin: {0}")]
    UnknownPin(String),

    #[error("Could not open serial device {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    #[error("No serial device found")]
    DeviceNotFound,

    #[error("Unsupported file (expected .json): {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MacropadError {
    /// Cancellation is not an error worth surfacing to the user.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MacropadError::UserCancelled)
    }
}

pub type Result<T> = std::result::Result<T, MacropadError>;
