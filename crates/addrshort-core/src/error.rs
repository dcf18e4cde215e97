use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No active selection")]
    NoSelection,

    #[error("Address {address:#010x} does not belong to any module")]
    ModuleNotFound { address: u32 },

    #[error("Address {address:#010x} has no physical mapping in file")]
    NoFileMapping { address: u32 },

    #[error("No memory at address {address:#010x}")]
    Unmapped { address: u32 },

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("System clipboard is not available on this platform")]
    ClipboardUnavailable,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short status-bar text for failures the user fixes by changing the selection.
    ///
    /// Returns `None` for errors that are not tied to the selected address.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            Error::NoSelection => Some("No selection"),
            Error::ModuleNotFound { .. } => Some("Address does not belong to any module"),
            Error::NoFileMapping { .. } => Some("Address has no physical mapping in file"),
            Error::Unmapped { .. } => Some("No memory at the specified address"),
            _ => None,
        }
    }

    /// Check if this error aborts a single command without affecting the session
    pub fn is_recoverable(&self) -> bool {
        self.status_message().is_some()
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
