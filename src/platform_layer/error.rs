use crate::core::{HResult, NativeError};
use windows::core::Error as WinError;

// Errors raised while setting up the Windows shell environment, as opposed to the
// per-call `NativeError`s the jump list logic absorbs and folds into results.
#[derive(Debug, Clone)]
pub enum PlatformError {
    /// An error originating from the Windows API.
    Win32(WinError),
    /// COM could not be initialized for the calling thread.
    InitializationFailed(String),
}

impl From<WinError> for PlatformError {
    fn from(err: WinError) -> Self {
        PlatformError::Win32(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Win32(e) => write!(f, "Win32 Error: {}", e),
            PlatformError::InitializationFailed(s) => write!(f, "Initialization Failed: {}", s),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for platform layer operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Keeps the HRESULT of a failed shell call so the core can classify it.
pub(crate) fn native_error(operation: &'static str, err: &WinError) -> NativeError {
    NativeError::new(operation, HResult(err.code().0))
}
