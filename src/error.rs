//! Error handling for libemojistatus
//!
//! This module provides error types and FFI-compatible error handling mechanisms.

use std::cell::RefCell;
use std::fmt;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Operation succeeded
    Success = 0,
    /// Generic/unknown error
    Unknown = 1,
    /// Invalid argument provided
    InvalidArgument = 2,
    /// Null pointer was passed
    NullPointer = 3,
    /// Memory allocation failed
    OutOfMemory = 4,
    /// Invalid UTF-8 string
    InvalidUtf8 = 5,
    /// Payload could not be decoded into a wire or domain object
    DecodeError = 6,
    /// Object could not be encoded for output
    EncodeError = 7,
    /// Resource not found
    NotFound = 8,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::NullPointer => "Null pointer",
            ErrorCode::OutOfMemory => "Out of memory",
            ErrorCode::InvalidUtf8 => "Invalid UTF-8 string",
            ErrorCode::DecodeError => "Decode error",
            ErrorCode::EncodeError => "Encode error",
            ErrorCode::NotFound => "Not found",
        }
    }
}

/// Internal error type
#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
        }
    }

    pub fn null_pointer() -> Self {
        Error::new(ErrorCode::NullPointer, "Null pointer provided")
    }

    pub fn invalid_utf8() -> Self {
        Error::new(ErrorCode::InvalidUtf8, "Invalid UTF-8 string")
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::InvalidArgument, msg)
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::EncodeError, msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::DecodeError, err.to_string())
    }
}

// Per-thread error storage for FFI, read back by the thread that made the failing call
thread_local! {
    static LAST_ERROR: RefCell<Option<Error>> = const { RefCell::new(None) };
}

/// Set the last error (called internally when FFI functions fail)
pub(crate) fn set_last_error(error: Error) {
    LAST_ERROR.with(|last| *last.borrow_mut() = Some(error));
}

/// Clear the last error
pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|last| *last.borrow_mut() = None);
}

/// Get the last error (for FFI)
pub(crate) fn get_last_error() -> Option<Error> {
    LAST_ERROR.with(|last| last.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorCode::DecodeError, "missing field `document_id`");
        assert_eq!(err.code, ErrorCode::DecodeError);
        assert_eq!(err.message, "missing field `document_id`");
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("status must be an object");
        assert_eq!(err.to_string(), "Invalid argument: status must be an object");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.code, ErrorCode::DecodeError);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_error_storage() {
        clear_last_error();
        assert!(get_last_error().is_none());

        set_last_error(Error::null_pointer());
        let retrieved = get_last_error();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().code, ErrorCode::NullPointer);

        clear_last_error();
        assert!(get_last_error().is_none());
    }

    #[test]
    fn test_error_storage_is_per_thread() {
        set_last_error(Error::new(ErrorCode::DecodeError, "bad payload"));

        let other = std::thread::spawn(|| {
            let seen = get_last_error().map(|e| e.code);
            clear_last_error();
            seen
        })
        .join()
        .unwrap();

        assert_eq!(other, None);
        assert_eq!(get_last_error().map(|e| e.code), Some(ErrorCode::DecodeError));
        clear_last_error();
    }
}
