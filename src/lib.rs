use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

use serde::Serialize;

// Core modules
pub mod context;
pub mod error;
pub mod platforms;
pub mod types;

// Re-exports for convenience
pub use context::{ClientRef, Context, LogCallback, LogLevel};
pub use error::{Error, ErrorCode, Result};
pub use platforms::telegram::{
    datetime_to_timestamp, timestamp_to_datetime, write_emoji_status, RawEmojiStatus,
};
pub use types::EmojiStatus;

// Library version information
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;
pub const VERSION_STRING: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (libemojistatus)"
);

/// Borrow a C string as UTF-8
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives `'a`.
unsafe fn borrow_c_str<'a>(ptr: *const c_char) -> Result<&'a str> {
    CStr::from_ptr(ptr).to_str().map_err(|_| Error::invalid_utf8())
}

/// Serialize a value to JSON and hand it to the caller as an owned C string
fn json_to_c_string<T: Serialize>(value: &T) -> Result<*mut c_char> {
    let json = serde_json::to_string(value)
        .map_err(|e| Error::encode(format!("Failed to serialize: {e}")))?;
    CString::new(json)
        .map(CString::into_raw)
        .map_err(|_| Error::encode("Serialized JSON contains a NUL byte"))
}

/// Record an error for the caller and return NULL
fn fail<T>(err: Error) -> *mut T {
    error::set_last_error(err);
    std::ptr::null_mut()
}

/// FFI function: Free a string allocated by this library
#[no_mangle]
pub extern "C" fn emojistatus_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}

// ============================================================================
// Library Initialization Pattern
// ============================================================================

/// FFI function: Initialize the library
/// This should be called once before using any other library functions
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn emojistatus_init() -> ErrorCode {
    error::clear_last_error();
    ErrorCode::Success
}

/// FFI function: Cleanup the library
/// This should be called once when done using the library
#[no_mangle]
pub extern "C" fn emojistatus_cleanup() {
    error::clear_last_error();
}

// ============================================================================
// Version Information
// ============================================================================

/// FFI function: Get the library version string
/// Returns a static string, do NOT free this pointer
#[no_mangle]
pub extern "C" fn emojistatus_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), " (libemojistatus)\0").as_ptr() as *const c_char
}

/// FFI function: Get the major version number
#[no_mangle]
pub extern "C" fn emojistatus_version_major() -> u32 {
    VERSION_MAJOR
}

/// FFI function: Get the minor version number
#[no_mangle]
pub extern "C" fn emojistatus_version_minor() -> u32 {
    VERSION_MINOR
}

/// FFI function: Get the patch version number
#[no_mangle]
pub extern "C" fn emojistatus_version_patch() -> u32 {
    VERSION_PATCH
}

// ============================================================================
// Error Handling FFI
// ============================================================================

/// FFI function: Get the error code of the last error
/// Returns ErrorCode::Success (0) if no error has occurred
#[no_mangle]
pub extern "C" fn emojistatus_last_error_code() -> ErrorCode {
    error::get_last_error()
        .map(|e| e.code)
        .unwrap_or(ErrorCode::Success)
}

/// FFI function: Get the error message of the last error
/// Returns a dynamically allocated string that must be freed with emojistatus_free_string()
/// Returns NULL if no error has occurred
#[no_mangle]
pub extern "C" fn emojistatus_last_error_message() -> *mut c_char {
    let error = match error::get_last_error() {
        Some(e) => e,
        None => return std::ptr::null_mut(),
    };

    match CString::new(error.message) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// FFI function: Get a human-readable description of an error code
/// Returns a static string, do NOT free this pointer
#[no_mangle]
pub extern "C" fn emojistatus_error_code_string(code: ErrorCode) -> *const c_char {
    let s = match code {
        ErrorCode::Success => "Success\0",
        ErrorCode::Unknown => "Unknown error\0",
        ErrorCode::InvalidArgument => "Invalid argument\0",
        ErrorCode::NullPointer => "Null pointer\0",
        ErrorCode::OutOfMemory => "Out of memory\0",
        ErrorCode::InvalidUtf8 => "Invalid UTF-8 string\0",
        ErrorCode::DecodeError => "Decode error\0",
        ErrorCode::EncodeError => "Encode error\0",
        ErrorCode::NotFound => "Not found\0",
    };
    s.as_ptr() as *const c_char
}

/// FFI function: Clear the last error
#[no_mangle]
pub extern "C" fn emojistatus_clear_error() {
    error::clear_last_error();
}

// ============================================================================
// Opaque Handle Pattern - Context Management
// ============================================================================

/// Opaque handle to a Context object
/// This is a pointer to a Rust-managed object
pub type ContextHandle = *mut Context;

/// FFI function: Create a new context
/// Returns an opaque handle to the context
/// The handle must be freed with emojistatus_context_destroy()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn emojistatus_context_create(id: *const c_char) -> ContextHandle {
    error::clear_last_error();

    if id.is_null() {
        return fail(Error::null_pointer());
    }

    let id_str = match unsafe { borrow_c_str(id) } {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let context = Box::new(Context::new(id_str));
    Box::into_raw(context)
}

/// FFI function: Set a configuration value on a context
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn emojistatus_context_set_config(
    handle: ContextHandle,
    key: *const c_char,
    value: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || key.is_null() || value.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let key_str = match unsafe { borrow_c_str(key) } {
        Ok(s) => s,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            return code;
        }
    };

    let value_str = match unsafe { borrow_c_str(value) } {
        Ok(s) => s,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            return code;
        }
    };

    if key_str.is_empty() {
        error::set_last_error(Error::invalid_argument("Config key must not be empty"));
        return ErrorCode::InvalidArgument;
    }

    let context = unsafe { &mut *handle };
    context.set_config(key_str, value_str);
    ErrorCode::Success
}

/// FFI function: Get a configuration value from a context
/// Returns a dynamically allocated string that must be freed with emojistatus_free_string()
/// Returns NULL if the key doesn't exist or on error
#[no_mangle]
pub extern "C" fn emojistatus_context_get_config(
    handle: ContextHandle,
    key: *const c_char,
) -> *mut c_char {
    error::clear_last_error();

    if handle.is_null() || key.is_null() {
        return fail(Error::null_pointer());
    }

    let key_str = match unsafe { borrow_c_str(key) } {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let context = unsafe { &*handle };

    match context.get_config(key_str) {
        Some(value) => match CString::new(value.as_str()) {
            Ok(c_string) => c_string.into_raw(),
            Err(_) => fail(Error::new(
                ErrorCode::OutOfMemory,
                "Failed to allocate string",
            )),
        },
        None => fail(Error::new(ErrorCode::NotFound, "Key not found")),
    }
}

/// FFI function: Destroy a context and free its memory
/// After calling this, the handle is invalid and must not be used.
/// Statuses parsed with this context stay valid.
#[no_mangle]
pub extern "C" fn emojistatus_context_destroy(handle: ContextHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

// ============================================================================
// Callback Pattern - Function Pointers
// ============================================================================

/// FFI function: Set a log callback on a context
/// The callback will be called for logging events
/// user_data is an opaque pointer passed back to the callback
#[no_mangle]
pub extern "C" fn emojistatus_context_set_log_callback(
    handle: ContextHandle,
    callback: LogCallback,
    user_data: *mut c_void,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let context = unsafe { &mut *handle };
    context.set_log_callback(callback, user_data);
    ErrorCode::Success
}

/// FFI function: Clear the log callback on a context
#[no_mangle]
pub extern "C" fn emojistatus_context_clear_log_callback(handle: ContextHandle) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let context = unsafe { &mut *handle };
    context.clear_log_callback();
    ErrorCode::Success
}

// ============================================================================
// Emoji Status FFI
// ============================================================================

/// FFI function: Parse a raw Telegram emoji status
/// handle: optional context; when non-NULL the status is tied to it and
/// outcomes are logged through its callback
/// raw_json: JSON object tagged with its constructor, e.g.
/// {"_": "emojiStatus", "document_id": 42, "until": 1700000000}
/// Returns a JSON string representing the EmojiStatus
/// The caller must free the returned string using emojistatus_free_string()
/// Returns NULL when the user has no emoji status (last error code stays Success)
/// or on error
#[no_mangle]
pub extern "C" fn emojistatus_parse(handle: ContextHandle, raw_json: *const c_char) -> *mut c_char {
    error::clear_last_error();

    if raw_json.is_null() {
        return fail(Error::null_pointer());
    }

    let json_str = match unsafe { borrow_c_str(raw_json) } {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let context = unsafe { handle.as_ref() };
    let log = |level: LogLevel, message: &str| {
        if let Some(ctx) = context {
            ctx.log(level, message);
        }
    };

    let raw: RawEmojiStatus = match serde_json::from_str(json_str) {
        Ok(raw) => raw,
        Err(e) => {
            let err = Error::from(e);
            log(LogLevel::Error, &format!("Failed to decode emoji status: {}", err.message));
            return fail(err);
        }
    };

    match EmojiStatus::parse(context.map(Context::client_ref), &raw) {
        Some(status) => {
            log(
                LogLevel::Debug,
                &format!(
                    "Parsed {} with custom emoji {}",
                    raw.constructor(),
                    status.custom_emoji_id
                ),
            );
            json_to_c_string(&status).unwrap_or_else(fail)
        }
        None => {
            log(
                LogLevel::Debug,
                &format!("No emoji status in {}", raw.constructor()),
            );
            std::ptr::null_mut()
        }
    }
}

/// FFI function: Convert an EmojiStatus to its raw Telegram form
/// handle: optional context used for logging
/// status_json: JSON string representing the EmojiStatus
/// Returns a JSON string of the raw constructor to send
/// The caller must free the returned string using emojistatus_free_string()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn emojistatus_write(handle: ContextHandle, status_json: *const c_char) -> *mut c_char {
    error::clear_last_error();

    if status_json.is_null() {
        return fail(Error::null_pointer());
    }

    let json_str = match unsafe { borrow_c_str(status_json) } {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let context = unsafe { handle.as_ref() };

    let status: EmojiStatus = match serde_json::from_str(json_str) {
        Ok(status) => status,
        Err(e) => return fail(Error::from(e)),
    };

    if let Some(ctx) = context {
        if status.has_dropped_collectible_fields() {
            ctx.log(
                LogLevel::Warning,
                &format!(
                    "Emoji status {} has collectible fields but no collectible_id; sending plain emojiStatus",
                    status.custom_emoji_id
                ),
            );
        }

        let missing = status.missing_collectible_fields();
        if !missing.is_empty() {
            ctx.log(
                LogLevel::Warning,
                &format!(
                    "Collectible emoji status {} is missing {}; sending empty values",
                    status.custom_emoji_id,
                    missing.join(", ")
                ),
            );
        }

        if status.until_date_saturates() {
            ctx.log(
                LogLevel::Warning,
                &format!(
                    "Emoji status {} until_date is outside the 32-bit timestamp range; sending the nearest representable date",
                    status.custom_emoji_id
                ),
            );
        }
    }

    let raw = status.write();
    if let Some(ctx) = context {
        ctx.log(LogLevel::Debug, &format!("Writing {}", raw.constructor()));
    }

    json_to_c_string(&raw).unwrap_or_else(fail)
}

/// FFI function: Get the raw Telegram emoji status that clears a user's status
/// Returns a JSON string that must be freed with emojistatus_free_string()
#[no_mangle]
pub extern "C" fn emojistatus_write_empty() -> *mut c_char {
    error::clear_last_error();
    json_to_c_string(&write_emoji_status(None)).unwrap_or_else(fail)
}
