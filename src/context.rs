//! Client context and opaque handle management
//!
//! A `Context` stands in for the client session that owns parsed objects.
//! It is boxed and passed to C as an opaque pointer, carries the session's
//! configuration and log callback, and hands out `ClientRef`s that tie a
//! parsed `EmojiStatus` back to the session without owning it.

use std::collections::HashMap;
use std::fmt;
use std::os::raw::c_void;
use std::sync::Arc;

/// Log levels for callbacks
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

/// Callback function type for logging
/// Parameters: level, message, user_data
pub type LogCallback = extern "C" fn(LogLevel, *const std::os::raw::c_char, *mut c_void);

/// Non-owning reference from a parsed object back to the client session
/// that produced it.
///
/// Holds only the session identifier, so objects may outlive the `Context`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientRef(Arc<str>);

impl ClientRef {
    pub fn new(id: impl AsRef<str>) -> Self {
        ClientRef(Arc::from(id.as_ref()))
    }

    /// Identifier of the session this reference points to
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientRef({:?})", self.id())
    }
}

/// A client session context
///
/// This is a Rust struct that will be exposed as an opaque handle through FFI
pub struct Context {
    /// User-defined identifier for this context
    pub id: String,
    /// Configuration options
    pub config: HashMap<String, String>,
    /// Optional log callback
    log_callback: Option<LogCallback>,
    /// User data passed to callbacks
    user_data: *mut c_void,
}

impl Context {
    /// Create a new context
    pub fn new(id: impl Into<String>) -> Self {
        Context {
            id: id.into(),
            config: HashMap::new(),
            log_callback: None,
            user_data: std::ptr::null_mut(),
        }
    }

    /// Reference to this session for attaching to parsed objects
    pub fn client_ref(&self) -> ClientRef {
        ClientRef::new(&self.id)
    }

    /// Set a log callback
    pub fn set_log_callback(&mut self, callback: LogCallback, user_data: *mut c_void) {
        self.log_callback = Some(callback);
        self.user_data = user_data;
    }

    /// Clear the log callback
    pub fn clear_log_callback(&mut self) {
        self.log_callback = None;
        self.user_data = std::ptr::null_mut();
    }

    /// Log a message (internal helper)
    pub(crate) fn log(&self, level: LogLevel, message: &str) {
        if let Some(callback) = self.log_callback {
            if let Ok(c_string) = std::ffi::CString::new(message) {
                callback(level, c_string.as_ptr(), self.user_data);
            }
        }
    }

    /// Set a configuration value
    pub fn set_config(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Get a configuration value
    pub fn get_config(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::os::raw::c_char;

    #[test]
    fn test_context_config() {
        let mut ctx = Context::new("session-1");
        assert!(ctx.get_config("layer").is_none());

        ctx.set_config("layer", "195");
        assert_eq!(ctx.get_config("layer").unwrap(), "195");

        ctx.set_config("layer", "196");
        assert_eq!(ctx.get_config("layer").unwrap(), "196");
    }

    #[test]
    fn test_client_ref() {
        let ctx = Context::new("session-1");
        let client = ctx.client_ref();
        assert_eq!(client.id(), "session-1");
        assert_eq!(client, ClientRef::new("session-1"));
        assert_ne!(client, ClientRef::new("session-2"));
        assert_eq!(format!("{client:?}"), "ClientRef(\"session-1\")");
    }

    #[test]
    fn test_client_ref_outlives_context() {
        let client = {
            let ctx = Context::new("short-lived");
            ctx.client_ref()
        };
        assert_eq!(client.id(), "short-lived");
    }

    extern "C" fn collect_log(level: LogLevel, message: *const c_char, user_data: *mut c_void) {
        let sink = unsafe { &mut *(user_data as *mut Vec<(LogLevel, String)>) };
        let text = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
        sink.push((level, text));
    }

    #[test]
    fn test_log_callback() {
        let mut sink: Vec<(LogLevel, String)> = Vec::new();
        let mut ctx = Context::new("session-1");

        // No callback registered yet
        ctx.log(LogLevel::Info, "dropped");

        ctx.set_log_callback(collect_log, &mut sink as *mut _ as *mut c_void);
        ctx.log(LogLevel::Warning, "kept");
        ctx.clear_log_callback();
        ctx.log(LogLevel::Info, "dropped again");

        assert_eq!(sink, vec![(LogLevel::Warning, "kept".to_string())]);
    }
}
