/// Platform-specific object models
///
/// Each platform module provides the raw API objects of that service and
/// their conversion to the platform-agnostic types.

pub mod telegram;
