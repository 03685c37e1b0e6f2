//! Core types for libemojistatus
//!
//! This module contains platform-agnostic types produced by the platform adapters.

pub mod emoji_status;

// Re-export for convenience
pub use emoji_status::EmojiStatus;
