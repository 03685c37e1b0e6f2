//! Telegram platform adapter
//!
//! Raw Telegram API objects and their conversion to the library's types.
//! Binary TL encoding and transport are handled by the caller; objects
//! arrive here already decoded, as values or as JSON.

mod convert;
mod types;

pub use convert::{datetime_to_timestamp, timestamp_to_datetime, write_emoji_status};
pub use types::*;
