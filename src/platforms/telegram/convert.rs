use chrono::{DateTime, Utc};

use crate::context::ClientRef;
use crate::types::EmojiStatus;

use super::types::{RawCollectibleEmojiStatus, RawEmojiStatus, RawPlainEmojiStatus};

/// Convert an optional Telegram timestamp (seconds since epoch) to DateTime<Utc>
///
/// An absent timestamp stays absent; it never becomes the epoch.
pub fn timestamp_to_datetime(timestamp: Option<i32>) -> Option<DateTime<Utc>> {
    timestamp.and_then(|ts| DateTime::from_timestamp(i64::from(ts), 0))
}

/// Convert an optional DateTime<Utc> to a Telegram timestamp
///
/// Sub-second precision is truncated and dates outside the 32-bit range saturate.
pub fn datetime_to_timestamp(datetime: Option<DateTime<Utc>>) -> Option<i32> {
    datetime.map(|dt| dt.timestamp().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl EmojiStatus {
    /// Whether `until_date` lies outside the 32-bit timestamp range and will
    /// be saturated when written
    pub fn until_date_saturates(&self) -> bool {
        self.until_date
            .is_some_and(|dt| i32::try_from(dt.timestamp()).is_err())
    }

    /// Build an EmojiStatus from a raw Telegram emoji status
    ///
    /// Returns `None` for `emojiStatusEmpty` and any constructor that does not
    /// describe a displayable status; callers treat that as "no emoji status".
    pub fn parse(client: Option<ClientRef>, raw: &RawEmojiStatus) -> Option<EmojiStatus> {
        let status = match raw {
            RawEmojiStatus::EmojiStatus(plain) => EmojiStatus {
                until_date: timestamp_to_datetime(plain.until),
                ..EmojiStatus::new(plain.document_id)
            },
            RawEmojiStatus::Collectible(c) => EmojiStatus {
                client: None,
                custom_emoji_id: c.document_id,
                until_date: timestamp_to_datetime(c.until),
                title: Some(c.title.clone()),
                collectible_id: Some(c.collectible_id),
                name: Some(c.slug.clone()),
                pattern_custom_emoji_id: Some(c.pattern_document_id),
                center_color: Some(c.center_color),
                edge_color: Some(c.edge_color),
                pattern_color: Some(c.pattern_color),
                text_color: Some(c.text_color),
            },
            RawEmojiStatus::Empty
            | RawEmojiStatus::InputCollectible(_)
            | RawEmojiStatus::Unsupported => return None,
        };

        Some(EmojiStatus { client, ..status })
    }

    /// Convert to the raw Telegram emoji status for outgoing requests
    ///
    /// A status with a non-zero `collectible_id` becomes `emojiStatusCollectible`,
    /// anything else becomes a plain `emojiStatus` and its collectible-only
    /// fields are not sent.
    pub fn write(&self) -> RawEmojiStatus {
        let until = datetime_to_timestamp(self.until_date);

        match self.collectible_id {
            Some(collectible_id) if collectible_id != 0 => {
                RawEmojiStatus::Collectible(RawCollectibleEmojiStatus {
                    collectible_id,
                    document_id: self.custom_emoji_id,
                    title: self.title.clone().unwrap_or_default(),
                    slug: self.name.clone().unwrap_or_default(),
                    pattern_document_id: self.pattern_custom_emoji_id.unwrap_or_default(),
                    center_color: self.center_color.unwrap_or_default(),
                    edge_color: self.edge_color.unwrap_or_default(),
                    pattern_color: self.pattern_color.unwrap_or_default(),
                    text_color: self.text_color.unwrap_or_default(),
                    until,
                })
            }
            _ => RawEmojiStatus::EmojiStatus(RawPlainEmojiStatus {
                document_id: self.custom_emoji_id,
                until,
            }),
        }
    }
}

/// Convert our EmojiStatus to the raw Telegram emoji status
impl From<&EmojiStatus> for RawEmojiStatus {
    fn from(status: &EmojiStatus) -> Self {
        status.write()
    }
}

/// Raw emoji status to send when setting a user's status
///
/// `None` clears the status with `emojiStatusEmpty`.
pub fn write_emoji_status(status: Option<&EmojiStatus>) -> RawEmojiStatus {
    status.map_or(RawEmojiStatus::Empty, EmojiStatus::write)
}
