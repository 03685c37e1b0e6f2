//! Emoji status shown next to a user's name

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ClientRef;

/// A user emoji status
///
/// A custom emoji displayed beside the user's name, optionally time-limited.
/// Collectible statuses additionally carry the collectible's title, slug and
/// color theme; for plain statuses those fields are all `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiStatus {
    /// Session this status was parsed from, if any
    #[serde(skip)]
    pub client: Option<ClientRef>,
    /// Custom emoji document id
    pub custom_emoji_id: i64,
    /// Expiry of the status; `None` means it never expires
    pub until_date: Option<DateTime<Utc>>,
    /// Title of the collectible
    pub title: Option<String>,
    /// Collectible id; a non-zero value makes this a collectible status
    pub collectible_id: Option<i64>,
    /// Slug of the collectible
    pub name: Option<String>,
    /// Custom emoji id of the background pattern
    pub pattern_custom_emoji_id: Option<i64>,
    /// Center color of the collectible emoji, RGB in decimal format
    pub center_color: Option<i32>,
    /// Edge color of the collectible emoji, RGB in decimal format
    pub edge_color: Option<i32>,
    /// Pattern color of the collectible emoji, RGB in decimal format
    pub pattern_color: Option<i32>,
    /// Text color of the collectible emoji, RGB in decimal format
    pub text_color: Option<i32>,
}

impl EmojiStatus {
    /// Create a plain, non-expiring emoji status
    pub fn new(custom_emoji_id: i64) -> Self {
        EmojiStatus {
            client: None,
            custom_emoji_id,
            until_date: None,
            title: None,
            collectible_id: None,
            name: None,
            pattern_custom_emoji_id: None,
            center_color: None,
            edge_color: None,
            pattern_color: None,
            text_color: None,
        }
    }

    /// Attach the originating client session
    pub fn with_client(mut self, client: ClientRef) -> Self {
        self.client = Some(client);
        self
    }

    /// Set expiry date
    pub fn with_until_date(mut self, until_date: DateTime<Utc>) -> Self {
        self.until_date = Some(until_date);
        self
    }

    /// Set collectible id
    pub fn with_collectible_id(mut self, collectible_id: i64) -> Self {
        self.collectible_id = Some(collectible_id);
        self
    }

    /// Set collectible title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set collectible slug
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set pattern emoji id
    pub fn with_pattern_custom_emoji_id(mut self, pattern_custom_emoji_id: i64) -> Self {
        self.pattern_custom_emoji_id = Some(pattern_custom_emoji_id);
        self
    }

    /// Set the four collectible colors
    pub fn with_colors(
        mut self,
        center_color: i32,
        edge_color: i32,
        pattern_color: i32,
        text_color: i32,
    ) -> Self {
        self.center_color = Some(center_color);
        self.edge_color = Some(edge_color);
        self.pattern_color = Some(pattern_color);
        self.text_color = Some(text_color);
        self
    }

    /// Whether this status is written out as a collectible
    ///
    /// True only for a present, non-zero `collectible_id`.
    pub fn is_collectible(&self) -> bool {
        matches!(self.collectible_id, Some(id) if id != 0)
    }

    /// Whether collectible-only fields are set on a status that is not
    /// collectible. Those fields are not part of the plain wire shape and
    /// are lost when the status is written.
    pub fn has_dropped_collectible_fields(&self) -> bool {
        !self.is_collectible()
            && (self.title.is_some()
                || self.name.is_some()
                || self.pattern_custom_emoji_id.is_some()
                || self.center_color.is_some()
                || self.edge_color.is_some()
                || self.pattern_color.is_some()
                || self.text_color.is_some())
    }

    /// Collectible-only fields left unset on a collectible status. The wire
    /// shape has no empty slot for them, so they are written as `""` or `0`.
    pub fn missing_collectible_fields(&self) -> Vec<&'static str> {
        if !self.is_collectible() {
            return Vec::new();
        }

        [
            ("title", self.title.is_none()),
            ("name", self.name.is_none()),
            ("pattern_custom_emoji_id", self.pattern_custom_emoji_id.is_none()),
            ("center_color", self.center_color.is_none()),
            ("edge_color", self.edge_color.is_none()),
            ("pattern_color", self.pattern_color.is_none()),
            ("text_color", self.text_color.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }
}

// The client reference is session context, not part of the status value
impl PartialEq for EmojiStatus {
    fn eq(&self, other: &Self) -> bool {
        self.custom_emoji_id == other.custom_emoji_id
            && self.until_date == other.until_date
            && self.title == other.title
            && self.collectible_id == other.collectible_id
            && self.name == other.name
            && self.pattern_custom_emoji_id == other.pattern_custom_emoji_id
            && self.center_color == other.center_color
            && self.edge_color == other.edge_color
            && self.pattern_color == other.pattern_color
            && self.text_color == other.text_color
    }
}

impl Eq for EmojiStatus {}
