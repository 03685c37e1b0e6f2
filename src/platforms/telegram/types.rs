use serde::{Deserialize, Serialize};

/// Telegram `EmojiStatus` constructors
///
/// Tagged by the `_` field carrying the constructor name, e.g.
/// `{"_": "emojiStatus", "document_id": 42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum RawEmojiStatus {
    /// No status set - "emojiStatusEmpty"
    #[serde(rename = "emojiStatusEmpty")]
    Empty,
    /// Plain custom emoji status - "emojiStatus"
    #[serde(rename = "emojiStatus")]
    EmojiStatus(RawPlainEmojiStatus),
    /// Collectible emoji status - "emojiStatusCollectible"
    #[serde(rename = "emojiStatusCollectible")]
    Collectible(RawCollectibleEmojiStatus),
    /// Reference to an owned collectible, only sent by clients - "inputEmojiStatusCollectible"
    #[serde(rename = "inputEmojiStatusCollectible")]
    InputCollectible(RawInputCollectibleEmojiStatus),
    /// Any constructor this library does not know
    #[serde(other)]
    Unsupported,
}

impl RawEmojiStatus {
    /// Constructor name as it appears on the wire
    pub fn constructor(&self) -> &'static str {
        match self {
            RawEmojiStatus::Empty => "emojiStatusEmpty",
            RawEmojiStatus::EmojiStatus(_) => "emojiStatus",
            RawEmojiStatus::Collectible(_) => "emojiStatusCollectible",
            RawEmojiStatus::InputCollectible(_) => "inputEmojiStatusCollectible",
            RawEmojiStatus::Unsupported => "unsupported",
        }
    }
}

/// Fields of the "emojiStatus" constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlainEmojiStatus {
    pub document_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i32>,
}

/// Fields of the "emojiStatusCollectible" constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCollectibleEmojiStatus {
    pub collectible_id: i64,
    pub document_id: i64,
    pub title: String,
    pub slug: String,
    pub pattern_document_id: i64,
    pub center_color: i32,
    pub edge_color: i32,
    pub pattern_color: i32,
    pub text_color: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i32>,
}

/// Fields of the "inputEmojiStatusCollectible" constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputCollectibleEmojiStatus {
    pub collectible_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_plain() {
        let raw: RawEmojiStatus =
            serde_json::from_value(json!({"_": "emojiStatus", "document_id": 42})).unwrap();
        assert_eq!(
            raw,
            RawEmojiStatus::EmojiStatus(RawPlainEmojiStatus {
                document_id: 42,
                until: None,
            })
        );
        assert_eq!(raw.constructor(), "emojiStatus");
    }

    #[test]
    fn test_decode_collectible() {
        let raw: RawEmojiStatus = serde_json::from_value(json!({
            "_": "emojiStatusCollectible",
            "collectible_id": 7,
            "document_id": 42,
            "title": "Gold",
            "slug": "gold-7",
            "pattern_document_id": 99,
            "center_color": 16711680,
            "edge_color": 0,
            "pattern_color": 65280,
            "text_color": 16777215,
            "until": 1700000000
        }))
        .unwrap();

        match raw {
            RawEmojiStatus::Collectible(c) => {
                assert_eq!(c.collectible_id, 7);
                assert_eq!(c.slug, "gold-7");
                assert_eq!(c.until, Some(1700000000));
            }
            other => panic!("expected collectible, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_and_input() {
        let empty: RawEmojiStatus =
            serde_json::from_value(json!({"_": "emojiStatusEmpty"})).unwrap();
        assert_eq!(empty, RawEmojiStatus::Empty);

        let input: RawEmojiStatus =
            serde_json::from_value(json!({"_": "inputEmojiStatusCollectible", "collectible_id": 7}))
                .unwrap();
        assert_eq!(
            input,
            RawEmojiStatus::InputCollectible(RawInputCollectibleEmojiStatus {
                collectible_id: 7,
                until: None,
            })
        );
    }

    #[test]
    fn test_decode_unknown_constructor() {
        let raw: RawEmojiStatus =
            serde_json::from_value(json!({"_": "emojiStatusFromTheFuture", "x": 1})).unwrap();
        assert_eq!(raw, RawEmojiStatus::Unsupported);
    }

    #[test]
    fn test_decode_malformed() {
        // Known constructor with a missing required field
        let missing = serde_json::from_value::<RawEmojiStatus>(json!({"_": "emojiStatus"}));
        assert!(missing.is_err());

        // Wrong field type
        let wrong = serde_json::from_value::<RawEmojiStatus>(
            json!({"_": "emojiStatus", "document_id": "forty-two"}),
        );
        assert!(wrong.is_err());

        // No constructor tag at all
        let untagged = serde_json::from_value::<RawEmojiStatus>(json!({"document_id": 42}));
        assert!(untagged.is_err());
    }

    #[test]
    fn test_encode_omits_absent_until() {
        let raw = RawEmojiStatus::EmojiStatus(RawPlainEmojiStatus {
            document_id: 42,
            until: None,
        });
        assert_eq!(
            serde_json::to_value(&raw).unwrap(),
            json!({"_": "emojiStatus", "document_id": 42})
        );

        assert_eq!(
            serde_json::to_value(RawEmojiStatus::Empty).unwrap(),
            json!({"_": "emojiStatusEmpty"})
        );
    }
}
