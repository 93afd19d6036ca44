//! Conversation messages

use super::Id;
use serde::{Deserialize, Serialize};

/// A chat message returned by `/api/check_messages/{conversation}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Empty when the backend omits it
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender_type: SenderType,
    /// String-comparable ISO 8601 timestamp
    #[serde(default)]
    pub sent_at: String,
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    User,
    Match,
    #[default]
    #[serde(other)]
    Other,
}

impl SenderType {
    /// CSS class of the message block; anything but `user` renders as the match
    pub fn css_class(&self) -> &'static str {
        match self {
            SenderType::User => "message-user",
            SenderType::Match | SenderType::Other => "message-match",
        }
    }
}

impl Message {
    pub fn new(
        id: impl Into<Id>,
        content: impl Into<String>,
        sender_type: SenderType,
        sent_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender_type,
            sent_at: sent_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message() {
        let json = r#"{"id": "m1", "content": "hi", "sender_type": "user", "sent_at": "2024-05-01T10:00:00"}"#;
        let m: Message = serde_json::from_str(json).unwrap();
        assert_eq!(m.id.as_str(), "m1");
        assert_eq!(m.sender_type, SenderType::User);
        assert_eq!(m.sender_type.css_class(), "message-user");
    }

    #[test]
    fn test_unknown_sender_renders_as_match() {
        let json = r#"{"id": 4, "content": "x", "sender_type": "bot", "sent_at": "t"}"#;
        let m: Message = serde_json::from_str(json).unwrap();
        assert_eq!(m.sender_type, SenderType::Other);
        assert_eq!(m.sender_type.css_class(), "message-match");
    }

    #[test]
    fn test_missing_id_does_not_reject_batch() {
        let json = r#"[
            {"content": "no id", "sender_type": "match", "sent_at": "T2"},
            {"id": null, "content": "null id", "sent_at": "T3"},
            {"id": 7, "content": "fine", "sender_type": "user", "sent_at": "T4"}
        ]"#;
        let batch: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].id.as_str(), "");
        assert_eq!(batch[1].id.as_str(), "");
        assert_eq!(batch[2].id.as_str(), "7");
        assert_eq!(batch[0].sent_at, "T2");
    }
}
