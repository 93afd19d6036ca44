//! Notification types
//!
//! The wire format is a flat object keyed by a string `type`. Decoding goes
//! through [`NotificationRecord`] so that unknown kinds and missing optional
//! fields never fail a whole notification list.

use super::Id;
use serde::{Deserialize, Serialize};

/// Name shown when the backend omits `match_name`
pub const DEFAULT_MATCH_NAME: &str = "Someone";

/// A notification as received from `/api/notifications`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NotificationRecord", into = "NotificationRecord")]
pub struct Notification {
    /// Server-assigned identity, if the backend provides one
    pub id: Option<Id>,
    /// Creation time as sent by the server (ISO 8601)
    pub timestamp: String,
    /// Kind-specific payload
    pub kind: NotificationKind,
}

/// Notification kinds, each carrying only the fields relevant to it
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationKind {
    NewMessage {
        conversation_id: Option<Id>,
        match_name: String,
        /// Who sent the message (`user` or `match`)
        sender: Option<String>,
        /// Truncated message content
        content_preview: Option<String>,
    },
    NewMatch {
        match_id: Option<Id>,
        match_name: String,
    },
    ConversationInactive {
        conversation_id: Option<Id>,
        match_name: String,
    },
    SuggestedResponse {
        conversation_id: Option<Id>,
        match_name: String,
    },
    /// Any tag this client does not know about
    Unknown { kind: String },
}

impl NotificationKind {
    /// Wire tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            NotificationKind::NewMessage { .. } => "new_message",
            NotificationKind::NewMatch { .. } => "new_match",
            NotificationKind::ConversationInactive { .. } => "conversation_inactive",
            NotificationKind::SuggestedResponse { .. } => "suggested_response",
            NotificationKind::Unknown { kind } => kind,
        }
    }

    pub fn match_name(&self) -> Option<&str> {
        match self {
            NotificationKind::NewMessage { match_name, .. }
            | NotificationKind::NewMatch { match_name, .. }
            | NotificationKind::ConversationInactive { match_name, .. }
            | NotificationKind::SuggestedResponse { match_name, .. } => Some(match_name),
            NotificationKind::Unknown { .. } => None,
        }
    }

    pub fn conversation_id(&self) -> Option<&Id> {
        match self {
            NotificationKind::NewMessage { conversation_id, .. }
            | NotificationKind::ConversationInactive { conversation_id, .. }
            | NotificationKind::SuggestedResponse { conversation_id, .. } => {
                conversation_id.as_ref()
            }
            _ => None,
        }
    }
}

impl Notification {
    pub fn new(kind: NotificationKind, timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp: timestamp.into(),
            kind,
        }
    }

    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn new_message(
        conversation_id: impl Into<Id>,
        match_name: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::new(
            NotificationKind::NewMessage {
                conversation_id: Some(conversation_id.into()),
                match_name: match_name.to_string(),
                sender: None,
                content_preview: None,
            },
            timestamp,
        )
    }

    pub fn new_match(match_id: impl Into<Id>, match_name: &str, timestamp: impl Into<String>) -> Self {
        Self::new(
            NotificationKind::NewMatch {
                match_id: Some(match_id.into()),
                match_name: match_name.to_string(),
            },
            timestamp,
        )
    }

    pub fn conversation_inactive(
        conversation_id: impl Into<Id>,
        match_name: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::new(
            NotificationKind::ConversationInactive {
                conversation_id: Some(conversation_id.into()),
                match_name: match_name.to_string(),
            },
            timestamp,
        )
    }

    pub fn suggested_response(
        conversation_id: impl Into<Id>,
        match_name: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::new(
            NotificationKind::SuggestedResponse {
                conversation_id: Some(conversation_id.into()),
                match_name: match_name.to_string(),
            },
            timestamp,
        )
    }
}

/// Flat wire representation of a notification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NotificationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conversation_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_preview: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<NotificationRecord> for Notification {
    fn from(record: NotificationRecord) -> Self {
        let match_name = record
            .match_name
            .unwrap_or_else(|| DEFAULT_MATCH_NAME.to_string());

        let kind = match record.kind.as_str() {
            "new_message" => NotificationKind::NewMessage {
                conversation_id: record.conversation_id,
                match_name,
                sender: record.sender,
                content_preview: record.content_preview,
            },
            "new_match" => NotificationKind::NewMatch {
                match_id: record.match_id,
                match_name,
            },
            "conversation_inactive" => NotificationKind::ConversationInactive {
                conversation_id: record.conversation_id,
                match_name,
            },
            "suggested_response" => NotificationKind::SuggestedResponse {
                conversation_id: record.conversation_id,
                match_name,
            },
            _ => NotificationKind::Unknown { kind: record.kind },
        };

        Notification {
            id: record.id,
            timestamp: record.timestamp.unwrap_or_default(),
            kind,
        }
    }
}

impl From<Notification> for NotificationRecord {
    fn from(notification: Notification) -> Self {
        let mut record = NotificationRecord {
            id: notification.id,
            kind: notification.kind.tag().to_string(),
            timestamp: Some(notification.timestamp),
            ..Default::default()
        };

        match notification.kind {
            NotificationKind::NewMessage {
                conversation_id,
                match_name,
                sender,
                content_preview,
            } => {
                record.conversation_id = conversation_id;
                record.match_name = Some(match_name);
                record.sender = sender;
                record.content_preview = content_preview;
            }
            NotificationKind::NewMatch {
                match_id,
                match_name,
            } => {
                record.match_id = match_id;
                record.match_name = Some(match_name);
            }
            NotificationKind::ConversationInactive {
                conversation_id,
                match_name,
            }
            | NotificationKind::SuggestedResponse {
                conversation_id,
                match_name,
            } => {
                record.conversation_id = conversation_id;
                record.match_name = Some(match_name);
            }
            NotificationKind::Unknown { .. } => {}
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_new_message() {
        let json = r#"{
            "type": "new_message",
            "timestamp": "2024-05-01T10:00:00",
            "conversation_id": "c1",
            "sender": "match",
            "content_preview": "hey there...",
            "match_name": "Alex"
        }"#;

        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.timestamp, "2024-05-01T10:00:00");
        assert_eq!(n.kind.tag(), "new_message");
        assert_eq!(n.kind.match_name(), Some("Alex"));
        assert_eq!(n.kind.conversation_id(), Some(&Id::from("c1")));
        match n.kind {
            NotificationKind::NewMessage { content_preview, .. } => {
                assert_eq!(content_preview.as_deref(), Some("hey there..."));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_decode_new_match_with_numeric_id() {
        let json = r#"{"type": "new_match", "match_id": 12, "match_name": "Sam", "timestamp": "t"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(
            n.kind,
            NotificationKind::NewMatch {
                match_id: Some(Id::from("12")),
                match_name: "Sam".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let json = r#"{"type": "profile_viewed", "timestamp": "t"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(
            n.kind,
            NotificationKind::Unknown {
                kind: "profile_viewed".to_string()
            }
        );
        assert_eq!(n.kind.match_name(), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let n: Notification = serde_json::from_str(r#"{"type": "conversation_inactive"}"#).unwrap();
        assert_eq!(n.timestamp, "");
        assert_eq!(n.kind.match_name(), Some(DEFAULT_MATCH_NAME));
        assert_eq!(n.kind.conversation_id(), None);
    }

    #[test]
    fn test_encode_keeps_wire_shape() {
        let n = Notification::suggested_response("c9", "Jo", "2024-01-01T00:00:00").with_id(3u64);
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "suggested_response");
        assert_eq!(value["conversation_id"], "c9");
        assert_eq!(value["id"], "3");
        assert!(value.get("match_id").is_none());
    }
}
