//! Notification kind mappings

use crate::model::NotificationKind;

/// Bootstrap icon classes for a notification kind, `None` for unknown kinds
pub fn notification_icon(kind: &NotificationKind) -> Option<&'static str> {
    match kind {
        NotificationKind::NewMessage { .. } => Some("bi-chat-text-fill text-primary"),
        NotificationKind::NewMatch { .. } => Some("bi-person-plus-fill text-success"),
        NotificationKind::ConversationInactive { .. } => Some("bi-clock-fill text-warning"),
        NotificationKind::SuggestedResponse { .. } => Some("bi-lightbulb-fill text-info"),
        NotificationKind::Unknown { .. } => None,
    }
}

/// Page a notification links to
pub fn notification_link(kind: &NotificationKind) -> String {
    match kind {
        NotificationKind::NewMessage { conversation_id, .. }
        | NotificationKind::ConversationInactive { conversation_id, .. }
        | NotificationKind::SuggestedResponse { conversation_id, .. } => conversation_id
            .as_ref()
            .map(|id| format!("/conversation/{}", urlencoding::encode(id.as_str())))
            .unwrap_or_else(|| "#".to_string()),
        NotificationKind::NewMatch { match_id, .. } => match_id
            .as_ref()
            .map(|id| format!("/match/{}", urlencoding::encode(id.as_str())))
            .unwrap_or_else(|| "#".to_string()),
        NotificationKind::Unknown { .. } => "#".to_string(),
    }
}

/// One-line description of a notification
pub fn notification_text(kind: &NotificationKind) -> String {
    match kind {
        NotificationKind::NewMessage { match_name, .. } => format!("New message from {}", match_name),
        NotificationKind::NewMatch { match_name, .. } => format!("New match: {}", match_name),
        NotificationKind::ConversationInactive { match_name, .. } => {
            format!("Conversation with {} is inactive", match_name)
        }
        NotificationKind::SuggestedResponse { match_name, .. } => {
            format!("Suggested response for {}", match_name)
        }
        NotificationKind::Unknown { .. } => "New notification".to_string(),
    }
}
