//! Response envelopes
//!
//! Every endpoint answers `{success, ...}`. Failure envelopes carry only
//! `success: false` and a `message`, so every other field defaults.

use super::{ClientError, ClientResult};
use crate::model::{Message, Notification};
use serde::{Deserialize, Serialize};

/// `GET /api/notifications`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /api/check_messages/:conversation_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `POST /monitor/:conversation_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /monitor/:conversation_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorForm {
    #[serde(default)]
    pub action: Option<String>,
}

fn rejected(message: Option<String>) -> ClientError {
    ClientError::Rejected {
        message: message.unwrap_or_else(|| "Request was not successful".to_string()),
    }
}

impl NotificationsResponse {
    pub fn ok(notifications: Vec<Notification>) -> Self {
        Self {
            success: true,
            count: notifications.len(),
            notifications,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Turn a `success: false` envelope into an error
    pub fn accepted(self) -> ClientResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(rejected(self.message))
        }
    }
}

impl MessagesResponse {
    pub fn ok(messages: Vec<Message>) -> Self {
        Self {
            success: true,
            count: messages.len(),
            messages,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn accepted(self) -> ClientResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(rejected(self.message))
        }
    }
}

impl MonitorResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn accepted(self) -> ClientResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ClientError::Rejected {
                message: self.message,
            })
        }
    }
}
