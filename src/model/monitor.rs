//! Conversation monitoring toggle
//!
//! Monitoring state is owned by the server. The client keeps a mirror in
//! [`MonitorButton`], whose `action` is what the next click will request.

use super::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorAction {
    Start,
    Stop,
}

impl MonitorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorAction::Start => "start",
            MonitorAction::Stop => "stop",
        }
    }

    /// The action offered once this one has been acknowledged
    pub fn toggled(&self) -> Self {
        match self {
            MonitorAction::Start => MonitorAction::Stop,
            MonitorAction::Stop => MonitorAction::Start,
        }
    }
}

impl fmt::Display for MonitorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid monitor action: {0} (expected start or stop)")]
pub struct ParseActionError(pub String);

impl FromStr for MonitorAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(MonitorAction::Start),
            "stop" => Ok(MonitorAction::Stop),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

/// Client-side mirror of a `.monitor-button`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorButton {
    pub conversation_id: Id,
    pub action: MonitorAction,
}

impl MonitorButton {
    pub fn new(conversation_id: impl Into<Id>, action: MonitorAction) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            action,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.action {
            MonitorAction::Start => "Start Monitoring",
            MonitorAction::Stop => "Stop Monitoring",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.action {
            MonitorAction::Start => "bi-play-circle",
            MonitorAction::Stop => "bi-stop-circle",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.action {
            MonitorAction::Start => "btn-success",
            MonitorAction::Stop => "btn-danger",
        }
    }

    /// Apply a server acknowledgment of the current action
    pub fn flip(&mut self) {
        self.action = self.action.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("start".parse::<MonitorAction>().unwrap(), MonitorAction::Start);
        assert_eq!(" STOP ".parse::<MonitorAction>().unwrap(), MonitorAction::Stop);
        assert!("pause".parse::<MonitorAction>().is_err());
    }

    #[test]
    fn test_flip_changes_label_and_class() {
        let mut button = MonitorButton::new("5", MonitorAction::Start);
        assert_eq!(button.label(), "Start Monitoring");
        assert_eq!(button.css_class(), "btn-success");

        button.flip();
        assert_eq!(button.action, MonitorAction::Stop);
        assert_eq!(button.label(), "Stop Monitoring");
        assert_eq!(button.css_class(), "btn-danger");
        assert_eq!(button.icon(), "bi-stop-circle");
    }
}
