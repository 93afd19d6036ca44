//! Transient alert banners shown in `#alert-container`

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Banner text for transport and decode failures of user actions
pub const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Danger => "danger",
            AlertLevel::Warning => "warning",
            AlertLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub level: AlertLevel,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            shown_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Danger, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_get_distinct_ids() {
        let a = Alert::success("Monitoring started");
        let b = Alert::success("Monitoring started");
        assert_ne!(a.id, b.id);
        assert_eq!(a.level.as_str(), "success");
        assert_eq!(Alert::danger("x").level, AlertLevel::Danger);
    }
}
