//! Terminal surface for the CLI

use super::Surface;
use crate::model::{Message, MonitorButton, Notification, SenderType, Watermark};
use crate::present::{notification_link, notification_text, relative_age, Alert, AlertLevel};
use chrono::Utc;
use std::io::Write;

/// Writes page updates as plain lines
pub struct TerminalSurface<W: Write + Send + Sync> {
    out: W,
    bell: bool,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + Sync> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, bell: true }
    }

    /// Ring the terminal bell for new messages (on by default)
    pub fn bell(mut self, enabled: bool) -> Self {
        self.bell = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send + Sync> Surface for TerminalSurface<W> {
    fn set_notification_count(&mut self, count: usize) {
        let plural = if count == 1 { "" } else { "s" };
        self.line(&format!("[{}] notification{}", count, plural));
    }

    fn replace_notifications(&mut self, notifications: &[Notification]) {
        let now = Utc::now();
        for n in notifications {
            let text = notification_text(&n.kind);
            let age = relative_age(&n.timestamp, now);
            self.line(&format!("  * {} ({})  {}", text, age, notification_link(&n.kind)));
        }
    }

    fn append_message(&mut self, message: &Message) {
        let who = match message.sender_type {
            SenderType::User => "you",
            SenderType::Match | SenderType::Other => "them",
        };
        let age = relative_age(&message.sent_at, Utc::now());
        self.line(&format!("[{}] {}: {}", age, who, message.content));
    }

    fn scroll_messages_to_end(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "Failed to flush terminal");
        }
    }

    fn set_last_timestamp(&mut self, watermark: &Watermark) {
        tracing::debug!(watermark = %watermark, "Watermark advanced");
    }

    fn play_notification_sound(&mut self) {
        if self.bell {
            if let Err(e) = write!(self.out, "\x07").and_then(|_| self.out.flush()) {
                tracing::warn!(error = %e, "Failed to ring terminal bell");
            }
        }
    }

    fn show_alert(&mut self, alert: Alert) {
        let marker = match alert.level {
            AlertLevel::Success => "ok",
            AlertLevel::Danger => "error",
            AlertLevel::Warning => "warning",
            AlertLevel::Info => "info",
        };
        self.line(&format!("{}: {}", marker, alert.message));
    }

    fn update_monitor_button(&mut self, button: &MonitorButton) {
        self.line(&format!(
            "conversation {} -> next action: {}",
            button.conversation_id,
            button.label()
        ));
    }
}
