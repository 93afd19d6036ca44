//! In-memory page
//!
//! Holds the state of every element the client binds to, with HTML rendered
//! the same way the browser page receives it.

use super::Surface;
use crate::model::{Id, Message, MonitorButton, Notification, Watermark};
use crate::present::{
    render_alert, render_message_block, render_monitor_button, render_notification_dropdown, Alert,
};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// How long an alert stays in `#alert-container`
pub const DEFAULT_ALERT_TTL: Duration = Duration::from_secs(5);

/// `#notification-badge`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub visible: bool,
}

/// One block of `#messages-container`
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub message: Message,
    pub html: String,
    /// Whether the edit form is shown instead of the message
    pub editing: bool,
    /// Contents of the edit textarea
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ShownAlert {
    alert: Alert,
    shown: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    badge: Option<Badge>,
    dropdown: Option<String>,
    messages: Vec<RenderedMessage>,
    last_timestamp: Option<Watermark>,
    scrolls: usize,
    sounds_played: usize,
    alerts: Vec<ShownAlert>,
    alert_ttl: Duration,
    monitor_buttons: HashMap<Id, MonitorButton>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A page with a hidden badge, an empty dropdown and no messages
    pub fn new() -> Self {
        Self {
            badge: Some(Badge::default()),
            dropdown: Some(String::new()),
            messages: Vec::new(),
            last_timestamp: None,
            scrolls: 0,
            sounds_played: 0,
            alerts: Vec::new(),
            alert_ttl: DEFAULT_ALERT_TTL,
            monitor_buttons: HashMap::new(),
        }
    }

    /// A page without the notification badge
    pub fn without_badge(mut self) -> Self {
        self.badge = None;
        self
    }

    /// A page with a badge but no dropdown
    pub fn without_dropdown(mut self) -> Self {
        self.dropdown = None;
        self
    }

    /// Alerts disappear once they have been shown for `ttl`
    pub fn with_alert_ttl(mut self, ttl: Duration) -> Self {
        self.alert_ttl = ttl;
        self
    }

    /// Add a `.monitor-button`
    pub fn with_monitor_button(mut self, button: MonitorButton) -> Self {
        self.monitor_buttons
            .insert(button.conversation_id.clone(), button);
        self
    }

    /// Server-rendered messages already on the page; the `#last-timestamp`
    /// field starts at the newest of them
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        let mut watermark = Watermark::empty();
        for message in messages {
            watermark.advance(&message.sent_at);
            self.push_message(&message);
        }
        self.last_timestamp = Some(watermark);
        self
    }

    fn push_message(&mut self, message: &Message) {
        self.messages.push(RenderedMessage {
            html: render_message_block(message, Utc::now()),
            draft: message.content.clone(),
            message: message.clone(),
            editing: false,
        });
    }

    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    pub fn dropdown_html(&self) -> Option<&str> {
        self.dropdown.as_deref()
    }

    pub fn messages(&self) -> &[RenderedMessage] {
        &self.messages
    }

    /// Ids of the rendered messages, in page order
    pub fn message_ids(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.message.id.as_str()).collect()
    }

    /// Contents of `#messages-container`
    pub fn messages_html(&self) -> String {
        self.messages.iter().map(|m| m.html.as_str()).collect()
    }

    pub fn last_timestamp(&self) -> Option<&Watermark> {
        self.last_timestamp.as_ref()
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    pub fn sounds_played(&self) -> usize {
        self.sounds_played
    }

    /// Alerts still on screen, oldest first
    pub fn alerts(&self) -> Vec<&Alert> {
        let now = Instant::now();
        self.alerts
            .iter()
            .filter(|shown| !self.is_expired(shown, now))
            .map(|shown| &shown.alert)
            .collect()
    }

    /// Contents of `#alert-container`
    pub fn alerts_html(&self) -> String {
        self.alerts().into_iter().map(render_alert).collect()
    }

    pub fn monitor_button(&self, conversation_id: &Id) -> Option<&MonitorButton> {
        self.monitor_buttons.get(conversation_id)
    }

    pub fn monitor_button_html(&self, conversation_id: &Id) -> Option<String> {
        self.monitor_button(conversation_id).map(render_monitor_button)
    }

    fn is_expired(&self, shown: &ShownAlert, now: Instant) -> bool {
        now.saturating_duration_since(shown.shown) >= self.alert_ttl
    }

    /// Drop alerts that outlived the alert TTL. Returns how many were removed.
    pub fn dismiss_expired_alerts(&mut self) -> usize {
        let now = Instant::now();
        let ttl = self.alert_ttl;
        let before = self.alerts.len();
        self.alerts
            .retain(|shown| now.saturating_duration_since(shown.shown) < ttl);
        before - self.alerts.len()
    }

    /// `.edit-message-button`: show the edit form seeded with the current content
    pub fn begin_edit(&mut self, message_id: &Id) -> bool {
        match self.messages.iter_mut().find(|m| &m.message.id == message_id) {
            Some(rendered) => {
                rendered.draft = rendered.message.content.clone();
                rendered.editing = true;
                true
            }
            None => false,
        }
    }

    /// `.cancel-edit-button`: hide the edit form again
    pub fn cancel_edit(&mut self, message_id: &Id) -> bool {
        match self.messages.iter_mut().find(|m| &m.message.id == message_id) {
            Some(rendered) => {
                rendered.editing = false;
                true
            }
            None => false,
        }
    }

    /// Change the edit textarea of a message in edit mode
    pub fn set_draft(&mut self, message_id: &Id, draft: impl Into<String>) -> bool {
        match self
            .messages
            .iter_mut()
            .find(|m| &m.message.id == message_id && m.editing)
        {
            Some(rendered) => {
                rendered.draft = draft.into();
                true
            }
            None => false,
        }
    }
}

impl Surface for Page {
    fn has_notification_badge(&self) -> bool {
        self.badge.is_some()
    }

    fn has_notification_dropdown(&self) -> bool {
        self.dropdown.is_some()
    }

    fn set_notification_count(&mut self, count: usize) {
        if let Some(badge) = self.badge.as_mut() {
            badge.text = count.to_string();
            badge.visible = true;
        }
    }

    fn replace_notifications(&mut self, notifications: &[Notification]) {
        if let Some(dropdown) = self.dropdown.as_mut() {
            *dropdown = render_notification_dropdown(notifications, Utc::now());
        }
    }

    fn append_message(&mut self, message: &Message) {
        self.push_message(message);
    }

    fn scroll_messages_to_end(&mut self) {
        self.scrolls += 1;
    }

    fn set_last_timestamp(&mut self, watermark: &Watermark) {
        self.last_timestamp = Some(watermark.clone());
    }

    fn play_notification_sound(&mut self) {
        self.sounds_played += 1;
    }

    fn show_alert(&mut self, alert: Alert) {
        self.dismiss_expired_alerts();
        self.alerts.push(ShownAlert {
            alert,
            shown: Instant::now(),
        });
    }

    fn update_monitor_button(&mut self, button: &MonitorButton) {
        self.monitor_buttons
            .insert(button.conversation_id.clone(), button.clone());
    }
}
