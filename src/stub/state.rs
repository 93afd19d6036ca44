//! Stub state
//!
//! Shared in-memory backend state. Cloning is cheap; all clones see the
//! same data.

use crate::api::{Backend, ClientResult, MessagesResponse, MonitorResponse, NotificationsResponse};
use crate::model::{Id, Message, MonitorAction, Notification, Watermark};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// How many notifications `/api/notifications` returns
pub const NOTIFICATION_HISTORY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct StubState {
    inner: Arc<RwLock<StubData>>,
    csrf_token: Option<Arc<str>>,
}

#[derive(Default)]
struct StubData {
    authenticated: bool,
    next_notification_id: u64,
    notifications: Vec<Notification>,
    conversations: HashMap<Id, Vec<Message>>,
    monitored: HashSet<Id>,
}

impl Default for StubState {
    fn default() -> Self {
        Self::new()
    }
}

impl StubState {
    /// Empty, authenticated backend
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StubData {
                authenticated: true,
                ..Default::default()
            })),
            csrf_token: None,
        }
    }

    /// Require `X-CSRFToken: token` on monitor requests
    pub fn with_csrf_token(mut self, token: &str) -> Self {
        self.csrf_token = Some(Arc::from(token));
        self
    }

    pub(crate) fn csrf_matches(&self, token: Option<&str>) -> bool {
        match &self.csrf_token {
            Some(expected) => token == Some(expected.as_ref()),
            None => true,
        }
    }

    /// Simulate an expired session: every endpoint answers "Not authenticated"
    pub async fn set_authenticated(&self, authenticated: bool) {
        self.inner.write().await.authenticated = authenticated;
    }

    /// Record a notification, assigning an id if it has none
    pub async fn push_notification(&self, mut notification: Notification) {
        let mut data = self.inner.write().await;
        data.next_notification_id += 1;
        if notification.id.is_none() {
            notification.id = Some(Id::from(data.next_notification_id));
        }
        data.notifications.push(notification);
    }

    /// Drop every recorded notification
    pub async fn clear_notifications(&self) {
        self.inner.write().await.notifications.clear();
    }

    /// Append a message to a conversation
    pub async fn push_message(&self, conversation_id: &Id, message: Message) {
        self.inner
            .write()
            .await
            .conversations
            .entry(conversation_id.clone())
            .or_default()
            .push(message);
    }

    pub async fn is_monitored(&self, conversation_id: &Id) -> bool {
        self.inner.read().await.monitored.contains(conversation_id)
    }

    /// The most recent notifications, oldest first
    pub async fn notifications_response(&self) -> NotificationsResponse {
        let data = self.inner.read().await;
        if !data.authenticated {
            return NotificationsResponse::failure("Not authenticated");
        }

        let skip = data
            .notifications
            .len()
            .saturating_sub(NOTIFICATION_HISTORY_LIMIT);
        NotificationsResponse::ok(data.notifications[skip..].to_vec())
    }

    /// Messages of a conversation with `sent_at` strictly after `since`,
    /// in `sent_at` order
    pub async fn messages_since(&self, conversation_id: &Id, since: &Watermark) -> MessagesResponse {
        let data = self.inner.read().await;
        if !data.authenticated {
            return MessagesResponse::failure("Not authenticated");
        }

        let mut messages: Vec<Message> = data
            .conversations
            .get(conversation_id)
            .map(|all| {
                all.iter()
                    .filter(|m| since.is_behind(&m.sent_at))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        MessagesResponse::ok(messages)
    }

    /// Apply a raw `action` form value
    pub async fn monitor(&self, conversation_id: &Id, action: &str) -> MonitorResponse {
        let mut data = self.inner.write().await;
        if !data.authenticated {
            return MonitorResponse::failure("Not authenticated");
        }

        match action.parse::<MonitorAction>() {
            Ok(MonitorAction::Start) => {
                if data.monitored.insert(conversation_id.clone()) {
                    tracing::info!(conversation = %conversation_id, "Monitoring started");
                    MonitorResponse::ok("Monitoring started")
                } else {
                    MonitorResponse::failure("Failed to start monitoring")
                }
            }
            Ok(MonitorAction::Stop) => {
                if data.monitored.remove(conversation_id) {
                    tracing::info!(conversation = %conversation_id, "Monitoring stopped");
                    MonitorResponse::ok("Monitoring stopped")
                } else {
                    MonitorResponse::failure("Failed to stop monitoring")
                }
            }
            Err(_) => MonitorResponse::failure("Invalid action"),
        }
    }
}

#[async_trait]
impl Backend for StubState {
    async fn notifications(&self) -> ClientResult<NotificationsResponse> {
        Ok(self.notifications_response().await)
    }

    async fn check_messages(
        &self,
        conversation_id: &Id,
        since: &Watermark,
    ) -> ClientResult<MessagesResponse> {
        Ok(self.messages_since(conversation_id, since).await)
    }

    async fn set_monitoring(
        &self,
        conversation_id: &Id,
        action: MonitorAction,
    ) -> ClientResult<MonitorResponse> {
        Ok(self.monitor(conversation_id, action.as_str()).await)
    }
}
