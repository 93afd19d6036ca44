//! Scripted backend for sync tests

use crate::api::{
    Backend, ClientError, ClientResult, MessagesResponse, MonitorResponse, NotificationsResponse,
};
use crate::model::{Id, MonitorAction, Watermark};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted answer
pub(crate) enum Reply<T> {
    Ok(T),
    /// Answer after a delay
    Delayed(Duration, T),
    /// Connection failure
    Unavailable,
    /// Body that is not the expected JSON
    Malformed,
}

impl<T> Reply<T> {
    async fn resolve(self) -> ClientResult<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Delayed(delay, value) => {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
            Reply::Unavailable => Err(ClientError::Unavailable),
            Reply::Malformed => Err(ClientError::Decode("expected value at line 1".to_string())),
        }
    }
}

/// Backend answering from per-endpoint queues. Once a queue is empty,
/// notifications and messages answer with empty success envelopes and
/// monitor requests fail.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    notifications: Mutex<VecDeque<Reply<NotificationsResponse>>>,
    messages: Mutex<VecDeque<Reply<MessagesResponse>>>,
    monitor: Mutex<VecDeque<Reply<MonitorResponse>>>,
    notification_calls: Mutex<usize>,
    watermarks_seen: Mutex<Vec<Watermark>>,
    messages_in_flight: AtomicUsize,
    max_messages_in_flight: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script_notifications(&self, replies: Vec<Reply<NotificationsResponse>>) {
        self.notifications.lock().unwrap().extend(replies);
    }

    pub(crate) fn script_messages(&self, replies: Vec<Reply<MessagesResponse>>) {
        self.messages.lock().unwrap().extend(replies);
    }

    pub(crate) fn script_monitor(&self, replies: Vec<Reply<MonitorResponse>>) {
        self.monitor.lock().unwrap().extend(replies);
    }

    pub(crate) fn notification_calls(&self) -> usize {
        *self.notification_calls.lock().unwrap()
    }

    /// Watermarks sent with each `check_messages` call
    pub(crate) fn watermarks_seen(&self) -> Vec<Watermark> {
        self.watermarks_seen.lock().unwrap().clone()
    }

    /// `check_messages` calls currently awaiting their reply
    pub(crate) fn messages_in_flight(&self) -> usize {
        self.messages_in_flight.load(Ordering::SeqCst)
    }

    /// Most `check_messages` calls ever awaiting a reply at once
    pub(crate) fn max_messages_in_flight(&self) -> usize {
        self.max_messages_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn notifications(&self) -> ClientResult<NotificationsResponse> {
        *self.notification_calls.lock().unwrap() += 1;
        let reply = self.notifications.lock().unwrap().pop_front();
        reply
            .unwrap_or_else(|| Reply::Ok(NotificationsResponse::ok(Vec::new())))
            .resolve()
            .await
    }

    async fn check_messages(
        &self,
        _conversation_id: &Id,
        since: &Watermark,
    ) -> ClientResult<MessagesResponse> {
        self.watermarks_seen.lock().unwrap().push(since.clone());
        let reply = self.messages.lock().unwrap().pop_front();

        let in_flight = self.messages_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_messages_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        let result = reply
            .unwrap_or_else(|| Reply::Ok(MessagesResponse::ok(Vec::new())))
            .resolve()
            .await;
        self.messages_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn set_monitoring(
        &self,
        _conversation_id: &Id,
        _action: MonitorAction,
    ) -> ClientResult<MonitorResponse> {
        let reply = self.monitor.lock().unwrap().pop_front();
        reply.unwrap_or(Reply::Unavailable).resolve().await
    }
}
