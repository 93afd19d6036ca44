//! Periodic pollers
//!
//! Both pollers own a tokio task and are stopped through their handle.
//! Stopping aborts the task together with any fetch still in flight.

use super::messages::{apply_new_messages, fetch_new_messages};
use super::notifications::{apply_notifications, fetch_notifications};
use crate::api::Backend;
use crate::model::{Id, Watermark};
use crate::surface::Surface;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Orders concurrent responses of the same endpoint.
///
/// Each request takes a ticket from [`SequenceGate::issue`]; a response is
/// applied only if its ticket is newer than every ticket applied before it.
#[derive(Debug, Default)]
pub struct SequenceGate {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for the next request (starts at 1)
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim the right to apply the response for `ticket`.
    /// Returns false if a newer response was already applied.
    pub fn admit(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }

    /// Newest ticket applied so far (0 if none)
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }
}

/// Handle of a running [`NotificationPoller`]
pub struct PollerHandle {
    task: JoinHandle<()>,
    gate: Arc<SequenceGate>,
}

impl PollerHandle {
    /// Cancel the poller and any in-flight fetch
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Number of fetches started so far
    pub fn polls_started(&self) -> u64 {
        self.gate.issued.load(Ordering::SeqCst)
    }
}

/// Polls notifications at a fixed period, first tick immediately.
///
/// A slow response does not hold back the next tick, so fetches may overlap.
/// Responses are applied newest-ticket-wins: one that arrives after a newer
/// response has been applied is discarded.
pub struct NotificationPoller<B, S> {
    backend: Arc<B>,
    surface: Arc<RwLock<S>>,
    period: Duration,
    gate: Arc<SequenceGate>,
}

impl<B, S> NotificationPoller<B, S>
where
    B: Backend + 'static,
    S: Surface + 'static,
{
    pub fn new(backend: Arc<B>, surface: Arc<RwLock<S>>, period: Duration) -> Self {
        Self {
            backend,
            surface,
            period,
            gate: Arc::new(SequenceGate::new()),
        }
    }

    /// Start polling. Returns `None` when the surface has no badge to update.
    pub async fn start(self) -> Option<PollerHandle> {
        if !self.surface.read().await.has_notification_badge() {
            tracing::debug!("No notification badge, notification polling disabled");
            return None;
        }

        tracing::info!(period_secs = self.period.as_secs(), "Starting notification polling");

        let gate = Arc::clone(&self.gate);
        let task = tokio::spawn(self.run());
        Some(PollerHandle { task, gate })
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.period);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let ticket = self.gate.issue();
                    let backend = Arc::clone(&self.backend);
                    let surface = Arc::clone(&self.surface);
                    let gate = Arc::clone(&self.gate);

                    in_flight.spawn(async move {
                        let result = fetch_notifications(backend.as_ref()).await;

                        let mut surface = surface.write().await;
                        if result.is_ok() && !gate.admit(ticket) {
                            tracing::debug!(ticket, "Discarding stale notification response");
                            return;
                        }
                        apply_notifications(&mut *surface, result);
                    });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "Notification poll task failed");
                    }
                }
            }
        }
    }
}

/// Handle of a running [`MessageFollower`]
pub struct FollowerHandle {
    task: JoinHandle<()>,
    watermark: watch::Receiver<Watermark>,
}

impl FollowerHandle {
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Current watermark of the followed conversation
    pub fn watermark(&self) -> Watermark {
        self.watermark.borrow().clone()
    }

    /// Receiver notified every time the watermark advances
    pub fn subscribe(&self) -> watch::Receiver<Watermark> {
        self.watermark.clone()
    }
}

/// Polls one conversation for new messages at a fixed period.
///
/// Polls never overlap: a tick that comes due while a poll is still running
/// is skipped. The watermark returned by each poll is the input of the next.
pub struct MessageFollower<B, S> {
    backend: Arc<B>,
    surface: Arc<RwLock<S>>,
    conversation_id: Id,
    watermark: Watermark,
    period: Duration,
}

impl<B, S> MessageFollower<B, S>
where
    B: Backend + 'static,
    S: Surface + 'static,
{
    pub fn new(
        backend: Arc<B>,
        surface: Arc<RwLock<S>>,
        conversation_id: Id,
        watermark: Watermark,
        period: Duration,
    ) -> Self {
        Self {
            backend,
            surface,
            conversation_id,
            watermark,
            period,
        }
    }

    pub fn start(self) -> FollowerHandle {
        let (tx, rx) = watch::channel(self.watermark.clone());

        tracing::info!(
            conversation = %self.conversation_id,
            since = %self.watermark,
            "Following conversation"
        );

        let task = tokio::spawn(self.run(tx));
        FollowerHandle {
            task,
            watermark: rx,
        }
    }

    async fn run(self, tx: watch::Sender<Watermark>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut watermark = self.watermark;

        loop {
            ticker.tick().await;

            let result =
                fetch_new_messages(self.backend.as_ref(), &self.conversation_id, &watermark).await;

            let next = {
                let mut surface = self.surface.write().await;
                apply_new_messages(&mut *surface, &watermark, result)
            };

            if next != watermark {
                watermark = next;
                tx.send_replace(watermark.clone());
            }
        }
    }
}
