//! Backend API
//!
//! The three endpoints of the assistant backend the client depends on:
//!
//! - `GET /api/notifications` - Current notification list
//! - `GET /api/check_messages/:conversation_id?last_timestamp=` - Messages newer than a watermark
//! - `POST /monitor/:conversation_id` - Start or stop conversation monitoring
//!
//! [`Backend`] is the seam between the sync logic and transport. [`HttpBackend`]
//! talks to a real server; the contract stub in [`crate::stub`] implements the
//! same trait in-process.

mod client;
pub mod dto;
mod error;

pub use client::{HttpBackend, CSRF_HEADER};
pub use dto::{MessagesResponse, MonitorResponse, NotificationsResponse};
pub use error::{ClientError, ClientResult};

use crate::model::{Id, MonitorAction, Watermark};
use async_trait::async_trait;

/// Request/response access to the assistant backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the current notification list
    async fn notifications(&self) -> ClientResult<NotificationsResponse>;

    /// Fetch messages of a conversation strictly newer than `since`
    async fn check_messages(
        &self,
        conversation_id: &Id,
        since: &Watermark,
    ) -> ClientResult<MessagesResponse>;

    /// Ask the server to start or stop monitoring a conversation
    async fn set_monitoring(
        &self,
        conversation_id: &Id,
        action: MonitorAction,
    ) -> ClientResult<MonitorResponse>;
}
