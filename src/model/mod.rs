//! Data Model
//!
//! Types exchanged with the assistant backend and the state the client
//! threads between calls.
//!
//! - [`Notification`]: server-assigned notification, tagged by kind
//! - [`Message`]: a chat message of one conversation
//! - [`Watermark`]: highest `sent_at` rendered for a conversation
//! - [`MonitorAction`] / [`MonitorButton`]: the cached monitoring toggle

mod id;
mod message;
mod monitor;
mod notification;
mod watermark;

pub use id::Id;
pub use message::{Message, SenderType};
pub use monitor::{MonitorAction, MonitorButton, ParseActionError};
pub use notification::{Notification, NotificationKind, DEFAULT_MATCH_NAME};
pub use watermark::Watermark;
