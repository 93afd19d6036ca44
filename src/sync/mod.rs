//! Incremental Sync
//!
//! Keeps a [`Surface`](crate::surface::Surface) current with the backend by
//! periodic pulls, without re-rendering what is already shown.
//!
//! ## Operations
//!
//! - [`poll_notifications`]: overwrite the badge count and the dropdown list
//! - [`poll_new_messages`]: append messages newer than a caller-owned
//!   [`Watermark`](crate::model::Watermark) and return the advanced watermark
//! - [`toggle_monitoring`]: start/stop monitoring, flipping the button only
//!   after the server confirms
//!
//! Polling failures are logged and swallowed; the next tick is the retry.
//!
//! ## Scheduling
//!
//! - [`NotificationPoller`]: fixed-period task; overlapping fetches are
//!   allowed and stale responses are discarded by sequence number
//! - [`MessageFollower`]: fixed-period task that never overlaps and threads
//!   the watermark from one poll to the next

mod messages;
mod monitor;
mod notifications;
mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use messages::{apply_new_messages, fetch_new_messages, poll_new_messages};
pub use monitor::toggle_monitoring;
pub use notifications::{
    apply_notifications, fetch_notifications, poll_notifications, NotificationOutcome,
};
pub use poller::{FollowerHandle, MessageFollower, NotificationPoller, PollerHandle, SequenceGate};
