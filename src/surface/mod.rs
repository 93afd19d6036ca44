//! Page Surface
//!
//! The page elements the sync client reads and writes, expressed as a trait
//! so the same logic drives an in-memory [`Page`], the CLI's
//! [`TerminalSurface`] or an embedder's own view.
//!
//! | Method | Page element |
//! |---|---|
//! | `set_notification_count` | `#notification-badge` |
//! | `replace_notifications` | `#notification-dropdown` |
//! | `append_message` / `scroll_messages_to_end` | `#messages-container` |
//! | `set_last_timestamp` | `#last-timestamp` |
//! | `show_alert` | `#alert-container` |
//! | `update_monitor_button` | `.monitor-button` |

mod page;
mod terminal;

pub use page::{Badge, Page, RenderedMessage, DEFAULT_ALERT_TTL};
pub use terminal::TerminalSurface;

use crate::model::{Message, MonitorButton, Notification, Watermark};
use crate::present::Alert;

/// Mutable view the sync operations render into
pub trait Surface: Send + Sync {
    /// Whether the page shows a notification badge at all
    fn has_notification_badge(&self) -> bool {
        true
    }

    /// Whether the page has a notification dropdown
    fn has_notification_dropdown(&self) -> bool {
        true
    }

    /// Show the badge with exactly this count
    fn set_notification_count(&mut self, count: usize);

    /// Replace the dropdown contents with this list
    fn replace_notifications(&mut self, notifications: &[Notification]);

    /// Append one message block to the end of the message list
    fn append_message(&mut self, message: &Message);

    fn scroll_messages_to_end(&mut self);

    /// Mirror of the caller-owned watermark, for pages that keep one
    fn set_last_timestamp(&mut self, _watermark: &Watermark) {}

    fn play_notification_sound(&mut self);

    fn show_alert(&mut self, alert: Alert);

    /// Reflect an acknowledged monitoring state on its button
    fn update_monitor_button(&mut self, button: &MonitorButton);
}
