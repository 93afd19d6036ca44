//! Presentation
//!
//! Pure functions turning model values into the text and HTML fragments the
//! page expects. Nothing here performs I/O; the current time is always passed
//! in so output is deterministic.

mod alert;
mod html;
mod notification;
mod time;

pub use alert::{Alert, AlertLevel, GENERIC_ERROR};
pub use html::{
    escape, render_alert, render_message_block, render_monitor_button, render_notification_dropdown,
    render_notification_item, SEE_ALL_LINK,
};
pub use notification::{notification_icon, notification_link, notification_text};
pub use time::{parse_timestamp, parse_timestamp_in, relative_age, relative_age_in};
