//! HTML fragment rendering
//!
//! Fragments keep the ids and classes the page scripts and stylesheets bind
//! to. All interpolated text is escaped.

use super::{notification_icon, notification_link, notification_text, relative_age, Alert};
use crate::model::{Message, MonitorButton, Notification};
use chrono::{DateTime, Utc};

/// Target of the trailing link in the notification dropdown
pub const SEE_ALL_LINK: &str = "/notifications";

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `.dropdown-item` for a notification
pub fn render_notification_item(notification: &Notification, now: DateTime<Utc>) -> String {
    let icon = notification_icon(&notification.kind)
        .map(|classes| format!(r#"<i class="bi {} me-2"></i>"#, classes))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<a class="dropdown-item" href="{link}">{icon}"#,
            r#"<div class="d-flex flex-column">"#,
            r#"<span>{text}</span>"#,
            r#"<small class="text-muted">{age}</small>"#,
            r#"</div></a>"#
        ),
        link = escape(&notification_link(&notification.kind)),
        icon = icon,
        text = escape(&notification_text(&notification.kind)),
        age = escape(&relative_age(&notification.timestamp, now)),
    )
}

/// Full contents of `#notification-dropdown`: every item in server order,
/// then the "see all" link
pub fn render_notification_dropdown(notifications: &[Notification], now: DateTime<Utc>) -> String {
    let mut html: String = notifications
        .iter()
        .map(|n| render_notification_item(n, now))
        .collect();

    html.push_str(&format!(
        r#"<a class="dropdown-item text-center text-primary" href="{}">See all notifications</a>"#,
        SEE_ALL_LINK
    ));
    html
}

/// A message block appended to `#messages-container`
pub fn render_message_block(message: &Message, now: DateTime<Utc>) -> String {
    let id = escape(message.id.as_str());
    let content = escape(&message.content);

    format!(
        concat!(
            r#"<div class="message {class}" id="message-{id}">"#,
            r#"<div id="message-display-{id}">"#,
            r#"<div id="message-content-{id}">{content}</div>"#,
            r#"<div class="message-time">{age}</div>"#,
            r#"</div>"#,
            r#"<div id="message-edit-{id}" class="d-none">"#,
            r#"<textarea id="message-edit-textarea-{id}" class="form-control mb-2">{content}</textarea>"#,
            r#"<div class="d-flex justify-content-end">"#,
            r#"<button class="btn btn-sm btn-secondary cancel-edit-button me-2" data-message-id="{id}">Cancel</button>"#,
            r#"<button class="btn btn-sm btn-primary save-edit-button" data-message-id="{id}">Save</button>"#,
            r#"</div></div></div>"#
        ),
        class = message.sender_type.css_class(),
        id = id,
        content = content,
        age = escape(&relative_age(&message.sent_at, now)),
    )
}

/// A dismissible alert for `#alert-container`
pub fn render_alert(alert: &Alert) -> String {
    format!(
        concat!(
            r#"<div class="alert alert-{level} alert-dismissible fade show" id="alert-{id}">"#,
            r#"{message}"#,
            r#"<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
            r#"</div>"#
        ),
        level = alert.level.as_str(),
        id = alert.id,
        message = escape(&alert.message),
    )
}

/// A `.monitor-button` reflecting the cached monitoring state
pub fn render_monitor_button(button: &MonitorButton) -> String {
    format!(
        r#"<button class="btn {class} monitor-button" data-conversation-id="{conversation}" data-action="{action}"><i class="bi {icon}"></i> {label}</button>"#,
        class = button.css_class(),
        conversation = escape(button.conversation_id.as_str()),
        action = button.action.as_str(),
        icon = button.icon(),
        label = button.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MonitorAction, SenderType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_notification_item() {
        let n = Notification::new_message("c1", "Alex", "2024-06-15T11:58:00Z");
        let html = render_notification_item(&n, now());
        assert!(html.starts_with(r#"<a class="dropdown-item" href="/conversation/c1">"#));
        assert!(html.contains(r#"<i class="bi bi-chat-text-fill text-primary me-2"></i>"#));
        assert!(html.contains("<span>New message from Alex</span>"));
        assert!(html.contains("2 minutes ago"));
    }

    #[test]
    fn test_dropdown_keeps_order_and_trailing_link() {
        let list = vec![
            Notification::new_match("m1", "First", "2024-06-15T11:00:00"),
            Notification::new_match("m2", "Second", "2024-06-15T11:00:00"),
        ];
        let html = render_notification_dropdown(&list, now());
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let see_all = html.find("See all notifications").unwrap();
        assert!(first < second && second < see_all);
        assert!(html.ends_with("See all notifications</a>"));
    }

    #[test]
    fn test_empty_dropdown_has_only_link() {
        let html = render_notification_dropdown(&[], now());
        assert_eq!(html.matches("dropdown-item").count(), 1);
    }

    #[test]
    fn test_message_block_is_escaped() {
        let m = Message::new("9", "<script>x</script>", SenderType::User, "2024-06-15T11:59:30Z");
        let html = render_message_block(&m, now());
        assert!(html.contains(r#"class="message message-user" id="message-9""#));
        assert!(html.contains(r#"id="message-edit-textarea-9""#));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("just now"));
    }

    #[test]
    fn test_alert_and_button() {
        let alert = Alert::danger("already monitored");
        let html = render_alert(&alert);
        assert!(html.contains("alert-danger"));
        assert!(html.contains("already monitored"));

        let button = MonitorButton::new("5", MonitorAction::Stop);
        let html = render_monitor_button(&button);
        assert!(html.contains(r#"data-action="stop""#));
        assert!(html.contains("btn-danger"));
        assert!(html.contains("Stop Monitoring"));
    }
}
