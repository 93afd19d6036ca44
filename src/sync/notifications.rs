//! Notification polling

use crate::api::{Backend, ClientResult, NotificationsResponse};
use crate::surface::Surface;

/// What a notification poll did to the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Badge set to `count` and dropdown replaced (if present)
    Updated { count: usize },
    /// Server reported nothing; surface untouched
    Empty,
    /// The surface has no badge; nothing was fetched
    NoBadge,
    /// Request failed or was rejected; surface untouched
    Failed { reason: String },
}

/// Fetch the notification list, turning `success: false` into an error
pub async fn fetch_notifications<B: Backend + ?Sized>(
    backend: &B,
) -> ClientResult<NotificationsResponse> {
    backend.notifications().await?.accepted()
}

/// Apply a fetched notification list.
///
/// A zero count leaves the surface exactly as it was. Otherwise the badge is
/// overwritten with the count and the dropdown fully replaced.
pub fn apply_notifications<S: Surface + ?Sized>(
    surface: &mut S,
    result: ClientResult<NotificationsResponse>,
) -> NotificationOutcome {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Error checking notifications");
            return NotificationOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if response.count == 0 {
        tracing::trace!("No notifications");
        return NotificationOutcome::Empty;
    }

    if !surface.has_notification_badge() {
        return NotificationOutcome::NoBadge;
    }

    surface.set_notification_count(response.count);
    if surface.has_notification_dropdown() {
        surface.replace_notifications(&response.notifications);
    }

    tracing::debug!(count = response.count, "Notifications updated");
    NotificationOutcome::Updated {
        count: response.count,
    }
}

/// Fetch and apply notifications in one step
pub async fn poll_notifications<B, S>(backend: &B, surface: &mut S) -> NotificationOutcome
where
    B: Backend + ?Sized,
    S: Surface + ?Sized,
{
    if !surface.has_notification_badge() {
        return NotificationOutcome::NoBadge;
    }

    let result = fetch_notifications(backend).await;
    apply_notifications(surface, result)
}
