//! New-message polling
//!
//! The watermark is owned by the caller: it goes in with every poll and the
//! advanced value comes back out.

use crate::api::{Backend, ClientResult, MessagesResponse};
use crate::model::{Id, Watermark};
use crate::surface::Surface;

/// Fetch messages strictly newer than `since`
pub async fn fetch_new_messages<B: Backend + ?Sized>(
    backend: &B,
    conversation_id: &Id,
    since: &Watermark,
) -> ClientResult<MessagesResponse> {
    backend.check_messages(conversation_id, since).await?.accepted()
}

/// Render a fetched batch and return the advanced watermark.
///
/// Messages are appended in the order received. Anything not newer than
/// `since` is skipped, so a server that re-sends the boundary message does
/// not cause a duplicate. When at least one message is appended the
/// container is scrolled and the sound played, once for the whole batch.
pub fn apply_new_messages<S: Surface + ?Sized>(
    surface: &mut S,
    since: &Watermark,
    result: ClientResult<MessagesResponse>,
) -> Watermark {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Error checking new messages");
            return since.clone();
        }
    };

    let mut watermark = since.clone();
    let mut appended = 0;

    for message in &response.messages {
        if !since.is_behind(&message.sent_at) {
            tracing::debug!(
                id = %message.id,
                sent_at = %message.sent_at,
                "Skipping message at or before watermark"
            );
            continue;
        }

        surface.append_message(message);
        watermark.advance(&message.sent_at);
        appended += 1;
    }

    if appended == 0 {
        return watermark;
    }

    surface.scroll_messages_to_end();
    surface.set_last_timestamp(&watermark);
    surface.play_notification_sound();

    tracing::info!(count = appended, watermark = %watermark, "New messages rendered");
    watermark
}

/// Fetch and render messages newer than `since`, returning the new watermark
pub async fn poll_new_messages<B, S>(
    backend: &B,
    surface: &mut S,
    conversation_id: &Id,
    since: &Watermark,
) -> Watermark
where
    B: Backend + ?Sized,
    S: Surface + ?Sized,
{
    let result = fetch_new_messages(backend, conversation_id, since).await;
    apply_new_messages(surface, since, result)
}
