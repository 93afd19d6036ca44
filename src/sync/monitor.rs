//! Conversation monitoring toggle

use crate::api::{Backend, ClientResult};
use crate::model::{Id, MonitorAction, MonitorButton};
use crate::present::Alert;
use crate::surface::Surface;

/// Ask the server to apply `action` to a conversation.
///
/// The button is flipped only after the server confirms, together with a
/// success alert carrying the server's message. A refusal shows the server's
/// message as a danger alert; transport and decode failures show a generic
/// one. In both failure cases the button is left alone.
///
/// Nothing prevents two toggles for the same conversation from being in
/// flight at once.
pub async fn toggle_monitoring<B, S>(
    backend: &B,
    surface: &mut S,
    conversation_id: &Id,
    action: MonitorAction,
) -> ClientResult<MonitorButton>
where
    B: Backend + ?Sized,
    S: Surface + ?Sized,
{
    let result = backend
        .set_monitoring(conversation_id, action)
        .await
        .and_then(|response| response.accepted());

    match result {
        Ok(response) => {
            let mut button = MonitorButton::new(conversation_id.clone(), action);
            button.flip();
            surface.update_monitor_button(&button);
            surface.show_alert(Alert::success(response.message));

            tracing::info!(conversation = %conversation_id, %action, "Monitoring toggled");
            Ok(button)
        }
        Err(e) => {
            tracing::warn!(conversation = %conversation_id, %action, error = %e, "Monitor request failed");
            surface.show_alert(Alert::danger(e.user_message()));
            Err(e)
        }
    }
}
