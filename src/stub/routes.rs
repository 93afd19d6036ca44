//! Stub route handlers

use super::StubState;
use crate::api::dto::MonitorForm;
use crate::api::{MessagesResponse, MonitorResponse, NotificationsResponse, CSRF_HEADER};
use crate::model::{Id, Watermark};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CheckMessagesQuery {
    #[serde(default)]
    last_timestamp: Option<String>,
}

/// GET /api/notifications
pub async fn notifications(State(state): State<StubState>) -> Json<NotificationsResponse> {
    Json(state.notifications_response().await)
}

/// GET /api/check_messages/:conversation_id
pub async fn check_messages(
    State(state): State<StubState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<CheckMessagesQuery>,
) -> Json<MessagesResponse> {
    let since = Watermark::new(query.last_timestamp.unwrap_or_default());
    Json(state.messages_since(&Id::from(conversation_id), &since).await)
}

/// POST /monitor/:conversation_id
pub async fn monitor(
    State(state): State<StubState>,
    Path(conversation_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<MonitorForm>,
) -> (StatusCode, Json<MonitorResponse>) {
    let token = headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok());
    if !state.csrf_matches(token) {
        tracing::warn!(conversation = %conversation_id, "Rejected monitor request with bad CSRF token");
        return (
            StatusCode::FORBIDDEN,
            Json(MonitorResponse::failure("Invalid CSRF token")),
        );
    }

    let response = state
        .monitor(&Id::from(conversation_id), form.action.as_deref().unwrap_or_default())
        .await;
    (StatusCode::OK, Json(response))
}
