//! Contract Stub Server
//!
//! In-memory implementation of the three backend endpoints the client
//! consumes, built with Axum. Used for local development (`wingman
//! serve-stub`) and as an in-process [`Backend`](crate::api::Backend) in tests.
//!
//! # Endpoints
//!
//! - `GET /api/notifications` - Most recent notifications
//! - `GET /api/check_messages/:conversation_id` - Messages newer than `last_timestamp`
//! - `POST /monitor/:conversation_id` - Start/stop monitoring (form field `action`)

mod routes;
mod state;

pub use state::{StubState, NOTIFICATION_HISTORY_LIMIT};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the stub router
pub fn build_router(state: StubState) -> Router {
    Router::new()
        .route("/api/notifications", get(routes::notifications))
        .route(
            "/api/check_messages/:conversation_id",
            get(routes::check_messages),
        )
        .route("/monitor/:conversation_id", post(routes::monitor))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the stub until the task is cancelled
pub async fn serve(state: StubState, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Contract stub listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MessagesResponse, MonitorResponse, NotificationsResponse};
    use crate::model::{Id, Message, Notification, SenderType};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_notifications_route() {
        let state = StubState::new();
        state
            .push_notification(Notification::new_message("c1", "Alex", "2024-06-15T11:00:00"))
            .await;
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/notifications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: NotificationsResponse = body_json(response).await;
        assert!(body.success);
        assert_eq!(body.count, 1);
    }

    #[tokio::test]
    async fn test_check_messages_route_filters_by_timestamp() {
        let state = StubState::new();
        let conversation = Id::from("c1");
        for (id, sent_at) in [("1", "2024-01-01T10:00:00"), ("2", "2024-01-01T11:00:00")] {
            state
                .push_message(&conversation, Message::new(id, "x", SenderType::Match, sent_at))
                .await;
        }
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/check_messages/c1?last_timestamp=2024-01-01T10%3A00%3A00")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessagesResponse = body_json(response).await;
        assert_eq!(body.count, 1);
        assert_eq!(body.messages[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_monitor_route_invalid_action() {
        let app = build_router(StubState::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/monitor/5")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("action=pause"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MonitorResponse = body_json(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "Invalid action");
    }

    #[tokio::test]
    async fn test_monitor_route_checks_csrf() {
        let app = build_router(StubState::new().with_csrf_token("secret"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/monitor/5")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .header("X-CSRFToken", "wrong")
                    .body(Body::from("action=start"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: MonitorResponse = body_json(response).await;
        assert_eq!(body.message, "Invalid CSRF token");
    }
}
