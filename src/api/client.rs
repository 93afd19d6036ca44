//! HTTP backend client
//!
//! reqwest-based implementation of [`Backend`] against the assistant web app.

use super::{Backend, ClientError, ClientResult, MessagesResponse, MonitorResponse, NotificationsResponse};
use crate::config::ServerConfig;
use crate::model::{Id, MonitorAction, Watermark};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the CSRF token on state-changing requests
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Assistant backend over HTTP
pub struct HttpBackend {
    client: Client,
    config: ServerConfig,
}

impl HttpBackend {
    /// Create a new client with the given configuration
    pub fn new(config: ServerConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ClientError::Config(format!("session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(ClientError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_reqwest)?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn notifications(&self) -> ClientResult<NotificationsResponse> {
        let url = self.url("/api/notifications");
        tracing::trace!(%url, "Fetching notifications");

        self.send_json(self.client.get(&url)).await
    }

    async fn check_messages(
        &self,
        conversation_id: &Id,
        since: &Watermark,
    ) -> ClientResult<MessagesResponse> {
        let url = self.url(&format!(
            "/api/check_messages/{}",
            urlencoding::encode(conversation_id.as_str())
        ));
        tracing::trace!(%url, since = %since, "Checking for new messages");

        let request = self
            .client
            .get(&url)
            .query(&[("last_timestamp", since.as_str())]);
        self.send_json(request).await
    }

    async fn set_monitoring(
        &self,
        conversation_id: &Id,
        action: MonitorAction,
    ) -> ClientResult<MonitorResponse> {
        let url = self.url(&format!(
            "/monitor/{}",
            urlencoding::encode(conversation_id.as_str())
        ));
        tracing::debug!(%url, %action, "Sending monitor request");

        let mut request = self.client.post(&url).form(&[("action", action.as_str())]);
        if let Some(token) = &self.config.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, Notification, SenderType};
    use crate::stub::{build_router, StubState};

    async fn spawn_stub(state: StubState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_url_joins_base() {
        let backend = HttpBackend::new(ServerConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(backend.url("/api/notifications"), "http://localhost:5000/api/notifications");
    }

    #[test]
    fn test_rejects_invalid_cookie() {
        let mut config = ServerConfig::default();
        config.session_cookie = Some("bad\nvalue".to_string());
        assert!(matches!(HttpBackend::new(config), Err(ClientError::Config(_))));
    }

    #[tokio::test]
    async fn test_notifications_over_http() {
        let state = StubState::new();
        state
            .push_notification(Notification::new_match("m1", "Sam", "2024-06-15T11:00:00"))
            .await;
        let base = spawn_stub(state).await;

        let backend = HttpBackend::new(ServerConfig::new(base)).unwrap();
        let response = backend.notifications().await.unwrap();
        assert!(response.success);
        assert_eq!(response.count, 1);
        assert_eq!(response.notifications[0].kind.match_name(), Some("Sam"));
    }

    #[tokio::test]
    async fn test_check_messages_sends_watermark() {
        let state = StubState::new();
        let conversation = Id::from("conv one");
        state
            .push_message(&conversation, Message::new("1", "hi", SenderType::Match, "T1"))
            .await;
        state
            .push_message(&conversation, Message::new("2", "hey", SenderType::User, "T2"))
            .await;
        let base = spawn_stub(state).await;

        let backend = HttpBackend::new(ServerConfig::new(base)).unwrap();
        let response = backend
            .check_messages(&conversation, &Watermark::new("T1"))
            .await
            .unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.messages[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_monitor_requires_csrf_token() {
        let state = StubState::new().with_csrf_token("secret");
        let base = spawn_stub(state.clone()).await;

        let without = HttpBackend::new(ServerConfig::new(base.clone())).unwrap();
        let err = without
            .set_monitoring(&Id::from("5"), MonitorAction::Start)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 403, .. }));

        let with = HttpBackend::new(ServerConfig::new(base).csrf_token("secret")).unwrap();
        let response = with
            .set_monitoring(&Id::from("5"), MonitorAction::Start)
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message, "Monitoring started");
        assert!(state.is_monitored(&Id::from("5")).await);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(ServerConfig::new(format!("http://{}", addr))).unwrap();
        let err = backend.notifications().await.unwrap_err();
        assert!(matches!(err, ClientError::Unavailable));
    }
}
