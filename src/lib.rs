//! # Wingman
//!
//! Incremental sync client for the dating conversation assistant. Keeps a
//! page view current with the assistant backend by periodic pulls: the
//! notification badge and dropdown, the message list of an open conversation
//! and the per-conversation monitoring toggle.
//!
//! ## Features
//!
//! - **Watermark sync**: only messages newer than the last one shown are
//!   fetched and each is rendered once
//! - **Stale-response discarding**: overlapping notification polls are
//!   applied newest-first by sequence number
//! - **Confirmed toggles**: monitoring buttons flip only after the server
//!   acknowledges
//! - **Typed notifications**: one variant per notification kind, with a
//!   fallback for kinds the client does not know
//!
//! ## Modules
//!
//! - [`model`]: Notifications, messages, watermark, monitoring state
//! - [`present`]: Relative ages, notification text/icons/links, HTML fragments
//! - [`surface`]: The page abstraction the sync logic renders into
//! - [`api`]: Backend trait and its HTTP implementation
//! - [`sync`]: Poll operations and periodic pollers
//! - [`stub`]: In-memory contract server for development and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wingman::{poll_new_messages, poll_notifications, HttpBackend, Id, Page, ServerConfig, Watermark};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(ServerConfig::new("http://localhost:5000"))?;
//!     let mut page = Page::new();
//!
//!     // Badge and dropdown
//!     poll_notifications(&backend, &mut page).await;
//!
//!     // Messages newer than what is already shown
//!     let conversation = Id::from("42");
//!     let watermark = Watermark::new("2024-06-15T11:00:00");
//!     let watermark = poll_new_messages(&backend, &mut page, &conversation, &watermark).await;
//!
//!     println!("{} new messages, watermark now {}", page.messages().len(), watermark);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod model;
pub mod present;
pub mod stub;
pub mod surface;
pub mod sync;

// Re-export top-level types for convenience
pub use model::{
    Id, Message, MonitorAction, MonitorButton, Notification, NotificationKind, SenderType,
    Watermark,
};

pub use present::{relative_age, Alert, AlertLevel};

pub use surface::{Page, Surface, TerminalSurface};

pub use api::{Backend, ClientError, ClientResult, HttpBackend};

pub use sync::{
    poll_new_messages, poll_notifications, toggle_monitoring, FollowerHandle, MessageFollower,
    NotificationOutcome, NotificationPoller, PollerHandle,
};

pub use stub::StubState;

pub use config::{
    Config, ConfigError, LoggingConfig, PollingConfig, ServerConfig, StubConfig,
};
