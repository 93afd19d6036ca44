//! Wingman CLI
//!
//! Command-line front end for the sync client:
//! - Check or watch notifications
//! - Follow a conversation for new messages
//! - Start/stop conversation monitoring
//! - Run the contract stub server

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wingman::config::generate_default_config;
use wingman::{
    Config, HttpBackend, Id, LoggingConfig, Message, MessageFollower, MonitorAction,
    Notification, NotificationPoller, SenderType, StubState, TerminalSurface, Watermark,
};

#[derive(Parser)]
#[command(name = "wingman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Incremental sync client for the dating conversation assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check notifications once
    Notifications,

    /// Keep checking notifications until interrupted
    Watch,

    /// Print new messages of a conversation as they arrive
    Follow {
        /// Conversation id
        conversation: String,
        /// Only show messages sent after this timestamp
        #[arg(long)]
        since: Option<String>,
    },

    /// Start or stop monitoring a conversation
    Monitor {
        /// Conversation id
        conversation: String,
        /// start or stop
        action: MonitorAction,
    },

    /// Run the in-memory contract stub server
    ServeStub {
        /// Port (default from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Seed a few notifications and messages
        #[arg(long)]
        demo: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.base_url {
        config.server.base_url = url;
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Notifications => {
            let backend = HttpBackend::new(config.server.clone())?;
            let mut surface = TerminalSurface::stdout();

            let outcome = wingman::poll_notifications(&backend, &mut surface).await;
            tracing::debug!(?outcome, "Notification check finished");
        }

        Commands::Watch => {
            let backend = Arc::new(HttpBackend::new(config.server.clone())?);
            let surface = Arc::new(RwLock::new(TerminalSurface::stdout()));

            let poller = NotificationPoller::new(
                backend,
                surface,
                config.polling.notification_interval(),
            );
            if let Some(handle) = poller.start().await {
                tokio::signal::ctrl_c().await?;
                handle.stop();
                tracing::info!(polls = handle.polls_started(), "Stopped watching notifications");
            }
        }

        Commands::Follow {
            conversation,
            since,
        } => {
            let backend = Arc::new(HttpBackend::new(config.server.clone())?);
            let surface = Arc::new(RwLock::new(TerminalSurface::stdout()));
            let since = since.map(Watermark::new).unwrap_or_default();

            let handle = MessageFollower::new(
                backend,
                surface,
                Id::from(conversation),
                since,
                config.polling.message_interval(),
            )
            .start();

            tokio::signal::ctrl_c().await?;
            handle.stop();
            println!("last timestamp: {}", handle.watermark());
        }

        Commands::Monitor {
            conversation,
            action,
        } => {
            let backend = HttpBackend::new(config.server.clone())?;
            let mut surface = TerminalSurface::stdout();

            wingman::toggle_monitoring(&backend, &mut surface, &Id::from(conversation), action)
                .await?;
        }

        Commands::ServeStub { port, demo } => {
            let mut state = StubState::new();
            if let Some(token) = &config.stub.csrf_token {
                state = state.with_csrf_token(token);
            }
            if demo {
                seed_demo(&state).await;
            }

            let port = port.unwrap_or(config.stub.port);
            wingman::stub::serve(state, &config.stub.host, port)
                .await
                .context("stub server failed")?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wingman={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn seed_demo(state: &StubState) {
    let now = Utc::now();
    let at = |minutes: i64| (now - Duration::minutes(minutes)).format("%Y-%m-%dT%H:%M:%S").to_string();

    state
        .push_notification(Notification::new_match("m1", "Alex", at(180)))
        .await;
    state
        .push_notification(Notification::new_message("1", "Alex", at(12)))
        .await;
    state
        .push_notification(Notification::suggested_response("1", "Alex", at(5)))
        .await;

    let conversation = Id::from("1");
    for (id, sender, content, minutes) in [
        ("1", SenderType::User, "Hey Alex! Loved your hiking photos.", 30),
        ("2", SenderType::Match, "Thanks! Do you hike a lot?", 12),
    ] {
        state
            .push_message(&conversation, Message::new(id, content, sender, at(minutes)))
            .await;
    }

    tracing::info!("Seeded demo notifications and conversation 1");
}
