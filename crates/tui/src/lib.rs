//! # ak-tui
//!
//! Terminal User Interface for agent-kit.
//!
//! Shows every agent with its pin state, keeps the pinned bar in pin order,
//! and hosts the provider access form with its assistant and user-group
//! multi-selects. Core changes arrive as `Event`s from `ak-core` over a
//! channel.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use ak_core::agents::AgentsContext;
use ak_core::backend::{Backend, HttpBackend};
use ak_core::catalog::Catalog;
use ak_core::config::load_config;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log file path; logging is off when unset. The terminal is owned by the UI.
pub const LOG_FILE_ENV: &str = "AGENT_KIT_LOG";

/// Load the config under `root`, connect to the server and run the UI until
/// the user quits.
pub async fn run_app(root: &Path) -> Result<()> {
    init_file_logging()?;

    let config = load_config(root)
        .await
        .context("Failed to load configuration")?;
    let origin = config.origin();
    info!(
        source = %origin.display(),
        base_url = %config.client.server.base_url,
        "starting tui"
    );

    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::from_config(&config.client.server).context("Failed to build HTTP client")?,
    );

    let (event_tx, event_rx) = unbounded_channel();
    let catalog = Catalog::new(Arc::clone(&backend), config.client.endpoints.clone())
        .with_events(event_tx.clone());
    let mut context =
        AgentsContext::new(backend, &catalog, config.client.clone()).with_events(event_tx);
    context
        .bootstrap()
        .await
        .context("Failed to load agents from the server")?;

    let mut app = App::new(context, catalog, event_rx);
    let mut tui = Tui::init()?;
    let result = app.run(&mut tui).await;
    tui.restore()?;
    result
}

fn init_file_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", Path::new(&path).display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
