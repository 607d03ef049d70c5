//! # Marginalia Frame Runtime
//!
//! The main entry point for a standalone frame runtime.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Validate the UI surface URLs
//! 3. Build the document surface (boot-injected link and assets)
//! 4. Wait for the document-ready gate, assemble collaborators
//! 5. Run until the destroy signal (Ctrl+C here)
//!
//! A browser embedding would supply its own [`Document`] adapter; the
//! standalone binary runs against the in-memory one so the full lifecycle
//! can be exercised end to end.
//!
//! [`Document`]: marginalia_runtime::Document

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use marginalia_bus::EventBus;
use marginalia_runtime::adapters::{DefaultCollaboratorFactory, InMemoryDocument};
use marginalia_runtime::{ClientConfig, Document, FrameCoordinator};
use marginalia_types::ReadyState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = ClientConfig::from_env();
    config.validate().context("Invalid client configuration")?;

    info!("===========================================");
    info!("  Marginalia Frame Runtime v0.1.0");
    info!("===========================================");

    // Build the page surface the way the boot script leaves it: the sidebar
    // anchor link plus the injected client assets.
    let document = Arc::new(
        InMemoryDocument::new().with_sidebar_link(config.sidebar.app_url.clone()),
    );
    document.insert_asset("script");
    document.insert_asset("style");
    document.set_ready_state(ReadyState::Complete);

    let coordinator = Arc::new(FrameCoordinator::new(
        Arc::clone(&document) as Arc<dyn Document>,
        Arc::new(EventBus::new()),
        Arc::new(DefaultCollaboratorFactory),
        config,
    ));

    let link = Arc::clone(&coordinator).run().await?;
    info!(
        role = %coordinator.role().map(|r| r.to_string()).unwrap_or_default(),
        "Frame is running. Press Ctrl+C to destroy."
    );

    tokio::signal::ctrl_c().await?;

    // The external destroy signal travels through the anchor link.
    link.fire_destroy();

    // Give the destroy listener time to tear the frame down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    info!("Shutdown complete");

    Ok(())
}
