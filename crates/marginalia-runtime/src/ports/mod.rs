//! # Runtime Ports
//!
//! Traits the coordinator works against. The runtime never touches a real
//! page directly; it coordinates through these seams, and `adapters/`
//! provides the concrete implementations.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    FrameCoordinator                       │
//! │         │                          │                      │
//! │         ↓                          ↓                      │
//! │  ┌─────────────┐        ┌─────────────────────┐           │
//! │  │  Document   │        │ CollaboratorFactory │           │
//! │  │  (port)     │        │ (port)              │           │
//! │  └──────┬──────┘        └──────────┬──────────┘           │
//! │         ↓                          ↓                      │
//! │  ┌─────────────────┐    ┌──────────────────────────────┐  │
//! │  │ InMemoryDocument│    │ Guest / Sidebar / Notebook   │  │
//! │  │ (adapter)       │    │ collaborators (adapters)     │  │
//! │  └─────────────────┘    └──────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```

use marginalia_bus::EventBus;
use marginalia_types::{Collaborator, CollaboratorError, ReadyState};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::container::{AnnotatorConfig, NotebookConfig, SidebarConfig};

/// Destroy signals are rare; a small buffer is plenty.
const DESTROY_CHANNEL_CAPACITY: usize = 16;

/// The page surface the runtime coordinates against.
///
/// Covers exactly what the coordinator needs from the hosting document:
/// readiness, the sidebar anchor link, and injected-asset removal.
pub trait Document: Send + Sync {
    /// Current readiness phase of the document.
    fn ready_state(&self) -> ReadyState;

    /// Watch readiness changes. The receiver's current value is the
    /// document's present state.
    fn watch_ready_state(&self) -> watch::Receiver<ReadyState>;

    /// Locate the sidebar anchor link, the contract point for external
    /// teardown signalling. `None` when the boot mechanism never added it.
    fn sidebar_link(&self) -> Option<SidebarLink>;

    /// Remove every node carrying the injected-asset marker attribute,
    /// regardless of tag. Returns the number of nodes removed.
    fn remove_injected_assets(&self) -> usize;

    /// Count of nodes currently carrying the injected-asset marker.
    fn injected_asset_count(&self) -> usize;
}

/// Handle to the sidebar anchor link element.
///
/// The link is the sole channel for the external destroy signal; the
/// coordinator subscribes, external code fires.
#[derive(Clone, Debug)]
pub struct SidebarLink {
    /// URL of the sidebar application the link points at.
    href: String,
    /// Destroy signal channel.
    destroy_tx: broadcast::Sender<()>,
}

impl SidebarLink {
    /// Create a link handle with a fresh destroy channel.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        let (destroy_tx, _) = broadcast::channel(DESTROY_CHANNEL_CAPACITY);
        Self {
            href: href.into(),
            destroy_tx,
        }
    }

    /// URL of the sidebar application.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Subscribe to the external destroy signal.
    #[must_use]
    pub fn subscribe_destroy(&self) -> broadcast::Receiver<()> {
        self.destroy_tx.subscribe()
    }

    /// Fire the destroy signal, from the external boot mechanism's side.
    ///
    /// Returns the number of listeners notified; zero when nobody is
    /// listening (the signal is then dropped).
    pub fn fire_destroy(&self) -> usize {
        self.destroy_tx.send(()).unwrap_or(0)
    }
}

/// Constructs the collaborators the coordinator owns.
///
/// The coordinator decides *which* collaborators a frame gets; the factory
/// decides *how* they come to life. Every constructor receives the shared
/// bus by reference, never a global.
pub trait CollaboratorFactory: Send + Sync {
    /// Construct the guest (annotation engine). Present in every frame.
    fn guest(
        &self,
        document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        config: &AnnotatorConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError>;

    /// Construct the sidebar panel. Host frames only. Receives a borrow of
    /// the already constructed guest.
    fn sidebar(
        &self,
        document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        guest: &dyn Collaborator,
        config: &SidebarConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError>;

    /// Construct the notebook surface. Host frames only.
    fn notebook(
        &self,
        document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        config: &NotebookConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError>;
}
