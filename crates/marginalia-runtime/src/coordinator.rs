//! # Frame Lifecycle Coordinator
//!
//! Single entry point that, once per frame, determines the frame's role,
//! constructs the minimal collaborator set bound to the shared bus, and
//! installs exactly one teardown path on the sidebar anchor link.
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──(ready gate fires)──► Assembling ──► Active ──► Destroyed
//! ```
//!
//! `Destroyed` is terminal; there is no way back to `Active`. Assembly is
//! all-or-nothing: a constructor failure (or a missing anchor link) destroys
//! every collaborator already constructed before the error propagates, and
//! the frame lands in `Destroyed`.

use crate::container::ClientConfig;
use crate::gate::document_ready;
use crate::ports::{CollaboratorFactory, Document, SidebarLink};
use marginalia_bus::{topics, EventBus, EventPublisher};
use marginalia_types::{BootstrapError, Collaborator, FrameRole};
use parking_lot::{Mutex, RwLock};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Lifecycle phase of a frame's coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Created, waiting for the document-ready gate.
    Uninitialized,
    /// Gate fired; collaborators are being constructed.
    Assembling,
    /// Collaborators constructed, teardown handler registered.
    Active,
    /// Terminal: collaborators destroyed, injected assets removed.
    Destroyed,
}

impl std::fmt::Display for FramePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Assembling => write!(f, "assembling"),
            Self::Active => write!(f, "active"),
            Self::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// The collaborator set owned by one frame.
///
/// `sidebar` and `notebook` are present iff the frame's role is `Host`;
/// `guest` always exists.
struct FrameCollaborators {
    guest: Box<dyn Collaborator>,
    sidebar: Option<Box<dyn Collaborator>>,
    notebook: Option<Box<dyn Collaborator>>,
}

/// Coordinates one frame's collaborator lifecycle.
///
/// The coordinator exclusively owns the collaborator handles for the
/// lifetime of the frame. All collaborators receive the same [`EventBus`]
/// by reference at construction time.
pub struct FrameCoordinator {
    /// The page surface this frame runs in.
    document: Arc<dyn Document>,

    /// Shared bus, injected into every collaborator.
    bus: Arc<EventBus>,

    /// Constructs the collaborators.
    factory: Arc<dyn CollaboratorFactory>,

    /// Frame configuration, read-only after construction.
    config: ClientConfig,

    /// Lifecycle phase.
    phase: RwLock<FramePhase>,

    /// Role computed during assembly. `None` before the gate fires.
    role: RwLock<Option<FrameRole>>,

    /// Owned collaborator handles. `None` before assembly.
    collaborators: Mutex<Option<FrameCollaborators>>,
}

impl FrameCoordinator {
    /// Create a coordinator for one frame. Nothing runs until [`run`] or
    /// [`assemble`] is called.
    ///
    /// [`run`]: FrameCoordinator::run
    /// [`assemble`]: FrameCoordinator::assemble
    pub fn new(
        document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        factory: Arc<dyn CollaboratorFactory>,
        config: ClientConfig,
    ) -> Self {
        Self {
            document,
            bus,
            factory,
            config,
            phase: RwLock::new(FramePhase::Uninitialized),
            role: RwLock::new(None),
            collaborators: Mutex::new(None),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FramePhase {
        *self.phase.read()
    }

    /// Role computed during assembly, `None` until then.
    #[must_use]
    pub fn role(&self) -> Option<FrameRole> {
        *self.role.read()
    }

    /// The shared bus this frame's collaborators communicate on.
    #[must_use]
    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    /// Whether a collaborator of the given description was constructed and
    /// not yet destroyed. Host frames report guest, sidebar and notebook;
    /// guest frames the guest only.
    #[must_use]
    pub fn has_live_sidebar(&self) -> bool {
        self.collaborators
            .lock()
            .as_ref()
            .and_then(|set| set.sidebar.as_ref())
            .is_some_and(|sidebar| !sidebar.is_destroyed())
    }

    /// Whether a live notebook is owned by this frame.
    #[must_use]
    pub fn has_live_notebook(&self) -> bool {
        self.collaborators
            .lock()
            .as_ref()
            .and_then(|set| set.notebook.as_ref())
            .is_some_and(|notebook| !notebook.is_destroyed())
    }

    /// Whether a live guest is owned by this frame.
    #[must_use]
    pub fn has_live_guest(&self) -> bool {
        self.collaborators
            .lock()
            .as_ref()
            .is_some_and(|set| !set.guest.is_destroyed())
    }

    /// Wait for the document-ready gate, assemble the frame, and spawn the
    /// destroy listener.
    ///
    /// Each emission of the anchor's destroy signal re-runs teardown; the
    /// first does the work, the rest are no-ops by the collaborator
    /// contract.
    pub async fn run(self: Arc<Self>) -> Result<SidebarLink, BootstrapError> {
        document_ready(self.document.as_ref()).await;

        let link = self.assemble()?;

        let coordinator = Arc::clone(&self);
        let mut destroy_rx = link.subscribe_destroy();
        tokio::spawn(async move {
            loop {
                match destroy_rx.recv().await {
                    Ok(()) => coordinator.teardown(),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Signals were fired faster than we consumed them;
                        // one teardown covers them all.
                        debug!(missed, "Destroy signals coalesced");
                        coordinator.teardown();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(link)
    }

    /// Determine the role, construct the collaborator set, and locate the
    /// teardown anchor.
    ///
    /// ## Construction Order
    ///
    /// Guest always first, then (host frames only) sidebar, then notebook.
    ///
    /// ## Failure Semantics
    ///
    /// All-or-nothing: any failure destroys the collaborators constructed
    /// so far, in reverse order, and leaves the frame `Destroyed`.
    #[instrument(name = "frame_assemble", skip(self))]
    pub fn assemble(&self) -> Result<SidebarLink, BootstrapError> {
        {
            let mut phase = self.phase.write();
            if *phase != FramePhase::Uninitialized {
                return Err(BootstrapError::AlreadyAssembled {
                    phase: phase.to_string(),
                });
            }
            *phase = FramePhase::Assembling;
        }

        let annotator_config = self.config.annotator_config();
        let role =
            FrameRole::from_sub_frame_identifier(annotator_config.sub_frame_identifier.as_deref());
        *self.role.write() = Some(role);
        info!(%role, "Assembling frame");

        // Guest first: it handles creating annotations and displaying
        // highlights in every frame.
        let mut guest = match self.factory.guest(
            Arc::clone(&self.document),
            Arc::clone(&self.bus),
            &annotator_config,
        ) {
            Ok(guest) => guest,
            Err(e) => {
                warn!(error = %e, "Guest construction failed");
                *self.phase.write() = FramePhase::Destroyed;
                return Err(e.into());
            }
        };

        let mut sidebar = None;
        let mut notebook = None;
        if role.is_host() {
            let sidebar_config = self.config.sidebar_config();
            match self.factory.sidebar(
                Arc::clone(&self.document),
                Arc::clone(&self.bus),
                guest.as_ref(),
                &sidebar_config,
            ) {
                Ok(s) => sidebar = Some(s),
                Err(e) => {
                    warn!(error = %e, "Sidebar construction failed, rolling back");
                    guest.destroy();
                    *self.phase.write() = FramePhase::Destroyed;
                    return Err(e.into());
                }
            }

            let notebook_config = self.config.notebook_config();
            match self.factory.notebook(
                Arc::clone(&self.document),
                Arc::clone(&self.bus),
                &notebook_config,
            ) {
                Ok(n) => notebook = Some(n),
                Err(e) => {
                    warn!(error = %e, "Notebook construction failed, rolling back");
                    if let Some(mut s) = sidebar {
                        s.destroy();
                    }
                    guest.destroy();
                    *self.phase.write() = FramePhase::Destroyed;
                    return Err(e.into());
                }
            }
        }

        // The anchor link is the sole channel for the external destroy
        // signal; without it the frame cannot be torn down later, so
        // bootstrap must not complete.
        let Some(link) = self.document.sidebar_link() else {
            warn!("Sidebar anchor link missing, rolling back");
            if let Some(mut s) = sidebar {
                s.destroy();
            }
            if let Some(mut n) = notebook {
                n.destroy();
            }
            guest.destroy();
            *self.phase.write() = FramePhase::Destroyed;
            return Err(BootstrapError::SidebarLinkMissing);
        };

        *self.collaborators.lock() = Some(FrameCollaborators {
            guest,
            sidebar,
            notebook,
        });
        *self.phase.write() = FramePhase::Active;
        info!(%role, sidebar_url = link.href(), "Frame active");

        Ok(link)
    }

    /// Destroy the owned collaborators and remove the injected assets.
    ///
    /// Order: sidebar, then notebook, then guest (the guest always exists).
    /// Safe to call any number of times; repeat calls rely on the
    /// collaborators' idempotent destroy and remove nothing further.
    #[instrument(name = "frame_teardown", skip(self))]
    pub fn teardown(&self) {
        let first = {
            let mut phase = self.phase.write();
            let was_destroyed = *phase == FramePhase::Destroyed;
            *phase = FramePhase::Destroyed;
            !was_destroyed
        };
        if !first {
            debug!("Frame already destroyed, teardown is a no-op");
        }

        {
            let mut guard = self.collaborators.lock();
            if let Some(set) = guard.as_mut() {
                if let Some(sidebar) = set.sidebar.as_mut() {
                    sidebar.destroy();
                }
                if let Some(notebook) = set.notebook.as_mut() {
                    notebook.destroy();
                }
                set.guest.destroy();
            }
        }

        let removed = self.document.remove_injected_assets();
        if first {
            self.bus.publish(
                topics::FRAME_DESTROYED,
                json!({ "assetsRemoved": removed }),
            );
            info!(assets_removed = removed, "Frame torn down");
        }
    }
}
