//! # Reference Collaborators
//!
//! Minimal Guest, Sidebar and Notebook implementations wired to the shared
//! bus. The real anchoring/highlighting and panel rendering live outside
//! this runtime; these adapters carry the lifecycle and bus contracts the
//! coordinator depends on.
//!
//! ## Destroy Contract
//!
//! Every collaborator here upholds the idempotent destroy contract: the
//! first `destroy()` releases resources (bus subscriptions included), later
//! calls return without doing anything.

use crate::container::{AnnotatorConfig, NotebookConfig, SidebarConfig};
use crate::ports::{CollaboratorFactory, Document};
use marginalia_bus::{topics, EventBus, EventPublisher, Subscription};
use marginalia_types::{Collaborator, CollaboratorError, CollaboratorKind};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// The annotation engine handle. Present in every frame.
pub struct GuestCollaborator {
    sub_frame_identifier: Option<String>,
    destroyed: bool,
}

impl GuestCollaborator {
    /// Bind a guest to the frame's content and announce it on the bus.
    pub fn new(bus: Arc<EventBus>, config: &AnnotatorConfig) -> Self {
        bus.publish(
            topics::GUEST_READY,
            json!({ "subFrameIdentifier": config.sub_frame_identifier }),
        );
        Self {
            sub_frame_identifier: config.sub_frame_identifier.clone(),
            destroyed: false,
        }
    }

    /// The sub-frame identifier this guest was bound with, if any.
    #[must_use]
    pub fn sub_frame_identifier(&self) -> Option<&str> {
        self.sub_frame_identifier.as_deref()
    }
}

impl Collaborator for GuestCollaborator {
    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Guest
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        debug!("Guest destroyed");
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// The annotation list panel. Host frames only.
pub struct SidebarCollaborator {
    /// Guests announcing themselves after the sidebar opened.
    connected_guests: Arc<AtomicUsize>,
    /// Bus subscription; dropped on destroy.
    guest_subscription: Option<Subscription>,
    destroyed: bool,
}

impl SidebarCollaborator {
    /// Open the sidebar panel and start listening for guest announcements.
    pub fn new(bus: Arc<EventBus>, config: &SidebarConfig) -> Self {
        let connected_guests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&connected_guests);
        let guest_subscription = bus.subscribe(topics::GUEST_READY, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(topics::SIDEBAR_OPENED, json!({ "appUrl": config.app_url }));

        Self {
            connected_guests,
            guest_subscription: Some(guest_subscription),
            destroyed: false,
        }
    }

    /// Guests that announced themselves since the sidebar opened.
    #[must_use]
    pub fn connected_guests(&self) -> usize {
        self.connected_guests.load(Ordering::SeqCst)
    }
}

impl Collaborator for SidebarCollaborator {
    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Sidebar
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        // Unsubscribe so a destroyed sidebar is never called on dead state.
        self.guest_subscription.take();
        debug!("Sidebar destroyed");
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// The notebook surface. Host frames only.
pub struct NotebookCollaborator {
    destroyed: bool,
}

impl NotebookCollaborator {
    /// Open the notebook surface and announce it on the bus.
    pub fn new(bus: &EventBus, config: &NotebookConfig) -> Self {
        bus.publish(topics::NOTEBOOK_OPENED, json!({ "appUrl": config.app_url }));
        Self { destroyed: false }
    }
}

impl Collaborator for NotebookCollaborator {
    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Notebook
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        debug!("Notebook destroyed");
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Factory producing the reference collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollaboratorFactory;

impl CollaboratorFactory for DefaultCollaboratorFactory {
    fn guest(
        &self,
        _document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        config: &AnnotatorConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        Ok(Box::new(GuestCollaborator::new(bus, config)))
    }

    fn sidebar(
        &self,
        _document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        _guest: &dyn Collaborator,
        config: &SidebarConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        Ok(Box::new(SidebarCollaborator::new(bus, config)))
    }

    fn notebook(
        &self,
        _document: Arc<dyn Document>,
        bus: Arc<EventBus>,
        config: &NotebookConfig,
    ) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        Ok(Box::new(NotebookCollaborator::new(&bus, config)))
    }
}
