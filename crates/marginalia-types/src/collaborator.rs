//! # Collaborator Contract
//!
//! Defines the lifecycle contract every collaborator (Guest, Sidebar,
//! Notebook) must implement to be owned by the frame coordinator.
//!
//! ## Ownership
//!
//! The coordinator exclusively owns collaborator handles for the lifetime of
//! the frame. No other component may construct or destroy them.
//!
//! ## Destroy Semantics
//!
//! `destroy()` is a capability, not an event: it may be invoked any number
//! of times. The first call releases resources; subsequent calls are no-ops.
//! The coordinator does not track invocation counts itself.

use serde::{Deserialize, Serialize};

/// The kinds of collaborator the coordinator can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollaboratorKind {
    /// Anchoring/highlighting engine, present in every frame.
    Guest,
    /// Annotation list panel, host frames only.
    Sidebar,
    /// Secondary UI surface, host frames only.
    Notebook,
}

impl std::fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Sidebar => write!(f, "sidebar"),
            Self::Notebook => write!(f, "notebook"),
        }
    }
}

/// Lifecycle contract for coordinator-owned components.
///
/// Implementations must be `Send + Sync`; the coordinator destroys them from
/// an async task reacting to the external destroy signal.
pub trait Collaborator: Send + Sync {
    /// Which collaborator this is.
    fn kind(&self) -> CollaboratorKind;

    /// Tear down the collaborator.
    ///
    /// Idempotent: the first call performs the teardown, every later call
    /// is a safe no-op.
    fn destroy(&mut self);

    /// Whether `destroy` has already performed its work.
    fn is_destroyed(&self) -> bool;
}
