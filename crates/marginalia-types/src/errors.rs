//! # Error Types
//!
//! Defines error types used across the client runtime.

use crate::collaborator::CollaboratorKind;
use thiserror::Error;

/// Errors that can occur while constructing a collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator's constructor failed.
    #[error("Failed to construct {kind}: {reason}")]
    ConstructionFailed {
        /// Which collaborator failed.
        kind: CollaboratorKind,
        /// Constructor-reported failure reason.
        reason: String,
    },
}

/// Errors that can occur during frame bootstrap.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The sidebar anchor link is missing from the document.
    ///
    /// The anchor is the sole channel for the external destroy signal, so
    /// its absence is a fatal precondition failure. Not retried.
    #[error(
        "Sidebar link not found: no element with type=\"application/annotator+html\" \
         rel=\"sidebar\" in the document"
    )]
    SidebarLinkMissing,

    /// A collaborator failed to construct during assembly.
    #[error("Collaborator construction failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// The coordinator was asked to assemble a frame it already assembled.
    #[error("Frame already assembled: current phase is {phase}")]
    AlreadyAssembled {
        /// Phase the coordinator was in when re-assembly was attempted.
        phase: String,
    },
}
