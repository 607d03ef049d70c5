//! # Marginalia Types Crate
//!
//! This crate contains the domain types shared across the annotation client
//! runtime: frame roles, document readiness states, the collaborator
//! lifecycle contract, and bootstrap errors.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Explicit Role**: The frame's role is a closed two-variant enum
//!   computed once at startup, never a nullable field checked ad hoc.
//! - **Destroy as Capability**: `Collaborator::destroy` is callable any
//!   number of times; the first call performs work, later calls are no-ops.

pub mod collaborator;
pub mod entities;
pub mod errors;

pub use collaborator::{Collaborator, CollaboratorKind};
pub use entities::{FrameRole, ReadyState, ASSET_MARKER_ATTR, SIDEBAR_LINK_REL, SIDEBAR_LINK_TYPE};
pub use errors::{BootstrapError, CollaboratorError};
