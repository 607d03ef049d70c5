//! # Marginalia Frame Runtime
//!
//! Entry point and lifecycle skeleton for the part of the annotation client
//! that runs inside a browsing frame.
//!
//! ## Frame Roles
//!
//! An annotation client instance has one **host** frame and zero or more
//! **guest** frames. The most common case is that the host frame, where the
//! client is initially loaded, is also the only guest frame.
//!
//! - **Host**: annotation capability plus the sidebar and notebook surfaces.
//! - **Guest**: annotation capability only.
//!
//! ## Assembly Flow
//!
//! ```text
//! document-ready gate resolves (once)
//!         │
//!         ▼
//! ┌─────────────────────┐   role = Host?   ┌─────────────────────┐
//! │  FrameCoordinator   │ ───────────────► │  Sidebar, Notebook  │
//! │  constructs Guest   │                  │  (host frames only) │
//! └─────────┬───────────┘                  └─────────────────────┘
//!           │ registers teardown on the sidebar anchor link
//!           ▼
//!       Active ── destroy signal ──► Destroyed (terminal)
//! ```
//!
//! All collaborators receive the same [`marginalia_bus::EventBus`] by
//! reference at construction time; none of them hold direct references to
//! each other.
//!
//! ## Modular Structure
//!
//! - `container/` - Scoped client configuration
//! - `ports/` - Traits the runtime coordinates against (document, factory)
//! - `adapters/` - In-memory document and reference collaborators
//! - `gate` - One-shot document-ready gate
//! - `coordinator` - Frame lifecycle coordinator

pub mod adapters;
pub mod container;
pub mod coordinator;
pub mod gate;
pub mod ports;

pub use container::{ClientConfig, ConfigError, ConfigScope};
pub use coordinator::{FrameCoordinator, FramePhase};
pub use gate::document_ready;
pub use ports::{CollaboratorFactory, Document, SidebarLink};
