//! # Well-Known Topics
//!
//! Topic names for collaborator lifecycle events. Collaborators may publish
//! arbitrary topics; these are the ones the reference collaborators emit.

/// The guest finished binding to the frame's content.
pub const GUEST_READY: &str = "guestReady";

/// The sidebar panel was created in the host frame.
pub const SIDEBAR_OPENED: &str = "sidebarOpened";

/// The notebook surface was created in the host frame.
pub const NOTEBOOK_OPENED: &str = "notebookOpened";

/// The frame's collaborators were torn down.
pub const FRAME_DESTROYED: &str = "frameDestroyed";
