//! # Runtime Adapters
//!
//! Concrete implementations of the runtime ports: an in-memory document
//! model and the reference collaborators. The binary and the test suite run
//! against these; a browser embedding would supply its own.

pub mod collaborators;
pub mod document;

pub use collaborators::{
    DefaultCollaboratorFactory, GuestCollaborator, NotebookCollaborator, SidebarCollaborator,
};
pub use document::{InMemoryDocument, PageNode};
