//! # Client Configuration Container
//!
//! Scoped configuration for the frame runtime. The coordinator reads one
//! field only (the annotator scope's sub-frame identifier); everything else
//! is passed through opaquely to the collaborator constructors.

pub mod config;

pub use config::{
    AnnotatorConfig, ClientConfig, ConfigError, ConfigScope, NotebookConfig, ScopedConfig,
    SidebarConfig,
};
