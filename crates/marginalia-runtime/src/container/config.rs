//! # Client Configuration
//!
//! Unified configuration for the frame runtime and its collaborators,
//! fetched per consumer scope.
//!
//! ## Scoping
//!
//! Each collaborator gets a view of the configuration scoped to its name
//! ("annotator", "sidebar", "notebook"). The notebook scope clears any
//! direct-linked annotation ids so they cannot filter the notebook's
//! threads.

use std::env;
use tracing::{info, warn};

/// Complete client configuration for one frame.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Annotator (guest) configuration.
    pub annotator: AnnotatorConfig,
    /// Sidebar configuration.
    pub sidebar: SidebarConfig,
    /// Notebook configuration.
    pub notebook: NotebookConfig,
}

/// Named configuration consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// The annotation engine present in every frame.
    Annotator,
    /// The sidebar panel, host frames only.
    Sidebar,
    /// The notebook surface, host frames only.
    Notebook,
}

/// A configuration view scoped to one consumer.
#[derive(Debug, Clone)]
pub enum ScopedConfig {
    /// Annotator scope.
    Annotator(AnnotatorConfig),
    /// Sidebar scope.
    Sidebar(SidebarConfig),
    /// Notebook scope.
    Notebook(NotebookConfig),
}

impl ClientConfig {
    /// Fetch the configuration for a named consumer.
    ///
    /// The notebook view is returned with direct-linked annotation ids
    /// cleared, so a direct link cannot filter the notebook's threads.
    #[must_use]
    pub fn scoped(&self, scope: ConfigScope) -> ScopedConfig {
        match scope {
            ConfigScope::Annotator => ScopedConfig::Annotator(self.annotator_config()),
            ConfigScope::Sidebar => ScopedConfig::Sidebar(self.sidebar_config()),
            ConfigScope::Notebook => ScopedConfig::Notebook(self.notebook_config()),
        }
    }

    /// The annotator scope's view.
    #[must_use]
    pub fn annotator_config(&self) -> AnnotatorConfig {
        self.annotator.clone()
    }

    /// The sidebar scope's view.
    #[must_use]
    pub fn sidebar_config(&self) -> SidebarConfig {
        self.sidebar.clone()
    }

    /// The notebook scope's view, with direct-linked annotation ids
    /// cleared.
    #[must_use]
    pub fn notebook_config(&self) -> NotebookConfig {
        let mut notebook = self.notebook.clone();
        notebook.direct_linked_ids.clear();
        notebook
    }

    /// Load configuration from the environment over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(id) = env::var("MARGINALIA_SUB_FRAME_ID") {
            if id.is_empty() {
                warn!("MARGINALIA_SUB_FRAME_ID is set but empty, ignoring");
            } else {
                info!(sub_frame_id = %id, "Frame configured as guest");
                config.annotator.sub_frame_identifier = Some(id);
            }
        }
        if let Ok(url) = env::var("MARGINALIA_SIDEBAR_APP_URL") {
            config.sidebar.app_url = url;
        }
        if let Ok(url) = env::var("MARGINALIA_NOTEBOOK_APP_URL") {
            config.notebook.app_url = url;
        }

        config
    }

    /// Validate the configuration before bootstrap.
    ///
    /// # Returns
    ///
    /// Returns `Err` if a UI surface URL is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sidebar.app_url.is_empty() {
            return Err(ConfigError::EmptyAppUrl { scope: "sidebar" });
        }
        if self.notebook.app_url.is_empty() {
            return Err(ConfigError::EmptyAppUrl { scope: "notebook" });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A UI surface was configured with an empty application URL.
    EmptyAppUrl {
        /// Which scope carried the empty URL.
        scope: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyAppUrl { scope } => {
                write!(f, "Empty app URL for {scope} scope")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Annotator-scoped configuration.
///
/// The coordinator inspects `sub_frame_identifier` only (presence means the
/// frame is a guest); the rest is opaque to it.
#[derive(Debug, Clone, Default)]
pub struct AnnotatorConfig {
    /// Identifier assigned to embedded guest frames. Absent in the host.
    pub sub_frame_identifier: Option<String>,
}

/// Sidebar-scoped configuration.
#[derive(Debug, Clone)]
pub struct SidebarConfig {
    /// URL of the sidebar application document.
    pub app_url: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            app_url: "https://marginalia.example/app/sidebar.html".to_string(),
        }
    }
}

/// Notebook-scoped configuration.
#[derive(Debug, Clone)]
pub struct NotebookConfig {
    /// URL of the notebook application document.
    pub app_url: String,
    /// Annotation ids from a direct link. Cleared in the notebook's scoped
    /// view so they cannot filter its threads.
    pub direct_linked_ids: Vec<String>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            app_url: "https://marginalia.example/app/notebook.html".to_string(),
            direct_linked_ids: Vec::new(),
        }
    }
}
