//! # Domain Entities
//!
//! Core value types for frame-role detection and document readiness.

use serde::{Deserialize, Serialize};

/// Attribute marking a DOM node as injected by the boot mechanism.
///
/// Teardown removes every node carrying this marker, regardless of tag.
pub const ASSET_MARKER_ATTR: &str = "data-marginalia-asset";

/// `type` attribute identifying the sidebar anchor link.
pub const SIDEBAR_LINK_TYPE: &str = "application/annotator+html";

/// `rel` attribute identifying the sidebar anchor link.
pub const SIDEBAR_LINK_REL: &str = "sidebar";

/// Role a browsing frame assumes, computed once at startup.
///
/// A **host** frame owns the sidebar and notebook UI in addition to
/// annotation capability. A **guest** frame carries annotation capability
/// only. No other roles exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameRole {
    /// Frame that owns the sidebar and notebook surfaces.
    Host,
    /// Embedded frame with annotation capability only.
    Guest,
}

impl FrameRole {
    /// Derive the role from the annotator-scoped sub-frame identifier.
    ///
    /// A frame is the host iff no sub-frame identifier was assigned to it.
    #[must_use]
    pub fn from_sub_frame_identifier(sub_frame_identifier: Option<&str>) -> Self {
        match sub_frame_identifier {
            None => Self::Host,
            Some(_) => Self::Guest,
        }
    }

    /// Whether this frame owns the sidebar and notebook surfaces.
    #[must_use]
    pub fn is_host(self) -> bool {
        matches!(self, Self::Host)
    }
}

impl std::fmt::Display for FrameRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

/// Readiness phase of the hosting document.
///
/// Mirrors the document lifecycle: `Loading` during the initial parse,
/// `Interactive` once the parse finishes, `Complete` once subresources
/// have loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyState {
    /// Document is still being parsed.
    Loading,
    /// Initial parse finished; subresources may still be loading.
    Interactive,
    /// Document and subresources fully loaded.
    Complete,
}

impl ReadyState {
    /// Whether the document is still in its initial parse.
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Interactive => write!(f, "interactive"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
