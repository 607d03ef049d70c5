//! # In-Memory Document Adapter
//!
//! An in-process model of the page surface the runtime coordinates against:
//! a readiness state, a flat node list with attribute maps, and the sidebar
//! anchor link carrying the destroy channel.

use crate::ports::{Document, SidebarLink};
use marginalia_types::{ReadyState, ASSET_MARKER_ATTR, SIDEBAR_LINK_REL, SIDEBAR_LINK_TYPE};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::watch;
use tracing::debug;

/// A node in the in-memory document: a tag plus an attribute map.
#[derive(Debug, Clone)]
pub struct PageNode {
    /// Tag name ("link", "script", "style", ...).
    pub tag: String,
    /// Attribute name -> value.
    pub attrs: HashMap<String, String>,
}

impl PageNode {
    /// Create a node with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Whether the node carries an attribute, regardless of value.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// In-memory implementation of the [`Document`] port.
///
/// Starts in the `Loading` phase with an empty node list; tests and the
/// binary drive it through `set_ready_state`, `insert_asset` and the
/// sidebar link's destroy channel.
pub struct InMemoryDocument {
    /// Readiness broadcaster. Holding the sender keeps receivers alive.
    ready_tx: watch::Sender<ReadyState>,

    /// Flat node list standing in for the page's DOM.
    nodes: RwLock<Vec<PageNode>>,

    /// The anchor link handle, shared so every lookup returns the same
    /// destroy channel. `None` until the boot mechanism adds the link.
    link: RwLock<Option<SidebarLink>>,
}

impl InMemoryDocument {
    /// Create an empty document in the `Loading` phase.
    #[must_use]
    pub fn new() -> Self {
        let (ready_tx, _) = watch::channel(ReadyState::Loading);
        Self {
            ready_tx,
            nodes: RwLock::new(Vec::new()),
            link: RwLock::new(None),
        }
    }

    /// Builder: add the sidebar anchor link the boot script would inject.
    #[must_use]
    pub fn with_sidebar_link(self, href: impl Into<String>) -> Self {
        self.insert_sidebar_link(href);
        self
    }

    /// Add the sidebar anchor link to the document.
    pub fn insert_sidebar_link(&self, href: impl Into<String>) {
        let href = href.into();
        self.nodes.write().push(
            PageNode::new("link")
                .with_attr("type", SIDEBAR_LINK_TYPE)
                .with_attr("rel", SIDEBAR_LINK_REL)
                .with_attr("href", href.clone()),
        );
        *self.link.write() = Some(SidebarLink::new(href));
    }

    /// Add a node carrying the injected-asset marker.
    pub fn insert_asset(&self, tag: impl Into<String>) {
        self.nodes
            .write()
            .push(PageNode::new(tag).with_attr(ASSET_MARKER_ATTR, ""));
    }

    /// Add an arbitrary node.
    pub fn insert_node(&self, node: PageNode) {
        self.nodes.write().push(node);
    }

    /// Advance the document's readiness phase.
    pub fn set_ready_state(&self, state: ReadyState) {
        // send_replace records the state even when nobody is watching yet.
        let _ = self.ready_tx.send_replace(state);
    }

    /// Total node count, markers or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for InMemoryDocument {
    fn ready_state(&self) -> ReadyState {
        *self.ready_tx.borrow()
    }

    fn watch_ready_state(&self) -> watch::Receiver<ReadyState> {
        self.ready_tx.subscribe()
    }

    fn sidebar_link(&self) -> Option<SidebarLink> {
        // The link handle is only valid while the matching node is present.
        let nodes = self.nodes.read();
        let present = nodes.iter().any(|node| {
            node.tag == "link"
                && node.attr("type") == Some(SIDEBAR_LINK_TYPE)
                && node.attr("rel") == Some(SIDEBAR_LINK_REL)
        });
        if !present {
            return None;
        }
        self.link.read().clone()
    }

    fn remove_injected_assets(&self) -> usize {
        let mut nodes = self.nodes.write();
        let before = nodes.len();
        nodes.retain(|node| !node.has_attr(ASSET_MARKER_ATTR));
        let removed = before - nodes.len();
        if removed > 0 {
            debug!(removed, "Injected assets removed");
        }
        removed
    }

    fn injected_asset_count(&self) -> usize {
        self.nodes
            .read()
            .iter()
            .filter(|node| node.has_attr(ASSET_MARKER_ATTR))
            .count()
    }
}
