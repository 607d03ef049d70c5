//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::bus::HandlerRegistry;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Opaque identifier for a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    /// Create a fresh handler id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HandlerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A subscription handle for a registered handler.
///
/// When dropped, the handler is automatically removed from the bus.
pub struct Subscription {
    /// Shared handler registry (for removal).
    registry: HandlerRegistry,

    /// Topic this subscription is registered under.
    topic: String,

    /// Id of the registered handler.
    id: HandlerId,

    /// Whether the handler is still registered.
    active: bool,
}

impl Subscription {
    pub(crate) fn new(registry: HandlerRegistry, topic: String, id: HandlerId) -> Self {
        Self {
            registry,
            topic,
            id,
            active: true,
        }
    }

    /// Get the topic this subscription listens on.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Get the registered handler's id.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Remove the handler from the bus.
    ///
    /// Idempotent: removing an already removed handler is a no-op.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let Ok(mut registry) = self.registry.write() else {
            return;
        };
        let Some(handlers) = registry.get_mut(&self.topic) else {
            return;
        };

        handlers.retain(|entry| entry.id != self.id);
        if handlers.is_empty() {
            registry.remove(&self.topic);
        }
        debug!(topic = %self.topic, handler_id = %self.id, "Subscription removed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
