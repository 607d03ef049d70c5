//! # Event Bus
//!
//! Defines the publishing side of the event bus: a per-frame registry
//! mapping topic name to an ordered list of subscriber handlers.

use crate::subscriber::{HandlerId, Subscription};
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// A registered event handler. Invoked with the published payload.
pub type HandlerFn = dyn Fn(&Value) + Send + Sync;

/// One registry slot: handler plus the id used to remove it.
#[derive(Clone)]
pub(crate) struct HandlerEntry {
    pub(crate) id: HandlerId,
    pub(crate) handler: Arc<HandlerFn>,
}

/// Topic name -> ordered handler list, shared with subscription handles
/// so they can remove themselves on drop.
pub(crate) type HandlerRegistry = Arc<RwLock<HashMap<String, Vec<HandlerEntry>>>>;

/// Trait for publishing events to the bus.
///
/// This is the interface collaborators use to emit events for consumption
/// by other collaborators in the same frame.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to every handler currently subscribed to `topic`.
    ///
    /// Dispatch is synchronous and in registration order. Returns the
    /// number of handlers invoked.
    fn publish(&self, topic: &str, payload: Value) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-frame implementation of the event bus.
///
/// Subscribing never removes existing subscribers for the same topic;
/// publishing invokes all current subscribers for that topic, in
/// registration order, on the publisher's stack. No ordering guarantee is
/// made across different topics.
///
/// The handler list is cloned out of the lock before dispatch, so handlers
/// may publish further events or subscribe without deadlocking.
pub struct EventBus {
    /// Shared handler registry.
    registry: HandlerRegistry,

    /// Total events published.
    events_published: AtomicU64,
}

impl EventBus {
    /// Create a new, empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            events_published: AtomicU64::new(0),
        }
    }

    /// Subscribe a handler to a topic.
    ///
    /// Handlers accumulate: subscribing never replaces earlier handlers for
    /// the same topic, and invocation order follows registration order.
    ///
    /// Returns a [`Subscription`] handle; dropping it (or calling
    /// [`Subscription::unsubscribe`]) removes the handler.
    #[must_use]
    pub fn subscribe<F>(&self, topic: &str, handler: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = HandlerId::new();
        let entry = HandlerEntry {
            id,
            handler: Arc::new(handler),
        };

        {
            if let Ok(mut registry) = self.registry.write() {
                registry.entry(topic.to_string()).or_default().push(entry);
            }
        }

        debug!(topic, handler_id = %id, "New subscription created");

        Subscription::new(Arc::clone(&self.registry), topic.to_string(), id)
    }

    /// Remove a previously registered handler.
    ///
    /// A no-op if the handler is not present. Returns whether a handler
    /// was removed.
    pub fn unsubscribe(&self, topic: &str, id: HandlerId) -> bool {
        let Ok(mut registry) = self.registry.write() else {
            return false;
        };
        let Some(handlers) = registry.get_mut(topic) else {
            return false;
        };

        let before = handlers.len();
        handlers.retain(|entry| entry.id != id);
        let removed = handlers.len() < before;

        if handlers.is_empty() {
            registry.remove(topic);
        }
        removed
    }

    /// Get the number of handlers currently subscribed to a topic.
    #[must_use]
    pub fn handler_count(&self, topic: &str) -> usize {
        self.registry
            .read()
            .map(|registry| registry.get(topic).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for EventBus {
    fn publish(&self, topic: &str, payload: Value) -> usize {
        // Always increment counter (publish was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // Snapshot the handler list so dispatch runs without the lock held.
        // Handlers registered during dispatch see future publishes only.
        let handlers: Vec<HandlerEntry> = self
            .registry
            .read()
            .map(|registry| registry.get(topic).cloned().unwrap_or_default())
            .unwrap_or_default();

        if handlers.is_empty() {
            debug!(topic, "Event dropped (no subscribers)");
            return 0;
        }

        let mut invoked = 0;
        for entry in &handlers {
            let result = catch_unwind(AssertUnwindSafe(|| (entry.handler)(&payload)));
            invoked += 1;
            if result.is_err() {
                // Isolate the failure: one misbehaving handler must not
                // prevent delivery to the rest.
                warn!(topic, handler_id = %entry.id, "Handler panicked during dispatch");
            }
        }

        debug!(topic, receivers = invoked, "Event published");
        invoked
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
