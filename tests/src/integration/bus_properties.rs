//! # Bus Property Tests
//!
//! Delivery ordering, topic isolation, and handler failure isolation for
//! the shared event bus:
//!
//! 1. **Ordering**: handlers for one topic run in registration order
//! 2. **Isolation**: a topic's publish never reaches other topics
//! 3. **Containment**: a panicking handler does not break delivery
//! 4. **Re-entrancy**: handlers may publish and subscribe mid-dispatch

#[cfg(test)]
use marginalia_bus::{EventBus, EventPublisher};

#[cfg(test)]
use serde_json::{json, Value};

#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_is_delivery_order() {
        let bus = EventBus::new();
        let trace: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

        let t1 = Arc::clone(&trace);
        let _h1 = bus.subscribe("annotationsLoaded", move |_| t1.lock().unwrap().push("h1"));
        let t2 = Arc::clone(&trace);
        let _h2 = bus.subscribe("annotationsLoaded", move |_| t2.lock().unwrap().push("h2"));
        let t3 = Arc::clone(&trace);
        let _h3 = bus.subscribe("annotationsLoaded", move |_| t3.lock().unwrap().push("h3"));

        bus.publish("annotationsLoaded", Value::Null);

        assert_eq!(*trace.lock().unwrap(), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn other_topic_subscribers_never_fire() {
        let bus = EventBus::new();
        let trace: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

        let tx = Arc::clone(&trace);
        let _x = bus.subscribe("x", move |_| tx.lock().unwrap().push("x"));
        let ty = Arc::clone(&trace);
        let _y = bus.subscribe("y", move |_| ty.lock().unwrap().push("y"));

        bus.publish("x", Value::Null);

        assert_eq!(*trace.lock().unwrap(), vec!["x"]);
    }

    #[test]
    fn a_panicking_handler_is_contained() {
        let bus = EventBus::new();
        let trace: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

        let before = Arc::clone(&trace);
        let _h1 = bus.subscribe("x", move |_| before.lock().unwrap().push("before"));
        let _h2 = bus.subscribe("x", |_| panic!("broken listener"));
        let after = Arc::clone(&trace);
        let _h3 = bus.subscribe("x", move |_| after.lock().unwrap().push("after"));

        // publish itself must not panic
        let receivers = bus.publish("x", Value::Null);

        assert_eq!(receivers, 3);
        assert_eq!(*trace.lock().unwrap(), vec!["before", "after"]);
    }

    #[test]
    fn handler_can_subscribe_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let trace: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

        let bus_inner = Arc::clone(&bus);
        let trace_inner = Arc::clone(&trace);
        let late = Arc::new(Mutex::new(Vec::new()));
        let late_subs = Arc::clone(&late);
        let _h = bus.subscribe("first", move |_| {
            trace_inner.lock().unwrap().push("first");
            // Registering mid-dispatch must not deadlock; the new handler
            // only sees future publishes.
            let sub = bus_inner.subscribe("first", |_| {});
            late_subs.lock().unwrap().push(sub);
        });

        bus.publish("first", Value::Null);
        assert_eq!(*trace.lock().unwrap(), vec!["first"]);
        assert_eq!(bus.handler_count("first"), 2);
    }

    #[test]
    fn payloads_travel_untouched() {
        let bus = EventBus::new();
        let captured = Arc::new(Mutex::new(Value::Null));

        let captured_clone = Arc::clone(&captured);
        let _sub = bus.subscribe("annotationCreated", move |payload| {
            *captured_clone.lock().unwrap() = payload.clone();
        });

        bus.publish(
            "annotationCreated",
            json!({ "id": "a-9", "uri": "https://example.com/article" }),
        );

        assert_eq!(
            *captured.lock().unwrap(),
            json!({ "id": "a-9", "uri": "https://example.com/article" })
        );
    }

    #[test]
    fn dropping_a_subscription_mid_sequence_keeps_order_for_the_rest() {
        let bus = EventBus::new();
        let trace: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

        let t1 = Arc::clone(&trace);
        let sub1 = bus.subscribe("x", move |_| t1.lock().unwrap().push("h1"));
        let t2 = Arc::clone(&trace);
        let _sub2 = bus.subscribe("x", move |_| t2.lock().unwrap().push("h2"));
        let t3 = Arc::clone(&trace);
        let _sub3 = bus.subscribe("x", move |_| t3.lock().unwrap().push("h3"));

        drop(sub1);
        bus.publish("x", Value::Null);

        assert_eq!(*trace.lock().unwrap(), vec!["h2", "h3"]);
    }
}
