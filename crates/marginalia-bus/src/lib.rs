//! # Marginalia Bus - Event Bus for In-Frame Communication
//!
//! The shared publish/subscribe channel handed by reference to every
//! collaborator in a frame, so they can communicate without holding direct
//! references to each other.
//!
//! ## Rules
//!
//! - All inter-collaborator communication goes via the bus ONLY
//! - The bus is injected at construction time, never looked up globally
//!
//! ## Dispatch Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │    Guest     │                    │   Sidebar    │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐           │
//!                  │  Event Bus   │           │
//!                  │              │ ──────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Dispatch is synchronous on the publisher's stack: every handler
//! registered for a topic runs before `publish` returns, in registration
//! order. Handlers for other topics are never invoked. A panicking handler
//! is isolated and logged; the remaining handlers still run.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod subscriber;
pub mod topics;

// Re-export main types
pub use bus::{EventBus, EventPublisher};
pub use subscriber::{HandlerId, Subscription};
