//! # Marginalia Test Suite
//!
//! Unified test crate covering cross-crate behavior:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bus_properties.rs   # Ordering, isolation, unsubscription
//!     └── frame_lifecycle.rs  # Role detection, gate, teardown
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p marginalia-tests
//!
//! # By category
//! cargo test -p marginalia-tests integration::bus_properties::
//! cargo test -p marginalia-tests integration::frame_lifecycle::
//! ```

#![allow(unused_imports)]

pub mod integration;
