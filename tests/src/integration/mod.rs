//! Cross-crate integration tests.

pub mod bus_properties;
pub mod frame_lifecycle;
