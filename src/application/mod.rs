//! Application layer - use cases and services

mod tracker_registry;

pub use tracker_registry::{TrackerDeps, TrackerRegistry};
