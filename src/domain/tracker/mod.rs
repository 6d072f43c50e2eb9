//! Tracker domain - per-product tracking cycle and notification decisions

pub mod notification;

mod product_tracker;

pub use product_tracker::ProductTracker;
