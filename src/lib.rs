//! Pricewatch - Amazon price tracking bot with Discord notifications
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::TrackerRegistry;
pub use domain::schedule::CronSchedule;
pub use domain::tracker::ProductTracker;
pub use infrastructure::store::JsonFileStore;
