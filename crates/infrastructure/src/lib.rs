//! SubManager Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest gateway to the backend,
//! the file-backed token store, configuration loading and the system clock.

pub mod adapters;
mod api;
pub mod config;
pub mod persistence;

pub use adapters::{BackendClient, SystemClock};
pub use config::{AppConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use persistence::FileTokenStore;
