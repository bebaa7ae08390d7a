//! Session and access control for the SubManager client.
//!
//! This module provides:
//! - The session manager state machine
//! - An in-memory token store
//! - Guard-driven navigation with stale-response tickets

mod navigator;
mod session;
mod token_store;

pub use navigator::{Navigation, Navigator, ScreenTicket};
pub use session::{SessionError, SessionManager};
pub use token_store::MemoryTokenStore;
