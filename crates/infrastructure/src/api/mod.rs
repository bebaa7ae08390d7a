//! Port implementations over [`BackendClient`](crate::adapters::BackendClient).
//!
//! One file per backend area. Each maps a port method to its endpoint; the
//! gateway rules live in the client.

mod auth;
mod notifications;
mod password_reset;
mod subscriptions;
mod users;
