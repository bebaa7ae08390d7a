//! Adapters for the backend and the system.

mod backend_client;
mod system_clock;

pub use backend_client::BackendClient;
pub use system_clock::SystemClock;
