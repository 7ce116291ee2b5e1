//! Application services
//!
//! Session storage and the startup connection to the remote tables.

mod connection;
mod session_store;

pub use connection::connect;
pub use session_store::SessionStore;
