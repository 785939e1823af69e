//! # tasklist-server
//!
//! Exposes the five task procedures (plus `task.get` and a health probe)
//! as JSON over HTTP. Each procedure is a named route under `/rpc/`;
//! errors are mapped to `{code, message, details?}` bodies.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::router;
pub use server::{ServerError, bind_ephemeral, run, serve, shutdown_signal};
pub use state::AppState;
