//! # tasklist-client
//!
//! Everything a Tasklist front-end needs above the wire:
//! - [`api::TaskApi`], implemented over HTTP ([`http::HttpTaskApi`]) and
//!   in-process over the task service ([`local`])
//! - the create/edit form controller ([`form`])
//! - the filtered list view-model ([`view`])
//! - the undo confirmation state machine ([`confirm`])
//! - notifications emitted after every mutation ([`notify`])
//! - [`board::TaskBoard`], which routes user actions and keeps the shared
//!   task snapshot fresh, and [`poller::RefreshPoller`], its background
//!   refresh task, both writing into a shared [`snapshot::TaskSnapshot`]

pub mod api;
pub mod board;
pub mod confirm;
pub mod error;
pub mod form;
pub mod http;
pub mod local;
pub mod notify;
pub mod poller;
pub mod snapshot;
pub mod view;

#[cfg(test)]
mod test_support;

pub use api::TaskApi;
pub use error::ClientError;
