//! Repository modules implementing CRUD operations for Tasklist entities.
//!
//! Each module adds methods to `TaskService` via `impl TaskService` blocks.

pub mod task;
