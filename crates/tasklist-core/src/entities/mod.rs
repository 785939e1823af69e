//! Entity structs for Tasklist domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip over the
//! RPC layer and schema validation.

mod task;

pub use task::Task;
