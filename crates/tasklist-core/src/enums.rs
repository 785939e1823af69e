//! Enums shared between the RPC layer and the client view-model.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Task;

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

/// Completion-status filter applied to the task list on the client.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Done,
    Undone,
}

impl StatusFilter {
    /// Whether a task with the given completion state passes this filter.
    #[must_use]
    pub const fn admits(self, is_done: bool) -> bool {
        match self {
            Self::All => true,
            Self::Done => is_done,
            Self::Undone => !is_done,
        }
    }

    /// Combined predicate: title search match AND status filter.
    #[must_use]
    pub fn matches(self, task: &Task, search: &str) -> bool {
        task.title_matches(search) && self.admits(task.is_done)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::Undone => "undone",
        }
    }

    /// Capitalised label for the filter dropdown.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Done => "Done",
            Self::Undone => "Undone",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
