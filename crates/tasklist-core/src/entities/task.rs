use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A not-done task whose due date is strictly before `now`.
    ///
    /// Time-dependent: evaluate at render time, never store the result.
    #[must_use]
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        !self.is_done && self.due_date.is_some_and(|due| due < now)
    }

    /// Case-insensitive substring match against the title.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}
