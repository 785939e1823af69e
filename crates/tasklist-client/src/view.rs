//! Derived list state: search, status filter and past-due marking.

use chrono::{DateTime, Utc};
use tasklist_core::entities::Task;
use tasklist_core::enums::StatusFilter;

/// One rendered list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub past_due: bool,
}

impl TaskRow<'_> {
    /// Only open tasks are editable.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        !self.task.is_done
    }

    /// Open tasks offer mark-done; done tasks offer undo.
    #[must_use]
    pub const fn can_mark_done(&self) -> bool {
        !self.task.is_done
    }
}

/// Search text and status filter applied over a task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListView {
    search: String,
    filter: StatusFilter,
}

impl TaskListView {
    #[must_use]
    pub fn new(search: impl Into<String>, filter: StatusFilter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    #[must_use]
    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub const fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Tasks passing search and filter, in the collection's order.
    #[must_use]
    pub fn visible<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| self.filter.matches(task, &self.search))
            .collect()
    }

    /// Visible tasks classified against `now`.
    #[must_use]
    pub fn rows_at<'a>(&self, tasks: &'a [Task], now: DateTime<Utc>) -> Vec<TaskRow<'a>> {
        self.visible(tasks)
            .into_iter()
            .map(|task| TaskRow {
                task,
                past_due: task.is_past_due(now),
            })
            .collect()
    }
}
