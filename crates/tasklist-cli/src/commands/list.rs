use anyhow::Context;
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use tasklist_client::TaskApi;
use tasklist_client::view::{TaskListView, TaskRow};
use tasklist_core::entities::Task;
use tasklist_core::enums::StatusFilter;

use crate::cli::{GlobalFlags, ListArgs};
use crate::commands::AppContext;
use crate::commands::parse::parse_enum;
use crate::output::output;

/// One list line as printed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskListing {
    pub id: String,
    pub title: String,
    pub status: &'static str,
    pub due: Option<String>,
    pub description: Option<String>,
}

impl TaskListing {
    fn from_row<Tz>(row: &TaskRow<'_>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let status = if row.task.is_done {
            "done"
        } else if row.past_due {
            "overdue"
        } else {
            "open"
        };
        Self {
            id: row.task.id.clone(),
            title: row.task.title.clone(),
            status,
            due: row
                .task
                .due_date
                .map(|due| due.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()),
            description: row.task.description.clone(),
        }
    }
}

pub async fn run<A: TaskApi>(args: &ListArgs, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply_view_args(ctx.board.view_mut(), args)?;
    ctx.board.refresh().await.context("failed to fetch tasks")?;
    let listing = listing(ctx.board.view(), &ctx.board.tasks(), Utc::now(), &Local);
    output(&listing, flags.format)
}

/// Set search text and status filter from command-line arguments.
pub fn apply_view_args(view: &mut TaskListView, args: &ListArgs) -> anyhow::Result<()> {
    if let Some(search) = &args.search {
        view.set_search(search.as_str());
    }
    if let Some(filter) = &args.filter {
        view.set_filter(parse_enum::<StatusFilter>(filter, "filter")?);
    }
    Ok(())
}

/// Visible rows with deadlines rendered as wall-clock time in `tz`.
#[must_use]
pub fn listing<Tz>(view: &TaskListView, tasks: &[Task], now: DateTime<Utc>, tz: &Tz) -> Vec<TaskListing>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    view.rows_at(tasks, now)
        .iter()
        .map(|row| TaskListing::from_row(row, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono_tz::Europe::Berlin;
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap()
    }

    fn task(id: &str, title: &str, is_done: bool, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            due_date: due,
            is_done,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn status_column_reflects_done_and_past_due() {
        let tasks = vec![
            task("tsk-00000001", "late", false, Some(now() - Duration::hours(1))),
            task("tsk-00000002", "soon", false, Some(now() + Duration::hours(1))),
            task("tsk-00000003", "finished", true, Some(now() - Duration::hours(1))),
        ];
        let statuses: Vec<&str> = listing(&TaskListView::default(), &tasks, now(), &Utc)
            .iter()
            .map(|l| l.status)
            .collect();
        assert_eq!(statuses, vec!["overdue", "open", "done"]);
    }

    #[test]
    fn due_is_rendered_with_the_zone_offset_of_each_date() {
        let tasks = vec![
            task(
                "tsk-00000001",
                "winter call",
                false,
                Some(Utc.with_ymd_and_hms(2031, 1, 1, 23, 30, 0).unwrap()),
            ),
            task(
                "tsk-00000002",
                "summer call",
                false,
                Some(Utc.with_ymd_and_hms(2031, 7, 1, 23, 30, 0).unwrap()),
            ),
        ];
        let due: Vec<Option<String>> = listing(&TaskListView::default(), &tasks, now(), &Berlin)
            .into_iter()
            .map(|row| row.due)
            .collect();
        assert_eq!(
            due,
            vec![Some("2031-01-02 00:30".to_string()), Some("2031-07-02 01:30".to_string())]
        );
    }

    #[test]
    fn view_args_set_search_and_filter() {
        let mut view = TaskListView::default();
        apply_view_args(
            &mut view,
            &ListArgs {
                search: Some("milk".into()),
                filter: Some("done".into()),
            },
        )
        .unwrap();
        assert_eq!(view.search(), "milk");
        assert_eq!(view.filter(), StatusFilter::Done);
    }

    #[test]
    fn bad_filter_is_rejected() {
        let mut view = TaskListView::default();
        let args = ListArgs {
            search: None,
            filter: Some("someday".into()),
        };
        assert!(apply_view_args(&mut view, &args).is_err());
    }
}
