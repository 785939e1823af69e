use anyhow::Context;
use chrono::Local;
use tasklist_client::TaskApi;
use tasklist_client::form::TaskDraft;

use crate::cli::{EditArgs, GlobalFlags};
use crate::commands::{AppContext, submit_form};
use crate::output::output;

pub async fn run<A: TaskApi>(args: &EditArgs, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.board.refresh().await.context("failed to fetch tasks")?;
    let mut form = ctx.board.edit_form(&args.id, Local)?;
    form.edit_draft(|draft| apply_overrides(draft, args));
    let task = submit_form(ctx, &mut form).await?;
    output(&task, flags.format)
}

/// Replace only the fields given on the command line.
fn apply_overrides(draft: TaskDraft, args: &EditArgs) -> TaskDraft {
    let mut draft = draft;
    if let Some(title) = &args.title {
        draft = draft.with_title(title.as_str());
    }
    if let Some(description) = &args.description {
        draft = draft.with_description(description.as_str());
    }
    if args.clear_due {
        return draft.with_due_date("").with_due_time("");
    }
    if let Some(date) = &args.date {
        draft = draft.with_due_date(date.as_str());
    }
    if let Some(time) = &args.time {
        draft = draft.with_due_time(time.as_str());
    }
    draft
}
