use anyhow::Context;
use tasklist_client::TaskApi;

use crate::cli::GlobalFlags;
use crate::commands::AppContext;
use crate::output::output;
use crate::ui;

pub async fn run_done<A: TaskApi>(id: &str, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx.board.mark_done(id).await?;
    output(&task, flags.format)
}

pub async fn run_undo<A: TaskApi>(
    id: &str,
    yes: bool,
    ctx: &mut AppContext<A>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.board.refresh().await.context("failed to fetch tasks")?;
    ctx.board.request_undo(id)?;

    let title = ctx
        .board
        .snapshot()
        .find(id)
        .map_or_else(|| id.to_string(), |task| task.title);
    let confirmed = yes || ui::confirm(&format!("Mark \"{title}\" as not done?"))?;
    if !confirmed {
        ctx.board.cancel_undo();
        if !flags.quiet {
            eprintln!("Undo cancelled.");
        }
        return Ok(());
    }

    let task = ctx
        .board
        .confirm_undo()
        .await
        .context("no undo was pending")??;
    output(&task, flags.format)
}
