use chrono::{Local, Utc};
use tasklist_client::TaskApi;

use crate::cli::{GlobalFlags, ListArgs, OutputFormat};
use crate::commands::AppContext;
use crate::commands::list::{apply_view_args, listing};
use crate::output::output;
use crate::ui;

/// Print the filtered list every time the background refresh publishes,
/// until Ctrl+C.
pub async fn run<A>(args: &ListArgs, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()>
where
    A: TaskApi + 'static,
{
    apply_view_args(ctx.board.view_mut(), args)?;

    let mut updates = ctx.board.snapshot().subscribe();
    let poller = ctx.board.start_polling(ctx.config.client.refresh_interval());
    let stop = tokio::signal::ctrl_c();
    tokio::pin!(stop);

    let clear_screen = flags.format == OutputFormat::Table && ui::prefs().table_color;
    let result = loop {
        tokio::select! {
            _ = &mut stop => break Ok(()),
            changed = updates.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let tasks = updates.borrow_and_update().clone();
                if clear_screen {
                    print!("\u{1b}[2J\u{1b}[H");
                }
                let rows = listing(ctx.board.view(), &tasks, Utc::now(), &Local);
                if let Err(error) = output(&rows, flags.format) {
                    break Err(error);
                }
            }
        }
    };

    poller.shutdown().await;
    result
}
