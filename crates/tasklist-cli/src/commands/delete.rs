use tasklist_client::TaskApi;
use tasklist_core::responses::DeleteResponse;

use crate::cli::GlobalFlags;
use crate::commands::AppContext;
use crate::output::output;

pub async fn run<A: TaskApi>(id: &str, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.board.delete(id).await?;
    output(&DeleteResponse { deleted: true }, flags.format)
}
