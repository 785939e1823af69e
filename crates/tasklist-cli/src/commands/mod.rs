use std::sync::Arc;

use tasklist_client::TaskApi;
use tasklist_client::board::TaskBoard;
use tasklist_client::form::{FormErrors, SubmitOutcome, TaskFormController};
use tasklist_config::TasklistConfig;
use tasklist_core::entities::Task;

use crate::cli::{Commands, GlobalFlags};
use crate::ui::TerminalNotifier;

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod parse;
pub mod watch;

/// Board plus configuration shared by every command.
pub struct AppContext<A: TaskApi> {
    pub board: TaskBoard<A, TerminalNotifier>,
    pub config: TasklistConfig,
}

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch<A>(
    command: Commands,
    api: Arc<A>,
    config: &TasklistConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    A: TaskApi + 'static,
{
    let mut ctx = AppContext {
        board: TaskBoard::new(api, Arc::new(TerminalNotifier::from_prefs())),
        config: config.clone(),
    };

    match command {
        Commands::Add(args) => add::run(&args, &mut ctx, flags).await,
        Commands::Edit(args) => edit::run(&args, &mut ctx, flags).await,
        Commands::List(args) => list::run(&args, &mut ctx, flags).await,
        Commands::Done { id } => done::run_done(&id, &mut ctx, flags).await,
        Commands::Undo { id, yes } => done::run_undo(&id, yes, &mut ctx, flags).await,
        Commands::Delete { id } => delete::run(&id, &mut ctx, flags).await,
        Commands::Watch(args) => watch::run(&args, &mut ctx, flags).await,
        Commands::Serve => anyhow::bail!("serve is handled before dispatch"),
    }
}

/// Submit a form through the board and turn its outcome into a result.
pub async fn submit_form<A: TaskApi>(
    ctx: &mut AppContext<A>,
    form: &mut TaskFormController,
) -> anyhow::Result<Task> {
    match ctx.board.submit_form(form).await {
        SubmitOutcome::Saved(task) => Ok(task),
        SubmitOutcome::Invalid(errors) => Err(invalid_form(&errors)),
        SubmitOutcome::Failed(error) => Err(anyhow::Error::new(error).context("task was not saved")),
    }
}

fn invalid_form(errors: &FormErrors) -> anyhow::Error {
    let details = errors
        .field_errors()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::anyhow!("invalid task: {details}")
}
