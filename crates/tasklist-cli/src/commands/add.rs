use chrono::Local;
use tasklist_client::TaskApi;
use tasklist_client::form::TaskDraft;

use crate::cli::{AddArgs, GlobalFlags};
use crate::commands::{AppContext, submit_form};
use crate::output::output;

pub async fn run<A: TaskApi>(args: &AddArgs, ctx: &mut AppContext<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut form = ctx.board.create_form(Local);
    form.set_draft(draft_from_args(args));
    let task = submit_form(ctx, &mut form).await?;
    output(&task, flags.format)
}

fn draft_from_args(args: &AddArgs) -> TaskDraft {
    TaskDraft::default()
        .with_title(args.title.as_str())
        .with_description(args.description.clone().unwrap_or_default())
        .with_due_date(args.date.clone().unwrap_or_default())
        .with_due_time(args.time.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_flags_become_empty_fields() {
        let args = AddArgs {
            title: "Buy milk".into(),
            description: None,
            date: Some("2099-01-01".into()),
            time: None,
        };
        assert_eq!(
            draft_from_args(&args),
            TaskDraft::default()
                .with_title("Buy milk")
                .with_due_date("2099-01-01")
        );
    }
}
