use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the task procedures over HTTP.
    Serve,
    /// Add a task.
    Add(AddArgs),
    /// Edit an open task. Omitted flags keep their current value.
    Edit(EditArgs),
    /// List tasks.
    List(ListArgs),
    /// Mark a task as done.
    Done { id: String },
    /// Mark a done task as not done, after confirmation.
    Undo {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a task permanently.
    Delete { id: String },
    /// Re-render the list whenever the background refresh sees a change.
    Watch(ListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Due date, `YYYY-MM-DD` (local time zone).
    #[arg(long)]
    pub date: Option<String>,
    /// Due time, `HH:MM` 24-hour (local time zone).
    #[arg(long)]
    pub time: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub time: Option<String>,
    /// Remove the deadline.
    #[arg(long, conflicts_with_all = ["date", "time"])]
    pub clear_due: bool,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive title substring.
    #[arg(long)]
    pub search: Option<String>,
    /// all, done or undone.
    #[arg(long)]
    pub filter: Option<String>,
}
