use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tasklist_client::http::HttpTaskApi;
use tasklist_config::TasklistConfig;
use tasklist_db::service::TaskService;

mod cli;
mod commands;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tasklist error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = TasklistConfig::load_with_dotenv().context("failed to load tasklist configuration")?;

    if let cli::Commands::Serve = cli.command {
        return tasklist_server::run(&config)
            .await
            .context("tasklist server failed");
    }

    if flags.local {
        tracing::debug!(path = %config.database.path, "using local database");
        let service = TaskService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        commands::dispatch(cli.command, Arc::new(service), &config, &flags).await
    } else {
        let api = HttpTaskApi::from_config(&config.client).context("failed to build HTTP client")?;
        tracing::debug!(base_url = api.base_url(), "using task server");
        commands::dispatch(cli.command, Arc::new(api), &config, &flags).await
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKLIST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
