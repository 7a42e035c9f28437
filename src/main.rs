use anyhow::Context;
use clap::Parser;
use colored::*;
use github_profile_lookup::actors::{SearchController, SearchControllerConfig};
use github_profile_lookup::cli::Cli;
use github_profile_lookup::github::{GitHubClient, ProfileSource};
use github_profile_lookup::lookup::lookup;
use github_profile_lookup::models::{Query, ViewState};
use github_profile_lookup::render::render;
use github_profile_lookup::{report, tui};
use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli)?;

    let client = GitHubClient::new(&cli.api_url)
        .with_context(|| format!("Failed to create GitHub client for {}", cli.api_url))?;
    let source: Arc<dyn ProfileSource> = Arc::new(client);

    match cli.user.as_deref() {
        Some(username) => run_once(source, username, cli.repo_limit).await,
        None => run_interactive(source, &cli).await,
    }
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cli.user.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    // Anything written to the terminal would tear the interactive view
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

async fn run_once(source: Arc<dyn ProfileSource>, username: &str, repo_limit: usize) -> anyhow::Result<()> {
    let state = lookup(source.as_ref(), &Query::new(username), repo_limit).await;
    report::print_view(&render(&state));

    match state {
        ViewState::Error(kind) => anyhow::bail!("Lookup for {} failed: {:?}", username.trim(), kind),
        ViewState::Idle => anyhow::bail!("{}", "Username must not be empty".red()),
        _ => Ok(()),
    }
}

async fn run_interactive(source: Arc<dyn ProfileSource>, cli: &Cli) -> anyhow::Result<()> {
    let config = SearchControllerConfig {
        debounce: Duration::from_millis(cli.debounce_ms),
        repo_limit: cli.repo_limit,
    };

    let (controller, views) = SearchController::spawn_with_view(source, config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start search controller: {}", e))?;

    let result = tui::run(controller.clone(), views).await;

    controller.stop(None);
    info!("Shutting down");
    result
}
