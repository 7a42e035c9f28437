use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "github-profile-lookup")]
#[command(about = "Look up GitHub user profiles and their repositories as you type")]
#[command(version)]
pub struct Cli {
    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Quiet period after the last keystroke before a lookup starts, in milliseconds
    #[arg(long, env = "LOOKUP_DEBOUNCE_MS", default_value_t = 500)]
    pub debounce_ms: u64,

    /// Number of repositories to display
    #[arg(long, env = "LOOKUP_REPO_LIMIT", default_value_t = 6)]
    pub repo_limit: usize,

    /// Write logs to this file (the interactive view is otherwise silent)
    #[arg(long, env = "LOOKUP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Look up a single user, print the result and exit
    #[arg(long, short)]
    pub user: Option<String>,
}
