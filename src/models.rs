use crate::types::{GitHubRepo, GitHubUser};

/// Placeholder shown for repositories without a detected language
pub const NO_LANGUAGE: &str = "No language specified";

/// Number of repositories shown when nothing else is configured
pub const DEFAULT_REPO_LIMIT: usize = 6;

/// A trimmed username. The empty query means "clear the results".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// User profile as shown in the profile panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub location: Option<String>,
    pub website: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
}

impl Profile {
    /// Display name if present and non-empty, login otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

impl From<GitHubUser> for Profile {
    fn from(user: GitHubUser) -> Self {
        Self {
            login: user.login,
            name: non_empty(user.name),
            avatar_url: user.avatar_url,
            location: non_empty(user.location),
            website: non_empty(user.blog),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            public_gists: user.public_gists,
        }
    }
}

/// Minimal repository projection for list display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    pub language: Option<String>,
}

impl RepositorySummary {
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or(NO_LANGUAGE)
    }
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            html_url: repo.html_url,
            language: non_empty(repo.language),
        }
    }
}

/// Why a lookup produced no profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    /// Non-404 API failures, transport failures and malformed responses
    Network,
}

/// What is currently rendered. Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded {
        profile: Profile,
        /// Already truncated to the display limit, in source order
        repositories: Vec<RepositorySummary>,
        /// Size of the collection before truncation
        total_repositories: usize,
    },
    Error(ErrorKind),
}

impl ViewState {
    pub fn loaded(profile: Profile, mut repositories: Vec<RepositorySummary>, limit: usize) -> Self {
        let total_repositories = repositories.len();
        repositories.truncate(limit);
        ViewState::Loaded {
            profile,
            repositories,
            total_repositories,
        }
    }

    /// The repository heading only shows when the user owns any repository
    pub fn heading_visible(&self) -> bool {
        matches!(self, ViewState::Loaded { total_repositories, .. } if *total_repositories > 0)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
