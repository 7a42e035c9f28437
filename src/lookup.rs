use crate::github::ProfileSource;
use crate::models::{Query, ViewState};
use tracing::{debug, info, warn};

/// Runs one lookup attempt and returns the state to render.
///
/// The repository fetch is only issued once the profile fetch succeeded, and
/// a failing repository fetch degrades to an empty list instead of an error.
pub async fn lookup<S>(source: &S, query: &Query, repo_limit: usize) -> ViewState
where
    S: ProfileSource + ?Sized,
{
    if query.is_empty() {
        return ViewState::Idle;
    }
    let username = query.as_str();

    let profile = match source.fetch_profile(username).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(username, error = %e, "Profile lookup failed");
            return ViewState::Error(e.kind());
        }
    };

    let repositories = match source.fetch_repositories(username).await {
        Ok(repositories) => repositories,
        Err(e) => {
            warn!(username, error = %e, "Repository lookup failed, showing none");
            Vec::new()
        }
    };

    debug!(username, repositories = repositories.len(), "Lookup finished");
    info!("Loaded profile for {}", profile.login);

    ViewState::loaded(profile, repositories, repo_limit)
}
