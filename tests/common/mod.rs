#![allow(dead_code)]

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use github_profile_lookup::actors::{SearchControllerMessage, SearchStats};
use github_profile_lookup::error::{LookupError, Result};
use github_profile_lookup::github::ProfileSource;
use github_profile_lookup::models::{Profile, RepositorySummary, ViewState};
use ractor::{rpc::CallResult, ActorRef};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

/// In-memory profile source that records every profile lookup
#[derive(Default)]
pub struct FakeSource {
    profiles: HashMap<String, Profile>,
    repos: HashMap<String, Vec<RepositorySummary>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
    repo_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A user owning `repo_count` repositories named `repo-0`, `repo-1`, ...
    pub fn with_user(mut self, login: &str, repo_count: usize) -> Self {
        self.profiles.insert(login.to_string(), profile(login));
        let repos = (0..repo_count)
            .map(|i| RepositorySummary {
                name: format!("repo-{}", i),
                html_url: format!("https://github.com/{}/repo-{}", login, i),
                language: if i % 2 == 0 { Some("Rust".to_string()) } else { None },
            })
            .collect();
        self.repos.insert(login.to_string(), repos);
        self
    }

    /// A user whose repository listing fails
    pub fn with_broken_repos(mut self, login: &str) -> Self {
        self.profiles.insert(login.to_string(), profile(login));
        self
    }

    /// A user whose profile lookup fails with a non-404 error
    pub fn with_failure(mut self, login: &str) -> Self {
        self.failing.insert(login.to_string());
        self
    }

    pub fn with_delay(mut self, login: &str, delay: Duration) -> Self {
        self.delays.insert(login.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn repo_calls(&self) -> Vec<String> {
        self.repo_calls.lock().unwrap().clone()
    }
}

#[ractor::async_trait]
impl ProfileSource for FakeSource {
    async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        self.calls.lock().unwrap().push(username.to_string());

        if let Some(delay) = self.delays.get(username) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(username) {
            return Err(LookupError::ApiError("API request failed with status 500".to_string()));
        }

        self.profiles
            .get(username)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("Resource not found: /users/{}", username)))
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        self.repo_calls.lock().unwrap().push(username.to_string());

        self.repos
            .get(username)
            .cloned()
            .ok_or_else(|| LookupError::ApiError("API request failed with status 502".to_string()))
    }
}

pub fn profile(login: &str) -> Profile {
    Profile {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://github.com/{}.png", login),
        location: None,
        website: None,
        followers: 10,
        following: 1,
        public_repos: 9,
        public_gists: 0,
    }
}

pub async fn get_state(controller: &ActorRef<SearchControllerMessage>) -> ViewState {
    match controller
        .call(SearchControllerMessage::GetState, Some(Duration::from_secs(5)))
        .await
        .expect("Failed to query controller")
    {
        CallResult::Success(state) => state,
        _ => panic!("Expected success response"),
    }
}

pub async fn get_stats(controller: &ActorRef<SearchControllerMessage>) -> SearchStats {
    match controller
        .call(SearchControllerMessage::GetStats, Some(Duration::from_secs(5)))
        .await
        .expect("Failed to query controller")
    {
        CallResult::Success(stats) => stats,
        _ => panic!("Expected success response"),
    }
}

/// Waits until the published view state satisfies `predicate`
pub async fn wait_for_state<F>(views: &mut watch::Receiver<ViewState>, predicate: F) -> ViewState
where
    F: FnMut(&ViewState) -> bool,
{
    let state = tokio::time::timeout(Duration::from_secs(10), views.wait_for(predicate))
        .await
        .expect("Timed out waiting for view state")
        .expect("Controller stopped publishing");
    state.clone()
}

/// Serves a small subset of the GitHub users API on an ephemeral port
pub async fn spawn_fake_github() -> String {
    let app = Router::new()
        .route("/users/:username", get(user_handler))
        .route("/users/:username/repos", get(repos_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake GitHub API");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake GitHub API crashed");
    });

    format!("http://{}", addr)
}

async fn user_handler(Path(username): Path<String>) -> Response {
    let name = if username == "octocat" { json!("The Octocat") } else { json!(null) };

    match username.as_str() {
        "octocat" | "norepos" => Json(json!({
            "login": username.clone(),
            "id": 583231,
            "name": name,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "location": "San Francisco",
            "blog": "",
            "followers": 21000,
            "following": 9,
            "public_repos": 8,
            "public_gists": 8
        }))
        .into_response(),
        "garbled" => (StatusCode::OK, "<html>definitely not json</html>").into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

async fn repos_handler(Path(username): Path<String>) -> Response {
    if username != "octocat" {
        return (StatusCode::SERVICE_UNAVAILABLE, "unavailable").into_response();
    }

    let repos: Vec<_> = (0..9)
        .map(|i| {
            let language = if i == 0 { json!(null) } else { json!("Ruby") };
            json!({
                "id": i,
                "name": format!("repo-{}", i),
                "html_url": format!("https://github.com/octocat/repo-{}", i),
                "language": language,
                "stargazers_count": 1
            })
        })
        .collect();

    Json(repos).into_response()
}
