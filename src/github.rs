use crate::error::{LookupError, Result};
use crate::models::{Profile, RepositorySummary};
use crate::types::{GitHubRepo, GitHubUser};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("github-profile-lookup/", env!("CARGO_PKG_VERSION"));

/// Where profiles and repositories come from
#[ractor::async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fails with `LookupError::NotFound` when the user does not exist
    async fn fetch_profile(&self, username: &str) -> Result<Profile>;

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RepositorySummary>>;
}

#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(base_url.to_string()));
        }

        // No request timeout: only the debounce before a lookup is time-bounded
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(GitHubClient { client, base_url })
    }

    /// Builds `{base}/seg/seg/...`, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                debug!(%url, %status, "GitHub request succeeded");
                Ok(response)
            }
            reqwest::StatusCode::NOT_FOUND => {
                Err(LookupError::NotFound(format!("Resource not found: {}", url)))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                warn!(%url, %status, "GitHub request failed");
                Err(LookupError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.make_request(url).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        self.get_json(url).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let url = self.endpoint(&["users", username, "repos"])?;
        self.get_json(url).await
    }
}

#[ractor::async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        Ok(self.get_user(username).await?.into())
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        let repos = self.get_user_repos(username).await?;
        Ok(repos.into_iter().map(RepositorySummary::from).collect())
    }
}
