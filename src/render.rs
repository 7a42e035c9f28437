//! Pure projection from [`ViewState`] to a tree of typed UI nodes.
//!
//! Nothing in here touches the terminal; [`crate::tui`] and [`crate::report`]
//! apply a [`View`] to their respective surfaces.

use crate::models::{ErrorKind, Profile, RepositorySummary, ViewState};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NOT_FOUND_MESSAGE: &str = "❌ User not found";
pub const NETWORK_ERROR_MESSAGE: &str = "⚠️ Network error. Please try again.";
pub const REPOSITORY_HEADING: &str = "Repositories";

/// Everything the rendering surface shows besides the input field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub status: String,
    /// `None` means the profile panel is hidden
    pub profile: Option<ProfilePanel>,
    pub repositories: Vec<RepositoryItem>,
    pub heading_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePanel {
    pub overview: String,
    pub name: String,
    pub avatar: Image,
    pub location: Option<String>,
    pub website: Option<Link>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryItem {
    pub link: Link,
    pub language: String,
}

pub fn render(state: &ViewState) -> View {
    match state {
        ViewState::Idle => View::default(),
        ViewState::Loading => View {
            status: LOADING_MESSAGE.to_string(),
            ..View::default()
        },
        ViewState::Loaded { profile, repositories, .. } => View {
            status: String::new(),
            profile: Some(profile_panel(profile)),
            repositories: repositories.iter().map(repository_item).collect(),
            heading_visible: state.heading_visible(),
        },
        ViewState::Error(kind) => View {
            status: error_message(*kind).to_string(),
            ..View::default()
        },
    }
}

pub fn error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => NOT_FOUND_MESSAGE,
        ErrorKind::Network => NETWORK_ERROR_MESSAGE,
    }
}

fn profile_panel(profile: &Profile) -> ProfilePanel {
    let name = profile.display_name().to_string();

    ProfilePanel {
        overview: format!("Overview for {}", name),
        avatar: Image {
            src: profile.avatar_url.clone(),
            alt: profile.login.clone(),
        },
        location: profile.location.clone(),
        website: profile.website.as_ref().map(|blog| Link {
            text: blog.clone(),
            href: blog.clone(),
        }),
        stats: vec![
            Stat { label: "Followers", value: profile.followers.to_string() },
            Stat { label: "Following", value: profile.following.to_string() },
            Stat { label: "Public Repos", value: profile.public_repos.to_string() },
            Stat { label: "Public Gists", value: profile.public_gists.to_string() },
        ],
        name,
    }
}

fn repository_item(repo: &RepositorySummary) -> RepositoryItem {
    RepositoryItem {
        link: Link {
            text: repo.name.clone(),
            href: repo.html_url.clone(),
        },
        language: repo.language_label().to_string(),
    }
}
