// GitHub provider - bridges the API client with the FetchClient trait
use async_trait::async_trait;
use stargaze_api::{GitHubClient, GitHubRepo};
use tracing::warn;

use crate::{
    config::GitHubConfig,
    models::{RepoSummary, SearchOutcome},
    search::FetchClient,
    Error, Result,
};

/// Wrapper around GitHubClient that implements FetchClient
pub struct GitHubProvider {
    client: GitHubClient,
    per_page: u32,
}

impl GitHubProvider {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::from_config(&GitHubConfig {
            token,
            ..GitHubConfig::default()
        })
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(config.token.clone(), config.api_url.clone())
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(Self {
            client,
            per_page: config.per_page,
        })
    }
}

#[async_trait]
impl FetchClient for GitHubProvider {
    async fn search(&self, query: &str) -> SearchOutcome {
        match self.client.search_repositories(query, self.per_page).await {
            Ok(response) => SearchOutcome::Repos(
                response
                    .items
                    .unwrap_or_default()
                    .into_iter()
                    .map(github_to_summary)
                    .collect(),
            ),
            Err(e) => {
                warn!("GitHub search for {:?} failed: {}", query, e);
                SearchOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Convert a GitHub API repo to our RepoSummary
fn github_to_summary(gh: GitHubRepo) -> RepoSummary {
    RepoSummary {
        id: gh.id,
        owner: gh.owner.login,
        title: gh.name,
        stars: gh.stargazers_count,
        timestamp: gh.created_at,
        url: gh.html_url,
        avatar: gh.owner.avatar_url,
        description: gh.description,
        language: gh.language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_to_summary() {
        let body = r#"{
            "total_count": 1,
            "items": [{
                "id": 1,
                "name": "tokio",
                "full_name": "tokio-rs/tokio",
                "owner": {"login": "tokio-rs", "avatar_url": "https://avatars.example/tokio"},
                "html_url": "https://github.com/tokio-rs/tokio",
                "description": null,
                "stargazers_count": 27000,
                "language": "Rust",
                "created_at": "2016-09-09T21:32:52Z"
            }]
        }"#;
        let response = stargaze_api::github::parse_search_response(body).unwrap();
        let repo = github_to_summary(response.items.unwrap().remove(0));

        assert_eq!(repo.id, 1);
        assert_eq!(repo.owner, "tokio-rs");
        assert_eq!(repo.title, "tokio");
        assert_eq!(repo.stars, 27000);
        assert_eq!(repo.url, "https://github.com/tokio-rs/tokio");
        assert_eq!(repo.avatar, "https://avatars.example/tokio");
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.full_name(), "tokio-rs/tokio");
    }

    #[tokio::test]
    async fn test_request_error_folds_into_failure() {
        // Rejected while building the request, so nothing is dialed
        let provider = GitHubProvider::from_config(&GitHubConfig {
            api_url: "not a url".into(),
            ..GitHubConfig::default()
        })
        .unwrap();

        let outcome = provider.search("react").await;
        assert!(outcome.is_failure());
    }
}
