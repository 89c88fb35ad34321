// GitHub API client - the only platform this app talks to
pub mod github;

// Re-export common types
pub use github::{GitHubClient, GitHubError, GitHubOwner, GitHubRepo, SearchResponse};
