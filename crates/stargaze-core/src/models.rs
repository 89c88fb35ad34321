use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of search results
///
/// Immutable once received; `id` is what favorites and selection key on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    /// GitHub handle of the owner
    pub owner: String,
    /// Repository name without the owner prefix
    pub title: String,
    pub stars: u32,
    /// When the repository was created
    pub timestamp: DateTime<Utc>,
    pub url: String,
    /// Owner avatar URL
    pub avatar: String,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl RepoSummary {
    /// `owner/title`, the way GitHub spells it
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.title)
    }
}

/// What a search hands back - exactly one of results or an error message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Repos(Vec<RepoSummary>),
    Failed(String),
}

impl SearchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

#[cfg(test)]
pub(crate) fn sample_repo(id: u64, title: &str, stars: u32) -> RepoSummary {
    use chrono::TimeZone;

    RepoSummary {
        id,
        owner: format!("owner{}", id),
        title: title.to_string(),
        stars,
        timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::days(id as i64),
        url: format!("https://github.com/owner{}/{}", id, title),
        avatar: format!("https://avatars.githubusercontent.com/u/{}", id),
        description: None,
        language: None,
    }
}

#[cfg(test)]
pub(crate) fn sample_repos(count: u64) -> Vec<RepoSummary> {
    (1..=count).map(|i| sample_repo(i, &format!("repo{}", i), i as u32)).collect()
}
