use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("stargaze/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Authentication failed")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise installs
    pub fn with_base_url(token: Option<String>, base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search repositories by name
    ///
    /// The query goes through untouched, empty string included. GitHub
    /// answers an empty `q` with a 422 which lands as `InvalidQuery`.
    pub async fn search_repositories(&self, query: &str, per_page: u32) -> Result<SearchResponse> {
        let url = format!("{}/search/repositories", self.base_url);

        let per_page = per_page.to_string();

        let mut request = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", per_page.as_str())]);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        debug!("GET {} q={:?} per_page={}", url, query, per_page);
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return parse_search_response(&body);
        }

        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);
        let body = response.text().await.unwrap_or_default();

        Err(classify_failure(status, rate_limited, &body))
    }
}

/// Parse the body of a successful `/search/repositories` response
pub fn parse_search_response(body: &str) -> Result<SearchResponse> {
    Ok(serde_json::from_str(body)?)
}

/// Turn a non-2xx response into the matching error variant
fn classify_failure(status: reqwest::StatusCode, rate_limited: bool, body: &str) -> GitHubError {
    use reqwest::StatusCode;

    match status {
        StatusCode::UNAUTHORIZED => GitHubError::AuthRequired,
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimitExceeded,
        StatusCode::FORBIDDEN if rate_limited => GitHubError::RateLimitExceeded,
        StatusCode::UNPROCESSABLE_ENTITY => GitHubError::InvalidQuery(error_message(body)),
        _ => GitHubError::RequestFailed(format!("Status {}: {}", status, error_message(body))),
    }
}

/// GitHub error bodies look like `{"message": "..."}`; fall back to the raw text
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    /// Absent on some partial responses, treated as no results
    #[serde(default)]
    pub items: Option<Vec<GitHubRepo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: GitHubOwner,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    const SAMPLE: &str = r#"{
        "total_count": 1,
        "incomplete_results": false,
        "items": [{
            "id": 10270250,
            "name": "react",
            "full_name": "facebook/react",
            "owner": {
                "login": "facebook",
                "avatar_url": "https://avatars.githubusercontent.com/u/69631?v=4"
            },
            "html_url": "https://github.com/facebook/react",
            "description": "The library for web and native user interfaces.",
            "stargazers_count": 230000,
            "language": "JavaScript",
            "created_at": "2013-05-24T16:15:54Z"
        }]
    }"#;

    #[test]
    fn test_parse_search_response() {
        let response = parse_search_response(SAMPLE).unwrap();
        let items = response.items.unwrap();

        assert_eq!(response.total_count, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 10270250);
        assert_eq!(items[0].owner.login, "facebook");
        assert_eq!(items[0].stargazers_count, 230000);
        assert_eq!(items[0].created_at.to_rfc3339(), "2013-05-24T16:15:54+00:00");
    }

    #[test]
    fn test_missing_items_is_none() {
        let response = parse_search_response(r#"{"total_count": 0}"#).unwrap();
        assert!(response.items.is_none());
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err = parse_search_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, GitHubError::ParseError(_)));
    }

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            classify_failure(StatusCode::UNAUTHORIZED, false, ""),
            GitHubError::AuthRequired
        ));
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, false, ""),
            GitHubError::RateLimitExceeded
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, true, ""),
            GitHubError::RateLimitExceeded
        ));
        // A 403 with quota left is just a forbidden request
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, false, "nope"),
            GitHubError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_validation_failure_keeps_github_message() {
        let body = r#"{"message": "Validation Failed", "errors": []}"#;
        let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, false, body);
        assert_eq!(err.to_string(), "Invalid search query: Validation Failed");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_base_url(None, "https://ghe.example.com/api/v3/".into()).unwrap();
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }
}
