use crate::models::SearchOutcome;

/// Anything that can turn a query into search results
///
/// Implementations must not fail past this boundary: every problem is
/// folded into `SearchOutcome::Failed` with a human readable message.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FetchClient: Send + Sync {
    async fn search(&self, query: &str) -> SearchOutcome;
}

/// Messages flowing from background tasks back to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The debounce window elapsed and a fetch is underway
    Started { generation: u64, query: String },
    /// The fetch for `generation` came back
    Finished { generation: u64, outcome: SearchOutcome },
    /// The auto-clear delay for error banner `id` ran out
    ErrorExpired { id: u64 },
}
