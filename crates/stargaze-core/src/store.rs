// Central search state: results, loading flag, error banner, selection
use crate::models::{RepoSummary, SearchOutcome};
use crate::sort::SortOrder;
use tracing::{debug, info, warn};

/// Default lifetime of an error banner
pub const DEFAULT_ERROR_CLEAR: std::time::Duration = std::time::Duration::from_millis(1500);

/// A transient error message, tagged so expiry timers can't clear the wrong one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<RepoSummary>,
    loading: bool,
    error: Option<ErrorBanner>,
    selected: Option<RepoSummary>,
    latest_generation: u64,
    next_error_id: u64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[RepoSummary] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn selected(&self) -> Option<&RepoSummary> {
        self.selected.as_ref()
    }

    /// A commit went out; newer generations supersede older ones
    pub fn begin_search(&mut self, generation: u64) {
        self.latest_generation = self.latest_generation.max(generation);
        self.loading = true;
    }

    /// Whether a response for `generation` would still be applied
    pub fn is_current(&self, generation: u64) -> bool {
        generation >= self.latest_generation
    }

    /// Fold a finished search into the store
    ///
    /// Returns the id of a newly raised error banner so the caller can
    /// schedule its expiry. Responses older than the latest commit are
    /// dropped without touching anything, loading flag included.
    pub fn apply(&mut self, generation: u64, outcome: SearchOutcome) -> Option<u64> {
        if generation < self.latest_generation {
            debug!(
                "Discarding stale response #{} (latest is #{})",
                generation, self.latest_generation
            );
            return None;
        }

        self.loading = false;

        match outcome {
            SearchOutcome::Repos(repos) => {
                info!("Search #{} returned {} repositories", generation, repos.len());
                self.results = repos;
                None
            }
            SearchOutcome::Failed(message) => {
                warn!("Search #{} failed: {}", generation, message);
                self.next_error_id += 1;
                let id = self.next_error_id;
                self.error = Some(ErrorBanner { id, message });
                Some(id)
            }
        }
    }

    /// Auto-clear: only removes the banner this timer was armed for
    pub fn expire_error(&mut self, id: u64) -> bool {
        if self.error.as_ref().is_some_and(|e| e.id == id) {
            debug!("Error banner {} expired", id);
            self.error = None;
            true
        } else {
            false
        }
    }

    /// Manual dismissal
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Open the details panel for the row with `id`
    pub fn select(&mut self, id: u64) -> bool {
        match self.results.iter().find(|r| r.id == id) {
            Some(repo) => {
                self.selected = Some(repo.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Reorder the full result list and swap it in
    pub fn sort(&mut self, order: SortOrder) {
        let mut sorted = self.results.clone();
        order.apply(&mut sorted);
        self.results = sorted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_repo, sample_repos};
    use crate::sort::{SortDirection, SortKey};

    #[test]
    fn test_success_replaces_results_wholesale() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.apply(1, SearchOutcome::Repos(sample_repos(30)));
        assert_eq!(store.len(), 30);

        store.begin_search(2);
        assert!(store.is_loading());
        store.apply(2, SearchOutcome::Repos(vec![sample_repo(99, "react", 1)]));

        assert_eq!(store.results(), &[sample_repo(99, "react", 1)]);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_empty_payload_empties_results() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.apply(1, SearchOutcome::Repos(sample_repos(3)));
        store.begin_search(2);
        store.apply(2, SearchOutcome::Repos(Vec::new()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_error_sets_banner_and_keeps_results() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.apply(1, SearchOutcome::Repos(sample_repos(3)));

        store.begin_search(2);
        let id = store.apply(2, SearchOutcome::Failed("rate limited".into()));

        assert!(id.is_some());
        assert_eq!(store.error_message(), Some("rate limited"));
        assert!(!store.is_loading());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_stale_expiry_does_not_clear_newer_error() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        let first = store.apply(1, SearchOutcome::Failed("boom".into())).unwrap();
        store.begin_search(2);
        let second = store.apply(2, SearchOutcome::Failed("boom again".into())).unwrap();

        assert!(!store.expire_error(first));
        assert_eq!(store.error_message(), Some("boom again"));

        assert!(store.expire_error(second));
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_expiry_after_manual_dismiss_is_harmless() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        let id = store.apply(1, SearchOutcome::Failed("boom".into())).unwrap();
        store.dismiss_error();
        assert!(!store.expire_error(id));
    }

    #[test]
    fn test_out_of_order_responses_keep_latest() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.begin_search(2);

        // Newer lands first, then the older one straggles in
        store.apply(2, SearchOutcome::Repos(vec![sample_repo(2, "new", 1)]));
        store.apply(1, SearchOutcome::Repos(vec![sample_repo(1, "old", 1)]));

        assert_eq!(store.results()[0].title, "new");
    }

    #[test]
    fn test_stale_response_keeps_loading_flag() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.begin_search(2);

        assert_eq!(store.apply(1, SearchOutcome::Failed("old".into())), None);
        assert!(store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_selection_survives_new_search() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.apply(1, SearchOutcome::Repos(sample_repos(5)));

        assert!(store.select(3));
        assert!(!store.select(42));
        assert_eq!(store.selected().map(|r| r.id), Some(3));

        store.begin_search(2);
        store.apply(2, SearchOutcome::Repos(Vec::new()));
        assert_eq!(store.selected().map(|r| r.id), Some(3));

        store.close_details();
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_sort_replaces_order() {
        let mut store = ResultStore::new();
        store.begin_search(1);
        store.apply(1, SearchOutcome::Repos(sample_repos(4)));

        store.sort(SortOrder::new(SortKey::Stars, SortDirection::Descending));
        let ids: Vec<u64> = store.results().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }
}
