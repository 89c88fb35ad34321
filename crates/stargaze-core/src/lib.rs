// Search, pagination and favorites state - everything the screens draw from
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod pagination;
pub mod providers;
pub mod search;
pub mod search_input;
pub mod sort;
pub mod store;
pub mod timer;

pub use config::Config;
pub use error::Error;
pub use favorites::{FavoritesTracker, ToggleBehavior};
pub use models::{RepoSummary, SearchOutcome};
pub use pagination::{PageWindow, Paginator, NUMBERED_PAGES, PAGE_SIZE};
pub use search::{FetchClient, SearchEvent};
pub use search_input::SearchInput;
pub use sort::{SortDirection, SortKey, SortOrder};
pub use store::{ErrorBanner, ResultStore};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
