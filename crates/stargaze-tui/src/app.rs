// TUI application state and event handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use stargaze_core::{
    timer::fire_after, Config, FavoritesTracker, FetchClient, Paginator, RepoSummary,
    ResultStore, SearchEvent, SearchInput, SortOrder,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating results
    Searching, // Typing in search box
}

/// Side effects the runner performs on the app's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    OpenUrl(String),
}

/// One rendered cell of the result list
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub repo: &'a RepoSummary,
    pub is_favorite: bool,
    pub is_cursor: bool,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search: SearchInput,
    pub store: ResultStore,
    pub paginator: Paginator,
    pub favorites: FavoritesTracker,
    pub sort: SortOrder,
    /// Row index inside the visible window
    pub cursor: usize,
    pub list_state: ListState,
    /// Query of the latest committed search
    pub last_query: Option<String>,
    error_clear: Duration,
    events: UnboundedSender<SearchEvent>,
}

impl App {
    pub fn new(
        client: Arc<dyn FetchClient>,
        config: &Config,
        events: UnboundedSender<SearchEvent>,
    ) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            search: SearchInput::new(client, config.search.debounce(), events.clone()),
            store: ResultStore::new(),
            paginator: Paginator::new(),
            favorites: FavoritesTracker::new(config.favorites.toggle),
            sort: SortOrder::default(),
            cursor: 0,
            list_state,
            last_query: None,
            error_clear: config.search.error_clear(),
            events,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Background task results land here
    pub fn handle_search_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Started { generation, query } => {
                self.store.begin_search(generation);
                self.last_query = Some(query);
            }
            SearchEvent::Finished { generation, outcome } => {
                // A fresh list is shown as received; sorting is only ever explicit
                let fresh = !outcome.is_failure() && self.store.is_current(generation);
                if let Some(id) = self.store.apply(generation, outcome) {
                    fire_after(
                        self.error_clear,
                        self.events.clone(),
                        SearchEvent::ErrorExpired { id },
                    );
                }
                if fresh {
                    self.sort = SortOrder::default();
                }
                self.clamp_cursor();
            }
            SearchEvent::ErrorExpired { id } => {
                self.store.expire_error(id);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        match self.input_mode {
            InputMode::Searching => {
                match key.code {
                    KeyCode::Char(c) => self.search.push(c),
                    KeyCode::Backspace => self.search.pop(),
                    KeyCode::Esc | KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                        self.enter_normal_mode()
                    }
                    _ => {}
                }
                None
            }
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<AppAction> {
        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('i') => self.enter_search_mode(),
            KeyCode::Char('j') | KeyCode::Down => self.next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_row(),
            KeyCode::Enter => self.select_current(),
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                self.toggle_current_favorite();
            }
            KeyCode::Char('h') | KeyCode::Left => self.prev_page(),
            KeyCode::Char('l') | KeyCode::Right => self.next_page(),
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(page) = c.to_digit(10) {
                    self.jump_to_page(page as usize);
                }
            }
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('S') => self.flip_sort(),
            KeyCode::Char('x') => self.store.dismiss_error(),
            KeyCode::Esc => self.store.close_details(),
            KeyCode::Char('o') => {
                let url = self
                    .store
                    .selected()
                    .or_else(|| self.current_repo())
                    .map(|repo| repo.url.clone());
                return url.map(AppAction::OpenUrl);
            }
            _ => {}
        }
        None
    }

    /// Rows of the current page with their favorite flags
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        self.paginator
            .visible(self.store.results())
            .iter()
            .enumerate()
            .map(|(i, repo)| VisibleRow {
                repo,
                is_favorite: self.favorites.contains(repo.id),
                is_cursor: i == self.cursor,
            })
            .collect()
    }

    pub fn current_repo(&self) -> Option<&RepoSummary> {
        self.paginator.visible(self.store.results()).get(self.cursor)
    }

    pub fn next_row(&mut self) {
        let len = self.paginator.visible(self.store.results()).len();
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn previous_row(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn select_current(&mut self) {
        if let Some(id) = self.current_repo().map(|r| r.id) {
            self.store.select(id);
        }
    }

    pub fn toggle_current_favorite(&mut self) -> Option<bool> {
        let repo = self.current_repo()?;
        let (id, name) = (repo.id, repo.full_name());
        let now_favorite = self.favorites.toggle(id);
        info!("{} {}", if now_favorite { "Favorited" } else { "Unfavorited" }, name);
        Some(now_favorite)
    }

    pub fn prev_page(&mut self) {
        if self.paginator.prev() {
            self.reset_cursor();
        }
    }

    pub fn next_page(&mut self) {
        if self.paginator.next(self.store.len()) {
            self.reset_cursor();
        }
    }

    pub fn jump_to_page(&mut self, page: usize) {
        if self.paginator.jump_to(page) {
            self.reset_cursor();
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.cycle_key();
        debug!("Sorting by {}", self.sort);
        self.store.sort(self.sort);
    }

    pub fn flip_sort(&mut self) {
        self.sort = self.sort.flip();
        self.store.sort(self.sort);
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.list_state.select(Some(0));
    }

    fn clamp_cursor(&mut self) {
        let len = self.paginator.visible(self.store.results()).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.list_state.select(Some(self.cursor));
    }
}
