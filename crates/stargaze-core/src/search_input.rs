// Debounced search box: keystrokes restart the timer, silence commits the query
use crate::search::{FetchClient, SearchEvent};
use crate::timer::OneShot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Default idle window before a query is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(3000);

/// Raw query text plus the pending commit timer
///
/// Every mutation that actually changes the text cancels the pending commit
/// and schedules a new one tagged with a fresh generation. When the timer
/// runs out it emits `SearchEvent::Started`, then spawns the fetch on its
/// own task so later keystrokes can't abort a request already in flight.
pub struct SearchInput {
    text: String,
    delay: Duration,
    client: Arc<dyn FetchClient>,
    events: UnboundedSender<SearchEvent>,
    timer: OneShot,
    generation: u64,
}

impl SearchInput {
    pub fn new(
        client: Arc<dyn FetchClient>,
        delay: Duration,
        events: UnboundedSender<SearchEvent>,
    ) -> Self {
        Self {
            text: String::new(),
            delay,
            client,
            events,
            timer: OneShot::new(),
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generation of the most recently scheduled commit
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.schedule();
        }
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
        self.schedule();
    }

    /// Backspace; does nothing on an empty box
    pub fn pop(&mut self) {
        if self.text.pop().is_some() {
            self.schedule();
        }
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// A commit is scheduled and hasn't fired yet
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Drop the pending commit without touching the text
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    fn schedule(&mut self) {
        self.generation += 1;

        let generation = self.generation;
        let query = self.text.clone();
        let client = Arc::clone(&self.client);
        let events = self.events.clone();

        debug!("Scheduling commit #{} in {:?}", generation, self.delay);
        self.timer.start(self.delay, async move {
            info!("Committing query {:?} (generation {})", query, generation);
            if events
                .send(SearchEvent::Started {
                    generation,
                    query: query.clone(),
                })
                .is_err()
            {
                return;
            }

            tokio::spawn(async move {
                let outcome = client.search(&query).await;
                let _ = events.send(SearchEvent::Finished { generation, outcome });
            });
        });
    }
}
