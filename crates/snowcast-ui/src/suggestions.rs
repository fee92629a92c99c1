//! Debounced city suggestions.
//!
//! Keystrokes arm a single debounce slot; every new keystroke cancels the
//! pending timer and arms a fresh one. Each arming gets a generation number
//! so that timer fires and search results from superseded keystrokes can be
//! recognised and dropped.

use std::time::Duration;

use snowcast_core::SuggestionsConfig;
use snowcast_weather::{LocationCandidate, WeatherError};
use tokio::task::JoinHandle;

/// Single-slot cancel-and-reschedule timer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Cancel whatever is pending and arm `on_fire` to run after the delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, on_fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        // Deadline is fixed now, not when the task is first polled
        let sleep = tokio::time::sleep(self.delay);
        self.pending = Some(tokio::spawn(async move {
            sleep.await;
            on_fire(generation);
        }));
        generation
    }

    /// Drop the pending timer and invalidate its generation
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The timer for `generation` has fired; the slot is empty again
    fn fired(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    /// Nothing armed
    Idle,
    /// A debounce timer is armed
    Pending,
}

/// What happened to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input too short: list hidden right away, nothing scheduled
    Hide,
    /// A search was armed under this generation
    Scheduled(u64),
}

/// What to do with the suggestion list after a search settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListUpdate {
    Show(Vec<String>),
    Hide,
    /// Results belong to a superseded keystroke
    Stale,
}

#[derive(Debug)]
pub struct SuggestionController {
    debouncer: Debouncer,
    min_query_chars: usize,
    limit: u32,
    candidates: Vec<LocationCandidate>,
}

impl SuggestionController {
    pub fn new(config: &SuggestionsConfig) -> Self {
        Self {
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            min_query_chars: config.min_query_chars,
            limit: config.limit,
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> SuggestionState {
        if self.debouncer.is_pending() {
            SuggestionState::Pending
        } else {
            SuggestionState::Idle
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        &self.candidates
    }

    /// React to a new input value.
    ///
    /// `on_fire` receives the generation and the trimmed query once the
    /// input has been quiet for the debounce delay.
    pub fn on_input<F>(&mut self, raw: &str, on_fire: F) -> InputOutcome
    where
        F: FnOnce(u64, String) + Send + 'static,
    {
        let query = raw.trim().to_string();
        if query.chars().count() < self.min_query_chars {
            self.debouncer.cancel();
            self.candidates.clear();
            return InputOutcome::Hide;
        }

        let generation = self
            .debouncer
            .schedule(move |generation| on_fire(generation, query));
        InputOutcome::Scheduled(generation)
    }

    /// The debounce timer fired. Returns whether a search should be issued.
    pub fn on_elapsed(&mut self, generation: u64) -> bool {
        self.debouncer.fired(generation)
    }

    /// Apply a finished search. Failures are logged and hide the list.
    pub fn on_results(
        &mut self,
        generation: u64,
        result: Result<Vec<LocationCandidate>, WeatherError>,
    ) -> ListUpdate {
        if !self.debouncer.is_current(generation) {
            tracing::debug!("Dropping suggestions for superseded input");
            return ListUpdate::Stale;
        }

        match result {
            Ok(candidates) if candidates.is_empty() => {
                self.candidates.clear();
                ListUpdate::Hide
            }
            Ok(candidates) => {
                let labels = candidates.iter().map(LocationCandidate::label).collect();
                self.candidates = candidates;
                ListUpdate::Show(labels)
            }
            Err(e) => {
                tracing::warn!("Suggestion lookup failed: {}", e);
                self.candidates.clear();
                ListUpdate::Hide
            }
        }
    }

    /// Take the candidate at `index` and close the list
    pub fn select(&mut self, index: usize) -> Option<LocationCandidate> {
        let candidate = self.candidates.get(index).cloned()?;
        self.debouncer.cancel();
        self.candidates.clear();
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn controller() -> SuggestionController {
        SuggestionController::new(&SuggestionsConfig::default())
    }

    fn candidate(name: &str) -> LocationCandidate {
        LocationCandidate {
            name: name.to_string(),
            admin_region: None,
            country: "Germany".to_string(),
            latitude: 48.1,
            longitude: 11.6,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_fires_once_after_delay() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for _ in 0..3 {
            let fired = fired.clone();
            debouncer.schedule(move |_| {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_hides_without_scheduling() {
        let mut suggestions = controller();
        let outcome = suggestions.on_input(" M ", |_, _| {});
        assert_eq!(outcome, InputOutcome::Hide);
        assert_eq!(suggestions.state(), SuggestionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_arms_timer() {
        let mut suggestions = controller();
        let outcome = suggestions.on_input("Mu", |_, _| {});
        assert!(matches!(outcome, InputOutcome::Scheduled(_)));
        assert_eq!(suggestions.state(), SuggestionState::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_input_invalidates_pending_results() {
        let mut suggestions = controller();
        let InputOutcome::Scheduled(generation) = suggestions.on_input("Mun", |_, _| {}) else {
            panic!("expected a scheduled search");
        };
        assert_eq!(suggestions.on_input("M", |_, _| {}), InputOutcome::Hide);

        assert!(!suggestions.on_elapsed(generation));
        let update = suggestions.on_results(generation, Ok(vec![candidate("Munich")]));
        assert_eq!(update, ListUpdate::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_show_labels_and_select_returns_bare_candidate() {
        let mut suggestions = controller();
        let InputOutcome::Scheduled(generation) = suggestions.on_input("Mun", |_, _| {}) else {
            panic!("expected a scheduled search");
        };
        assert!(suggestions.on_elapsed(generation));

        let update = suggestions.on_results(generation, Ok(vec![candidate("Munich")]));
        assert_eq!(update, ListUpdate::Show(vec!["Munich, Germany".to_string()]));

        let chosen = suggestions.select(0).unwrap();
        assert_eq!(chosen.name, "Munich");
        assert!(suggestions.candidates().is_empty());
        assert!(suggestions.select(0).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_or_failed_results_hide_list() {
        let mut suggestions = controller();
        let InputOutcome::Scheduled(generation) = suggestions.on_input("Qwx", |_, _| {}) else {
            panic!("expected a scheduled search");
        };
        assert_eq!(suggestions.on_results(generation, Ok(vec![])), ListUpdate::Hide);
        assert_eq!(
            suggestions.on_results(generation, Err(WeatherError::Parse("eof".into()))),
            ListUpdate::Hide
        );
    }
}
