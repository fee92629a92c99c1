//! The widget session: one controller object owning the view, the
//! suggestion state and the event queue.
//!
//! Everything runs on the task that drives [`WidgetController::run`] (or
//! [`WidgetController::pump`]). Network calls and timers run as spawned tasks
//! and report back by posting a [`UiEvent`] to the controller's own queue.

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use snowcast_core::Config;
use snowcast_weather::{
    Coordinates, DeviceLocator, ForecastSource, LocationCandidate, LocationError, LocationSearch,
    WeatherError, WeatherReport,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::autolocate;
use crate::locale::Messages;
use crate::presenter::Presenter;
use crate::suggestions::{InputOutcome, ListUpdate, SuggestionController, SuggestionState};
use crate::view::View;

/// Everything the controller reacts to, from the user or from finished tasks
#[derive(Debug)]
pub enum UiEvent {
    /// The input field now holds this text
    InputChanged(String),
    /// The user picked the suggestion at this index
    SuggestionChosen(usize),
    /// The user asked for the weather of whatever is typed
    SubmitPressed,
    DebounceElapsed {
        generation: u64,
        query: String,
    },
    SuggestionsLoaded {
        generation: u64,
        result: Result<Vec<LocationCandidate>, WeatherError>,
    },
    PositionResolved(Result<Coordinates, LocationError>),
    WeatherLoaded {
        ticket: u64,
        place: String,
        result: Result<WeatherReport, WeatherError>,
    },
    /// A weather task is over, however it ended
    FetchSettled {
        ticket: u64,
    },
    Shutdown,
}

/// External collaborators of the widget
#[derive(Clone)]
pub struct Services {
    pub geocoder: Arc<dyn LocationSearch>,
    pub forecasts: Arc<dyn ForecastSource>,
    pub locator: Arc<dyn DeviceLocator>,
}

/// Cloneable sender for feeding user events into a running controller
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    events: UnboundedSender<UiEvent>,
}

impl ControllerHandle {
    /// Returns false once the controller is gone
    pub fn send(&self, event: UiEvent) -> bool {
        self.events.send(event).is_ok()
    }
}

/// Posts `FetchSettled` when dropped, so the loading indicator is released on
/// success, error, panic or abort alike.
struct SettleGuard {
    events: UnboundedSender<UiEvent>,
    ticket: u64,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let _ = self.events.send(UiEvent::FetchSettled {
            ticket: self.ticket,
        });
    }
}

pub struct WidgetController<V: View> {
    view: V,
    presenter: Presenter,
    suggestions: SuggestionController,
    services: Services,
    input: String,
    /// Ticket of the newest weather request; older results are discarded
    latest_ticket: u64,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
}

impl<V: View> WidgetController<V> {
    pub fn new(view: V, services: Services, config: &Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            view,
            presenter: Presenter::new(Messages::new(config.ui.language)),
            suggestions: SuggestionController::new(&config.suggestions),
            services,
            input: String::new(),
            latest_ticket: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            events: self.events_tx.clone(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestion_state(&self) -> SuggestionState {
        self.suggestions.state()
    }

    pub fn suggestion_candidates(&self) -> &[LocationCandidate] {
        self.suggestions.candidates()
    }

    /// Kick off the one-time autolocation attempt
    pub fn start(&mut self) {
        let messages = *self.presenter.messages();
        autolocate::begin(
            &mut self.view,
            &messages,
            self.services.locator.clone(),
            self.events_tx.clone(),
        );
    }

    /// Process events until `Shutdown`, then hand the view back
    pub async fn run(mut self) -> V {
        while let Some(event) = self.events_rx.recv().await {
            if self.dispatch(event).is_break() {
                break;
            }
        }
        tracing::info!("Widget controller stopped");
        self.view
    }

    /// Process events until none arrives for `idle`. Returns how many were handled.
    pub async fn pump(&mut self, idle: Duration) -> usize {
        let mut handled = 0;
        while let Ok(Some(event)) = tokio::time::timeout(idle, self.events_rx.recv()).await {
            handled += 1;
            if self.dispatch(event).is_break() {
                break;
            }
        }
        handled
    }

    pub fn dispatch(&mut self, event: UiEvent) -> ControlFlow<()> {
        match event {
            UiEvent::InputChanged(text) => self.on_input(text),
            UiEvent::SuggestionChosen(index) => self.on_suggestion_chosen(index),
            UiEvent::SubmitPressed => self.on_submit(),
            UiEvent::DebounceElapsed { generation, query } => {
                self.on_debounce_elapsed(generation, query)
            }
            UiEvent::SuggestionsLoaded { generation, result } => {
                self.on_suggestions_loaded(generation, result)
            }
            UiEvent::PositionResolved(result) => {
                let messages = *self.presenter.messages();
                if let Some(coordinates) = autolocate::resolved(&mut self.view, &messages, result) {
                    self.request_weather(coordinates, None);
                }
            }
            UiEvent::WeatherLoaded {
                ticket,
                place,
                result,
            } => self.on_weather_loaded(ticket, &place, result),
            UiEvent::FetchSettled { ticket } => {
                if ticket == self.latest_ticket {
                    self.presenter.end_loading(&mut self.view);
                }
            }
            UiEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn on_input(&mut self, text: String) {
        let events = self.events_tx.clone();
        let outcome = self.suggestions.on_input(&text, move |generation, query| {
            let _ = events.send(UiEvent::DebounceElapsed { generation, query });
        });
        self.input = text;

        if outcome == InputOutcome::Hide {
            self.view.hide_suggestions();
        }
    }

    fn on_debounce_elapsed(&mut self, generation: u64, query: String) {
        if !self.suggestions.on_elapsed(generation) {
            return;
        }

        let geocoder = self.services.geocoder.clone();
        let limit = self.suggestions.limit();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = geocoder.search(&query, limit).await;
            let _ = events.send(UiEvent::SuggestionsLoaded { generation, result });
        });
    }

    fn on_suggestions_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<LocationCandidate>, WeatherError>,
    ) {
        match self.suggestions.on_results(generation, result) {
            ListUpdate::Show(labels) => self.view.show_suggestions(&labels),
            ListUpdate::Hide => self.view.hide_suggestions(),
            ListUpdate::Stale => {}
        }
    }

    fn on_suggestion_chosen(&mut self, index: usize) {
        let Some(candidate) = self.suggestions.select(index) else {
            tracing::debug!("No suggestion at index {}", index);
            return;
        };

        self.input = candidate.name.clone();
        self.view.set_input(&candidate.name);
        self.view.hide_suggestions();
        self.request_weather(candidate.coordinates(), Some(candidate.name));
    }

    fn on_submit(&mut self) {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return;
        }

        let geocoder = self.services.geocoder.clone();
        let forecasts = self.services.forecasts.clone();
        self.spawn_weather_task(async move {
            match geocoder.resolve_single(&query).await {
                Ok(candidate) => {
                    let result = forecasts.fetch(candidate.coordinates()).await;
                    (candidate.name, result)
                }
                Err(e) => (query, Err(e)),
            }
        });
    }

    /// Fetch weather for `coordinates`, labelled `place` or the default city name
    pub fn request_weather(&mut self, coordinates: Coordinates, place: Option<String>) {
        let place =
            place.unwrap_or_else(|| self.presenter.messages().default_city_name().to_string());
        let forecasts = self.services.forecasts.clone();
        self.spawn_weather_task(async move { (place, forecasts.fetch(coordinates).await) });
    }

    fn spawn_weather_task<F>(&mut self, work: F)
    where
        F: Future<Output = (String, Result<WeatherReport, WeatherError>)> + Send + 'static,
    {
        self.latest_ticket += 1;
        let ticket = self.latest_ticket;
        self.presenter.begin_loading(&mut self.view);

        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let _settle = SettleGuard {
                events: events.clone(),
                ticket,
            };
            let (place, result) = work.await;
            let _ = events.send(UiEvent::WeatherLoaded {
                ticket,
                place,
                result,
            });
        });
    }

    fn on_weather_loaded(
        &mut self,
        ticket: u64,
        place: &str,
        result: Result<WeatherReport, WeatherError>,
    ) {
        if ticket != self.latest_ticket {
            tracing::debug!("Discarding weather for superseded request {}", ticket);
            return;
        }

        match result {
            Ok(report) => {
                tracing::info!("Showing weather for {}", place);
                self.presenter.show_report(&mut self.view, place, &report);
            }
            Err(e) => {
                tracing::warn!("Weather lookup for {} failed: {}", place, e);
                self.presenter.show_failure(&mut self.view, &e);
            }
        }
    }
}
