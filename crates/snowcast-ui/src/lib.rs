//! Widget logic for Snowcast: debounced city suggestions, weather
//! presentation and startup autolocation, drawn on any [`View`].

mod autolocate;
pub mod controller;
pub mod locale;
pub mod presenter;
pub mod suggestions;
pub mod view;

pub use controller::{ControllerHandle, Services, UiEvent, WidgetController};
pub use locale::Messages;
pub use presenter::{CurrentPanel, ForecastRow, Presenter};
pub use suggestions::{SuggestionController, SuggestionState};
pub use view::{MemoryView, View};
