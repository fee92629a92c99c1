//! The display surface the presenter and controller draw on.

use crate::presenter::{CurrentPanel, ForecastRow};

/// A display surface for the widget.
///
/// The controller is the only caller and runs on one task, so
/// implementations never see concurrent calls.
pub trait View {
    fn set_input(&mut self, text: &str);
    fn show_suggestions(&mut self, labels: &[String]);
    fn hide_suggestions(&mut self);
    fn set_note(&mut self, text: &str);
    fn set_loading(&mut self, visible: bool);
    fn show_current(&mut self, panel: &CurrentPanel);
    fn hide_current(&mut self);
    fn show_forecast(&mut self, rows: &[ForecastRow]);
    fn hide_forecast(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// Headless surface that keeps whatever is currently "on screen".
///
/// `None` means the element is hidden.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub input: String,
    pub suggestions: Option<Vec<String>>,
    pub note: String,
    pub loading: bool,
    /// Every loading toggle, in order
    pub loading_history: Vec<bool>,
    pub current: Option<CurrentPanel>,
    pub forecast: Option<Vec<ForecastRow>>,
    pub error: Option<String>,
}

impl View for MemoryView {
    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn show_suggestions(&mut self, labels: &[String]) {
        self.suggestions = Some(labels.to_vec());
    }

    fn hide_suggestions(&mut self) {
        self.suggestions = None;
    }

    fn set_note(&mut self, text: &str) {
        self.note = text.to_string();
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
        self.loading_history.push(visible);
    }

    fn show_current(&mut self, panel: &CurrentPanel) {
        self.current = Some(panel.clone());
    }

    fn hide_current(&mut self) {
        self.current = None;
    }

    fn show_forecast(&mut self, rows: &[ForecastRow]) {
        self.forecast = Some(rows.to_vec());
    }

    fn hide_forecast(&mut self) {
        self.forecast = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }
}
