//! Line-oriented terminal host: a [`View`] that prints, and the command
//! parser that turns typed lines into widget events.

use std::io::Write;

use snowcast_ui::{CurrentPanel, ForecastRow, UiEvent, View};

pub const HELP: &str =
    "Type a city name for suggestions, :N to pick suggestion N, :go to look up what you typed, :q to quit";

/// Translate one typed line into a widget event
pub fn parse_command(line: &str) -> UiEvent {
    match line.trim() {
        ":q" | ":quit" => UiEvent::Shutdown,
        ":go" => UiEvent::SubmitPressed,
        cmd => match cmd.strip_prefix(':').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 => UiEvent::SuggestionChosen(n - 1),
            _ => UiEvent::InputChanged(line.to_string()),
        },
    }
}

pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn set_input(&mut self, text: &str) {
        self.emit(&format!("> {}", text));
    }

    fn show_suggestions(&mut self, labels: &[String]) {
        let lines: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("  :{} {}", i + 1, label))
            .collect();
        self.emit(&lines.join("\n"));
    }

    fn hide_suggestions(&mut self) {}

    fn set_note(&mut self, text: &str) {
        self.emit(&format!("[{}]", text));
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            self.emit("...");
        }
    }

    fn show_current(&mut self, panel: &CurrentPanel) {
        self.emit(&format!(
            "{}\n  {}: {}  {}  ({})",
            panel.place, panel.description, panel.temperature, panel.wind, panel.icon_alt
        ));
    }

    fn hide_current(&mut self) {}

    fn show_forecast(&mut self, rows: &[ForecastRow]) {
        let lines: Vec<String> = rows
            .iter()
            .map(|row| {
                format!(
                    "  {:<12} {:<12} {:<28} {:<10} {}",
                    row.date, row.temperature, row.icon_path, row.wind, row.precipitation
                )
            })
            .collect();
        self.emit(&lines.join("\n"));
    }

    fn hide_forecast(&mut self) {}

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("! {}", message));
    }

    fn hide_error(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse_command(":q"), UiEvent::Shutdown));
        assert!(matches!(parse_command(" :go "), UiEvent::SubmitPressed));
        assert!(matches!(parse_command(":3"), UiEvent::SuggestionChosen(2)));
        assert!(matches!(parse_command(":0"), UiEvent::InputChanged(s) if s == ":0"));
        assert!(matches!(parse_command("Mun"), UiEvent::InputChanged(s) if s == "Mun"));
    }

    #[test]
    fn test_suggestions_are_numbered_from_one() {
        let mut view = TerminalView::new(Vec::new());
        view.show_suggestions(&["Munich, Bavaria, Germany".to_string(), "Munich, Germany".to_string()]);
        let out = String::from_utf8(view.into_inner()).unwrap();
        assert!(out.contains(":1 Munich, Bavaria, Germany"));
        assert!(out.contains(":2 Munich, Germany"));
    }

    #[test]
    fn test_error_line() {
        let mut view = TerminalView::new(Vec::new());
        view.show_error("Город не найден");
        let out = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(out, "! Город не найден\n");
    }
}
