//! Turns weather reports and failures into what the view displays.

use snowcast_weather::{CurrentConditions, DailyForecastEntry, WeatherError, WeatherReport};

use crate::locale::Messages;
use crate::view::View;

/// Contents of the current-conditions panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPanel {
    pub place: String,
    pub description: String,
    pub temperature: String,
    pub wind: String,
    /// Not provided by the forecast endpoint, always blank
    pub humidity: String,
    pub icon_path: String,
    pub icon_alt: String,
}

/// One row of the forecast table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
    pub date: String,
    pub temperature: String,
    pub icon_path: String,
    pub wind: String,
    pub precipitation: String,
}

/// Round half toward positive infinity, so -2.5 shows as -2
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    messages: Messages,
}

impl Presenter {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn current_panel(&self, place: &str, current: &CurrentConditions) -> CurrentPanel {
        CurrentPanel {
            place: place.to_string(),
            description: self.messages.current_weather_title().to_string(),
            temperature: format!("{}°C", round_half_up(current.temperature_c)),
            wind: self.messages.wind_label(current.wind_speed_ms),
            humidity: String::new(),
            icon_path: current.icon().asset_path(),
            icon_alt: self.messages.icon_alt(current.weather_code),
        }
    }

    pub fn forecast_row(&self, entry: &DailyForecastEntry) -> ForecastRow {
        ForecastRow {
            date: self.messages.date_label(entry.date),
            temperature: format!(
                "{}° / {}°",
                round_half_up(entry.min_temp_c),
                round_half_up(entry.max_temp_c)
            ),
            icon_path: entry.icon().asset_path(),
            wind: format!("{} {}", entry.max_wind_ms, self.messages.speed_unit()),
            precipitation: format!(
                "{} {}",
                entry.precipitation_mm,
                self.messages.precipitation_unit()
            ),
        }
    }

    /// Loading on, stale error off. Called before the request is issued.
    pub fn begin_loading<V: View>(&self, view: &mut V) {
        view.set_loading(true);
        view.hide_error();
    }

    pub fn end_loading<V: View>(&self, view: &mut V) {
        view.set_loading(false);
    }

    /// Replace both panels with a fresh report
    pub fn show_report<V: View>(&self, view: &mut V, place: &str, report: &WeatherReport) {
        let panel = self.current_panel(place, &report.current);
        let rows: Vec<ForecastRow> = report.daily.iter().map(|d| self.forecast_row(d)).collect();

        view.show_current(&panel);
        view.show_forecast(&rows);
        view.hide_error();
    }

    /// Hide both panels together and show the failure text
    pub fn show_failure<V: View>(&self, view: &mut V, error: &WeatherError) {
        view.hide_current();
        view.hide_forecast();
        view.show_error(&self.messages.describe(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;
    use chrono::NaiveDate;
    use snowcast_core::Language;

    fn report() -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                temperature_c: -4.5,
                wind_speed_ms: 3.2,
                weather_code: 2,
            },
            daily: vec![DailyForecastEntry {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                min_temp_c: -8.6,
                max_temp_c: 0.5,
                weather_code: 96,
                max_wind_ms: 5.1,
                precipitation_mm: 0.0,
            }],
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-8.6), -9);
    }

    #[test]
    fn test_current_panel() {
        let presenter = Presenter::default();
        let panel = presenter.current_panel("Москва", &report().current);
        assert_eq!(panel.place, "Москва");
        assert_eq!(panel.description, "Текущая погода");
        assert_eq!(panel.temperature, "-4°C");
        assert_eq!(panel.wind, "Ветер: 3.2 м/с");
        assert_eq!(panel.humidity, "");
        assert_eq!(panel.icon_path, "img/icons/partly-cloudy.svg");
        assert_eq!(panel.icon_alt, "Код погоды 2");
    }

    #[test]
    fn test_forecast_row() {
        let presenter = Presenter::default();
        let row = presenter.forecast_row(&report().daily[0]);
        assert_eq!(row.date, "5 марта");
        assert_eq!(row.temperature, "-9° / 1°");
        assert_eq!(row.icon_path, "img/icons/thunder.svg");
        assert_eq!(row.wind, "5.1 м/с");
        assert_eq!(row.precipitation, "0 мм");
    }

    #[test]
    fn test_english_units() {
        let presenter = Presenter::new(Messages::new(Language::En));
        let row = presenter.forecast_row(&report().daily[0]);
        assert_eq!(row.date, "5 March");
        assert_eq!(row.wind, "5.1 m/s");
        assert_eq!(row.precipitation, "0 mm");
    }

    #[test]
    fn test_report_then_failure_hides_both_panels() {
        let presenter = Presenter::default();
        let mut view = MemoryView::default();
        view.error = Some("old".into());

        presenter.show_report(&mut view, "Москва", &report());
        assert!(view.current.is_some());
        assert_eq!(view.forecast.as_ref().map(Vec::len), Some(1));
        assert!(view.error.is_none());

        presenter.show_failure(&mut view, &WeatherError::NoData);
        assert!(view.current.is_none());
        assert!(view.forecast.is_none());
        assert_eq!(view.error.as_deref(), Some("Нет данных о погоде"));
    }
}
