//! User-visible strings for each supported language.

use chrono::{Datelike, NaiveDate};
use snowcast_core::Language;
use snowcast_weather::WeatherError;

const MONTHS_RU: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    language: Language,
}

impl Messages {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Name shown when the location was not typed by the user
    pub fn default_city_name(&self) -> &'static str {
        match self.language {
            Language::Ru => "Ваш город",
            Language::En => "Your city",
        }
    }

    pub fn current_weather_title(&self) -> &'static str {
        match self.language {
            Language::Ru => "Текущая погода",
            Language::En => "Current weather",
        }
    }

    pub fn speed_unit(&self) -> &'static str {
        match self.language {
            Language::Ru => "м/с",
            Language::En => "m/s",
        }
    }

    pub fn precipitation_unit(&self) -> &'static str {
        match self.language {
            Language::Ru => "мм",
            Language::En => "mm",
        }
    }

    pub fn wind_label(&self, speed_ms: f64) -> String {
        let prefix = match self.language {
            Language::Ru => "Ветер",
            Language::En => "Wind",
        };
        format!("{}: {} {}", prefix, speed_ms, self.speed_unit())
    }

    pub fn icon_alt(&self, code: i32) -> String {
        match self.language {
            Language::Ru => format!("Код погоды {}", code),
            Language::En => format!("Weather code {}", code),
        }
    }

    /// Day number without padding followed by the month name, e.g. "5 марта"
    pub fn date_label(&self, date: NaiveDate) -> String {
        let months = match self.language {
            Language::Ru => &MONTHS_RU,
            Language::En => &MONTHS_EN,
        };
        // month0() is always 0..=11
        format!("{} {}", date.day(), months[date.month0() as usize])
    }

    pub fn note_detecting(&self) -> &'static str {
        match self.language {
            Language::Ru => "Определяем город...",
            Language::En => "Detecting your city...",
        }
    }

    pub fn note_located(&self) -> &'static str {
        match self.language {
            Language::Ru => "Город найден, загружаем погоду...",
            Language::En => "City found, loading weather...",
        }
    }

    pub fn note_unsupported(&self) -> &'static str {
        match self.language {
            Language::Ru => "Геолокация не поддерживается",
            Language::En => "Geolocation is not supported",
        }
    }

    pub fn note_manual_entry(&self) -> &'static str {
        match self.language {
            Language::Ru => "Введите город вручную",
            Language::En => "Enter a city manually",
        }
    }

    pub fn city_not_found(&self) -> &'static str {
        match self.language {
            Language::Ru => "Город не найден",
            Language::En => "City not found",
        }
    }

    pub fn no_weather_data(&self) -> &'static str {
        match self.language {
            Language::Ru => "Нет данных о погоде",
            Language::En => "No weather data",
        }
    }

    /// Text for the error indicator
    pub fn describe(&self, error: &WeatherError) -> String {
        match error {
            WeatherError::NotFound(_) | WeatherError::EmptyQuery => {
                self.city_not_found().to_string()
            }
            WeatherError::NoData => self.no_weather_data().to_string(),
            other => other.to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
