//! Weather code to icon category mapping.

use serde::{Deserialize, Serialize};

/// Icon category for a provider weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Showers,
    Snow,
    Thunder,
}

impl IconCategory {
    /// Convert a WMO weather code to its icon category.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            80 | 81 | 82 => Self::Showers,
            71 | 73 | 75 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunder,
            // Freezing drizzle/rain, snow grains and anything new fall back to clear
            _ => Self::Clear,
        }
    }

    /// File stem of the icon asset
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Showers => "showers",
            Self::Snow => "snow",
            Self::Thunder => "thunder",
        }
    }

    /// Relative path of the icon asset
    pub fn asset_path(&self) -> String {
        format!("img/icons/{}.svg", self.slug())
    }
}

/// Map a provider weather code to an icon category.
pub fn map_code(code: i32) -> IconCategory {
    IconCategory::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_clear() {
        assert_eq!(map_code(0), IconCategory::Clear);
    }

    #[test]
    fn test_code_partly_cloudy() {
        assert_eq!(map_code(1), IconCategory::PartlyCloudy);
        assert_eq!(map_code(2), IconCategory::PartlyCloudy);
    }

    #[test]
    fn test_code_cloudy() {
        assert_eq!(map_code(3), IconCategory::Cloudy);
    }

    #[test]
    fn test_code_fog() {
        assert_eq!(map_code(45), IconCategory::Fog);
        assert_eq!(map_code(48), IconCategory::Fog);
    }

    #[test]
    fn test_code_drizzle() {
        for code in [51, 53, 55] {
            assert_eq!(map_code(code), IconCategory::Drizzle, "code {code}");
        }
    }

    #[test]
    fn test_code_rain_and_showers_are_distinct() {
        for code in [61, 63, 65] {
            assert_eq!(map_code(code), IconCategory::Rain, "code {code}");
        }
        for code in [80, 81, 82] {
            assert_eq!(map_code(code), IconCategory::Showers, "code {code}");
        }
    }

    #[test]
    fn test_code_snow() {
        for code in [71, 73, 75, 85, 86] {
            assert_eq!(map_code(code), IconCategory::Snow, "code {code}");
        }
    }

    #[test]
    fn test_code_thunder() {
        for code in [95, 96, 99] {
            assert_eq!(map_code(code), IconCategory::Thunder, "code {code}");
        }
    }

    #[test]
    fn test_unmapped_codes_default_to_clear() {
        for code in [-1, 4, 56, 57, 66, 67, 77, 100, 999, i32::MAX] {
            assert_eq!(map_code(code), IconCategory::Clear, "code {code}");
        }
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(IconCategory::PartlyCloudy.asset_path(), "img/icons/partly-cloudy.svg");
        assert_eq!(map_code(95).asset_path(), "img/icons/thunder.svg");
    }
}
