//! WMO weather code interpretation

use std::collections::HashMap;
use std::sync::LazyLock;

/// Human-readable reading of a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCode {
    pub description: &'static str,
    pub symbol: &'static str,
}

impl WeatherCode {
    /// Fallback for codes outside the table
    pub const UNKNOWN: WeatherCode = WeatherCode::new("Unknown", "❓");

    const fn new(description: &'static str, symbol: &'static str) -> Self {
        Self {
            description,
            symbol,
        }
    }
}

/// Codes Open-Meteo emits, see <https://open-meteo.com/en/docs#weathervariables>
pub const KNOWN_CODES: [(i64, WeatherCode); 28] = [
    (0, WeatherCode::new("Clear sky", "☀️")),
    (1, WeatherCode::new("Mainly clear", "🌤️")),
    (2, WeatherCode::new("Partly cloudy", "⛅")),
    (3, WeatherCode::new("Overcast", "☁️")),
    (45, WeatherCode::new("Fog", "🌫️")),
    (48, WeatherCode::new("Depositing rime fog", "🌫️")),
    (51, WeatherCode::new("Light drizzle", "🌧️")),
    (53, WeatherCode::new("Moderate drizzle", "🌧️")),
    (55, WeatherCode::new("Dense drizzle", "⛈️")),
    (56, WeatherCode::new("Light freezing drizzle", "🌧️")),
    (57, WeatherCode::new("Dense freezing drizzle", "🌧️")),
    (61, WeatherCode::new("Slight rain", "🌧️")),
    (63, WeatherCode::new("Moderate rain", "🌧️")),
    (65, WeatherCode::new("Heavy rain", "⛈️")),
    (66, WeatherCode::new("Light freezing rain", "🌧️")),
    (67, WeatherCode::new("Heavy freezing rain", "🌧️")),
    (71, WeatherCode::new("Slight snow fall", "❄️")),
    (73, WeatherCode::new("Moderate snow fall", "❄️")),
    (75, WeatherCode::new("Heavy snow fall", "❄️")),
    (77, WeatherCode::new("Snow grains", "❄️")),
    (80, WeatherCode::new("Slight rain showers", "🌧️")),
    (81, WeatherCode::new("Moderate rain showers", "🌧️")),
    (82, WeatherCode::new("Violent rain showers", "⛈️")),
    (85, WeatherCode::new("Slight snow showers", "❄️")),
    (86, WeatherCode::new("Heavy snow showers", "❄️")),
    (95, WeatherCode::new("Thunderstorm", "⛈️")),
    (96, WeatherCode::new("Thunderstorm with slight hail", "⛈️")),
    (99, WeatherCode::new("Thunderstorm with heavy hail", "⛈️")),
];

static WEATHER_CODES: LazyLock<HashMap<i64, WeatherCode>> =
    LazyLock::new(|| KNOWN_CODES.into_iter().collect());

/// Convert a WMO weather code to its description and symbol
#[must_use]
pub fn interpret(code: i64) -> WeatherCode {
    WEATHER_CODES
        .get(&code)
        .copied()
        .unwrap_or(WeatherCode::UNKNOWN)
}

/// Same as [`interpret`], treating a missing code as unknown
#[must_use]
pub fn interpret_optional(code: Option<i64>) -> WeatherCode {
    code.map_or(WeatherCode::UNKNOWN, interpret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky", "☀️")]
    #[case(2, "Partly cloudy", "⛅")]
    #[case(45, "Fog", "🌫️")]
    #[case(63, "Moderate rain", "🌧️")]
    #[case(75, "Heavy snow fall", "❄️")]
    #[case(99, "Thunderstorm with heavy hail", "⛈️")]
    fn test_known_codes(#[case] code: i64, #[case] description: &str, #[case] symbol: &str) {
        let entry = interpret(code);
        assert_eq!(entry.description, description);
        assert_eq!(entry.symbol, symbol);
    }

    #[rstest]
    #[case(-1)]
    #[case(4)]
    #[case(50)]
    #[case(100)]
    #[case(i64::MAX)]
    fn test_unknown_codes(#[case] code: i64) {
        assert_eq!(interpret(code), WeatherCode::UNKNOWN);
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for (code, entry) in KNOWN_CODES {
            assert_eq!(interpret(code), entry);
            assert_ne!(entry, WeatherCode::UNKNOWN);
        }
    }

    #[test]
    fn test_missing_code_is_unknown() {
        assert_eq!(interpret_optional(None), WeatherCode::UNKNOWN);
        assert_eq!(interpret_optional(Some(3)).description, "Overcast");
    }
}
