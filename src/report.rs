//! Reshapes a raw forecast payload into the flattened report served to clients

use serde_json::Value;

use crate::error::WeatherProxyError;
use crate::models::{
    CurrentConditions, DailyForecastEntry, HourlyForecastEntry, Location, WeatherReport,
};
use crate::weather::interpret_optional;
use crate::weather::open_meteo::{CurrentData, DailyData, ForecastPayload, HourlyData};

/// Days kept from the daily block
pub const DAILY_ENTRIES: usize = 7;
/// Hours kept from the hourly block
pub const HOURLY_ENTRIES: usize = 24;

/// Build the report for `location` out of the raw forecast document.
///
/// Anything structurally wrong with the payload (missing block, null where a
/// number is rounded, short parallel array) becomes an internal error carrying
/// the decoder's message.
pub fn assemble(location: &Location, raw: Value) -> Result<WeatherReport, WeatherProxyError> {
    let payload: ForecastPayload =
        serde_json::from_value(raw).map_err(|e| WeatherProxyError::internal(e.to_string()))?;

    Ok(WeatherReport {
        current: current_conditions(location, &payload.current),
        daily_forecast: daily_forecast(&payload.daily)?,
        hourly_forecast: hourly_forecast(&payload.hourly)?,
    })
}

fn current_conditions(location: &Location, current: &CurrentData) -> CurrentConditions {
    let code = interpret_optional(current.weather_code);
    CurrentConditions {
        city: location.name.clone(),
        country: location.country.clone(),
        admin1: location.admin1.clone(),
        temperature: round_whole(current.temperature),
        apparent_temperature: round_whole(current.apparent_temperature),
        humidity: current.humidity.clone(),
        wind_speed: round_whole(current.wind_speed),
        wind_direction: current.wind_direction.clone(),
        description: code.description.to_string(),
        symbol: code.symbol.to_string(),
        timestamp: current.time.clone(),
    }
}

fn daily_forecast(daily: &DailyData) -> Result<Vec<DailyForecastEntry>, WeatherProxyError> {
    daily
        .time
        .iter()
        .take(DAILY_ENTRIES)
        .enumerate()
        .map(|(i, date)| -> Result<DailyForecastEntry, WeatherProxyError> {
            let code = interpret_optional(*at(&daily.weather_code, i, "daily.weather_code")?);
            Ok(DailyForecastEntry {
                date: date.clone(),
                max_temp: round_whole(*at(&daily.temperature_max, i, "daily.temperature_2m_max")?),
                min_temp: round_whole(*at(&daily.temperature_min, i, "daily.temperature_2m_min")?),
                precipitation: round_tenth(*at(
                    &daily.precipitation_sum,
                    i,
                    "daily.precipitation_sum",
                )?),
                precipitation_probability: at(
                    &daily.precipitation_probability_max,
                    i,
                    "daily.precipitation_probability_max",
                )?
                .clone(),
                description: code.description.to_string(),
                symbol: code.symbol.to_string(),
            })
        })
        .collect()
}

fn hourly_forecast(hourly: &HourlyData) -> Result<Vec<HourlyForecastEntry>, WeatherProxyError> {
    hourly
        .time
        .iter()
        .take(HOURLY_ENTRIES)
        .enumerate()
        .map(|(i, time)| -> Result<HourlyForecastEntry, WeatherProxyError> {
            let code = interpret_optional(*at(&hourly.weather_code, i, "hourly.weather_code")?);
            Ok(HourlyForecastEntry {
                time: time.clone(),
                temperature: round_whole(*at(&hourly.temperature, i, "hourly.temperature_2m")?),
                precipitation_probability: at(
                    &hourly.precipitation_probability,
                    i,
                    "hourly.precipitation_probability",
                )?
                .clone(),
                description: code.description.to_string(),
                symbol: code.symbol.to_string(),
            })
        })
        .collect()
}

fn at<'a, T>(series: &'a [T], index: usize, name: &str) -> Result<&'a T, WeatherProxyError> {
    series.get(index).ok_or_else(|| {
        WeatherProxyError::internal(format!(
            "{name} has {} entries, expected at least {}",
            series.len(),
            index + 1
        ))
    })
}

/// Round to the nearest integer, ties to even
#[must_use]
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Round to one decimal place.
///
/// Goes through the formatter, which rounds the exact binary value, so 0.15
/// (stored just below the tie) becomes 0.1 rather than 0.2.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn berlin() -> Location {
        Location::new(52.52, 13.41, "Berlin".to_string())
            .with_region("Germany".to_string(), "Land Berlin".to_string())
    }

    fn payload(days: usize, hours: usize) -> Value {
        let day_times: Vec<String> = (1..=days).map(|d| format!("2024-06-{d:02}")).collect();
        let hour_times: Vec<String> = (0..hours).map(|h| format!("2024-06-01T{h:02}:00")).collect();
        json!({
            "latitude": 52.52,
            "longitude": 13.419998,
            "current": {
                "time": "2024-06-01T12:15",
                "interval": 900,
                "temperature_2m": 21.6,
                "relative_humidity_2m": 48,
                "apparent_temperature": 20.4,
                "weather_code": 2,
                "wind_speed_10m": 12.7,
                "wind_direction_10m": 275
            },
            "hourly": {
                "time": hour_times,
                "temperature_2m": (0..hours).map(|h| 14.0 + h as f64 * 0.3).collect::<Vec<_>>(),
                "weather_code": (0..hours).map(|_| 61).collect::<Vec<_>>(),
                "precipitation_probability": (0..hours).map(|h| h * 2).collect::<Vec<_>>()
            },
            "daily": {
                "time": day_times,
                "weather_code": (0..days).map(|d| if d == 0 { 95 } else { 0 }).collect::<Vec<_>>(),
                "temperature_2m_max": (0..days).map(|d| 24.4 + d as f64).collect::<Vec<_>>(),
                "temperature_2m_min": (0..days).map(|d| 11.6 + d as f64).collect::<Vec<_>>(),
                "precipitation_sum": (0..days).map(|_| 3.26).collect::<Vec<_>>(),
                "precipitation_probability_max": (0..days).map(|d| d * 10).collect::<Vec<_>>()
            }
        })
    }

    #[test]
    fn test_current_conditions() {
        let report = assemble(&berlin(), payload(7, 24)).unwrap();
        let current = report.current;

        assert_eq!(current.city, "Berlin");
        assert_eq!(current.country, "Germany");
        assert_eq!(current.admin1, "Land Berlin");
        assert_eq!(current.temperature, 22);
        assert_eq!(current.apparent_temperature, 20);
        assert_eq!(current.humidity, json!(48));
        assert_eq!(current.wind_speed, 13);
        assert_eq!(current.wind_direction, json!(275));
        assert_eq!(current.description, "Partly cloudy");
        assert_eq!(current.symbol, "⛅");
        assert_eq!(current.timestamp, "2024-06-01T12:15");
    }

    #[test]
    fn test_daily_forecast_truncated_to_seven_in_order() {
        let report = assemble(&berlin(), payload(10, 24)).unwrap();

        assert_eq!(report.daily_forecast.len(), 7);
        let dates: Vec<&str> = report.daily_forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            [
                "2024-06-01",
                "2024-06-02",
                "2024-06-03",
                "2024-06-04",
                "2024-06-05",
                "2024-06-06",
                "2024-06-07"
            ]
        );

        let first = &report.daily_forecast[0];
        assert_eq!(first.max_temp, 24);
        assert_eq!(first.min_temp, 12);
        assert_eq!(first.precipitation, 3.3);
        assert_eq!(first.precipitation_probability, json!(0));
        assert_eq!(first.description, "Thunderstorm");
        assert_eq!(report.daily_forecast[6].precipitation_probability, json!(60));
    }

    #[test]
    fn test_hourly_forecast_not_padded() {
        let report = assemble(&berlin(), payload(7, 5)).unwrap();

        assert_eq!(report.hourly_forecast.len(), 5);
        assert_eq!(report.hourly_forecast[4].time, "2024-06-01T04:00");
        assert_eq!(report.hourly_forecast[4].temperature, 15);
        assert_eq!(report.hourly_forecast[4].precipitation_probability, json!(8));
        assert_eq!(report.hourly_forecast[0].description, "Slight rain");
    }

    #[test]
    fn test_hourly_forecast_truncated_to_twenty_four() {
        let report = assemble(&berlin(), payload(7, 168)).unwrap();
        assert_eq!(report.hourly_forecast.len(), 24);
        assert_eq!(report.hourly_forecast[23].time, "2024-06-01T23:00");
    }

    #[test]
    fn test_unknown_and_null_codes_fall_back() {
        let mut raw = payload(2, 2);
        raw["current"]["weather_code"] = json!(42);
        raw["hourly"]["weather_code"] = json!([null, 3]);

        let report = assemble(&berlin(), raw).unwrap();
        assert_eq!(report.current.description, "Unknown");
        assert_eq!(report.current.symbol, "❓");
        assert_eq!(report.hourly_forecast[0].description, "Unknown");
        assert_eq!(report.hourly_forecast[1].description, "Overcast");
    }

    #[test]
    fn test_null_probability_passes_through() {
        let mut raw = payload(1, 1);
        raw["hourly"]["precipitation_probability"] = json!([null]);

        let report = assemble(&berlin(), raw).unwrap();
        assert_eq!(report.hourly_forecast[0].precipitation_probability, Value::Null);
    }

    #[test]
    fn test_missing_block_is_internal_error() {
        let mut raw = payload(1, 1);
        raw.as_object_mut().unwrap().remove("current");

        let err = assemble(&berlin(), raw).unwrap_err();
        assert!(matches!(err, WeatherProxyError::Internal { .. }));
        assert!(err.to_string().contains("current"));
    }

    #[test]
    fn test_short_parallel_array_is_internal_error() {
        let mut raw = payload(3, 1);
        raw["daily"]["temperature_2m_min"] = json!([10.0, 11.0]);

        let err = assemble(&berlin(), raw).unwrap_err();
        assert!(matches!(err, WeatherProxyError::Internal { .. }));
        assert!(err.to_string().contains("daily.temperature_2m_min"));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_whole(21.6), 22);
        assert_eq!(round_whole(-3.4), -3);
        assert_eq!(round_whole(2.5), 2);
        assert_eq!(round_tenth(3.26), 3.3);
        assert_eq!(round_tenth(0.04), 0.0);
    }

    #[rstest]
    #[case(0.15, 0.1)]
    #[case(0.35, 0.3)]
    #[case(1.15, 1.1)]
    #[case(3.26, 3.3)]
    #[case(12.0, 12.0)]
    fn test_round_tenth_uses_exact_value(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_tenth(value), expected);
    }

    #[test]
    fn test_serialized_field_names() {
        let report = assemble(&berlin(), payload(1, 1)).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["current"]["emoji"], json!("⛅"));
        assert!(value["current"].get("symbol").is_none());
        assert_eq!(value["daily_forecast"][0]["precipitation"], json!(3.3));
        assert!(value["hourly_forecast"][0].get("emoji").is_some());
    }
}
