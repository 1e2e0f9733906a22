use super::geo::Coordinates;
use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation,weather_code,cloud_cover,wind_speed_10m,wind_direction_10m,is_day,\
surface_pressure";

/// Current conditions plus the units the values are reported in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    #[serde(default)]
    pub current_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    #[serde(default)]
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub precipitation: f64,
    pub weather_code: u16,
    #[serde(default)]
    pub cloud_cover: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    #[serde(default)]
    pub is_day: u8,
    #[serde(default)]
    pub surface_pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Units {
    #[serde(default = "default_temperature_unit")]
    pub temperature_2m: String,
    #[serde(default = "default_wind_unit")]
    pub wind_speed_10m: String,
}

fn default_temperature_unit() -> String {
    "°C".into()
}

fn default_wind_unit() -> String {
    "km/h".into()
}

impl Default for Units {
    fn default() -> Self {
        Self {
            temperature_2m: default_temperature_unit(),
            wind_speed_10m: default_wind_unit(),
        }
    }
}

/// Cached payload: the forecast together with the coordinates that produced
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Coordinates,
    pub data: Forecast,
}

pub fn forecast_url(coords: Coordinates) -> String {
    let mut url = Url::parse(FORECAST_URL).expect("static URL parses");
    url.query_pairs_mut()
        .append_pair("latitude", &coords.latitude.to_string())
        .append_pair("longitude", &coords.longitude.to_string())
        .append_pair("current", CURRENT_FIELDS)
        .append_pair("timezone", "auto")
        .append_pair("forecast_days", "1");
    url.into()
}

pub fn fetch(client: &Client, coords: Coordinates) -> Result<WeatherReport> {
    let data: Forecast = super::get_json(client, &forecast_url(coords))?;
    Ok(WeatherReport {
        location: coords,
        data,
    })
}

/// Human-readable description of a WMO weather code.
pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Glyph shown next to the temperature for a WMO weather code.
pub fn glyph(code: u16) -> &'static str {
    match code {
        0 | 1 => "☀",
        2 | 3 => "⛅",
        45 | 48 => "🌫",
        51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => "🌧",
        71 | 73 | 75 | 77 | 85 | 86 => "❄",
        95 | 96 | 99 => "⛈",
        _ => "☁",
    }
}

const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Map wind direction degrees to an 8-point compass name.
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = ((degrees / 45.0).round() as usize) % 8;
    DIRECTIONS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_coordinates_and_fields() {
        let url = forecast_url(Coordinates {
            latitude: 52.52,
            longitude: 13.405,
        });
        assert!(url.starts_with(FORECAST_URL));
        assert!(url.contains("latitude=52.52"));
        assert!(url.contains("longitude=13.405"));
        assert!(url.contains("weather_code"));
        assert!(url.contains("timezone=auto"));
    }

    #[test]
    fn known_and_unknown_codes_describe() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(95), "Thunderstorm");
        assert_eq!(describe(42), "Unknown");
    }

    #[test]
    fn wind_direction_octants() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(44.0), "NE");
        assert_eq!(wind_direction(90.0), "E");
        assert_eq!(wind_direction(180.0), "S");
        assert_eq!(wind_direction(270.0), "W");
        assert_eq!(wind_direction(359.0), "N");
    }

    #[test]
    fn forecast_parses_open_meteo_shape() {
        let json = r#"{
            "current_units": {"temperature_2m": "°C", "wind_speed_10m": "km/h"},
            "current": {
                "temperature_2m": 18.3,
                "relative_humidity_2m": 60,
                "apparent_temperature": 17.1,
                "precipitation": 0.0,
                "weather_code": 2,
                "cloud_cover": 40,
                "wind_speed_10m": 12.4,
                "wind_direction_10m": 310,
                "is_day": 1,
                "surface_pressure": 1013.2
            }
        }"#;
        let forecast: Forecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.current.weather_code, 2);
        assert_eq!(forecast.current_units.temperature_2m, "°C");
        assert_eq!(forecast.current.is_day, 1);
    }
}
