use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Wire shape of the provider's current-weather payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeatherPayload {
    pub weather: Vec<RawCondition>,
    pub main: RawMain,
    pub wind: RawWind,
    pub clouds: RawClouds,
    pub sys: RawSys,
    pub name: String,
    #[serde(default)]
    pub rain: Option<RawRain>,
    pub dt: i64,
    pub cod: RawCode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClouds {
    pub all: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSys {
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRain {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

/// The provider sends `cod` as a number on success and as a string on some
/// error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RawCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawCode::Number(n) => write!(f, "{n}"),
            RawCode::Text(s) => f.write_str(s),
        }
    }
}

/// One weather condition as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCondition {
    /// Category, e.g. "Rain" or "Clouds".
    pub main: String,
    pub description: String,
    pub icon: String,
    pub icon_url: String,
}

/// Display model handed to the presentation layer.
///
/// Timestamps are epoch seconds as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub city: String,
    pub conditions: Vec<WeatherCondition>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    /// Never filled from the payload.
    pub temp_min_c: f64,
    /// Never filled from the payload.
    pub temp_max_c: f64,
    pub pressure_hpa: u32,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub cloud_cover_pct: u8,
    pub rain_last_hour_mm: Option<f64>,
    pub sunrise: i64,
    pub sunset: i64,
    pub observed_at: i64,
    /// Provider status code in its textual form ("200", "404", ...).
    pub status_code: String,
}

impl WeatherView {
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.conditions.first()
    }

    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunrise, 0)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunset, 0)
    }

    pub fn observed_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.observed_at, 0)
    }
}

/// Progress/result of the current fetch cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Initial,
    Loading,
    Success(WeatherView),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}
