//! Payload → display model mapping.

use crate::model::{RawCondition, RawWeatherPayload, WeatherCondition, WeatherView};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Large (4x) condition icon for a provider icon code such as `01d`.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}@4x.png")
}

impl From<RawCondition> for WeatherCondition {
    fn from(raw: RawCondition) -> Self {
        let icon_url = icon_url(&raw.icon);
        Self { main: raw.main, description: raw.description, icon: raw.icon, icon_url }
    }
}

impl From<RawWeatherPayload> for WeatherView {
    fn from(raw: RawWeatherPayload) -> Self {
        Self {
            city: raw.name,
            conditions: raw.weather.into_iter().map(WeatherCondition::from).collect(),
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            temp_min_c: 0.0,
            temp_max_c: 0.0,
            pressure_hpa: raw.main.pressure,
            humidity_pct: raw.main.humidity,
            wind_speed: raw.wind.speed,
            cloud_cover_pct: raw.clouds.all,
            rain_last_hour_mm: raw.rain.and_then(|r| r.one_hour),
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
            observed_at: raw.dt,
            status_code: raw.cod.to_string(),
        }
    }
}
