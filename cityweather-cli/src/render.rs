//! Terminal rendering of [`FetchState`].

use chrono::{DateTime, Local, TimeZone, Utc};
use cityweather_core::{FetchState, WeatherView};

pub fn render_state(state: &FetchState, query: &str) -> String {
    match state {
        FetchState::Initial => "Search for a city to get started".to_string(),
        FetchState::Loading => format!("Loading weather for {query}..."),
        FetchState::Success(view) => render_view(view, &Local),
        FetchState::Error(message) => format!("Oops! Something went wrong\n{message}"),
    }
}

pub fn render_view<Tz>(view: &WeatherView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let (glyph, description, icon_url) = match view.primary_condition() {
        Some(c) => (condition_glyph(&c.main), capitalize(&c.description), c.icon_url.as_str()),
        None => (condition_glyph(""), "Unknown".to_string(), ""),
    };

    let mut lines = vec![
        view.city.clone(),
        format_local(view.observed_at_utc(), tz, "%A, %d %B %Y"),
        format!("Updated as of {}", format_local(view.observed_at_utc(), tz, "%H:%M")),
        String::new(),
        format!("{glyph}  {description}"),
        format!("{}°C", view.temperature_c as i64),
        String::new(),
        row("HUMIDITY", format!("{}%", view.humidity_pct)),
        row("WIND", format!("{} m/s", view.wind_speed)),
        row("FEELS LIKE", format!("{}°", view.feels_like_c as i64)),
        row("RAINFALL", format!("{:.1} mm", view.rain_last_hour_mm.unwrap_or(0.0))),
        row("PRESSURE", format!("{} hPa", view.pressure_hpa)),
        row("CLOUDS", format!("{}%", view.cloud_cover_pct)),
        row("SUNRISE", format_local(view.sunrise_at(), tz, "%H:%M")),
        row("SUNSET", format_local(view.sunset_at(), tz, "%H:%M")),
    ];
    if !icon_url.is_empty() {
        lines.push(row("ICON", icon_url.to_string()));
    }

    lines.join("\n")
}

fn row(title: &str, value: String) -> String {
    format!("{title:<12}{value}")
}

fn format_local<Tz>(at: Option<DateTime<Utc>>, tz: &Tz, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.map(|t| t.with_timezone(tz).format(fmt).to_string()).unwrap_or_else(|| "-".to_string())
}

/// Keyed on the provider's condition category.
fn condition_glyph(main: &str) -> &'static str {
    match main.to_lowercase().as_str() {
        "clear" => "☀",
        "clouds" => "☁",
        "rain" | "drizzle" => "🌧",
        "thunderstorm" => "⛈",
        "snow" => "❄",
        _ => "🌫",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
