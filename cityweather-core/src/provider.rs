use crate::{Config, FetchError, WeatherView, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// One-shot current-weather lookup. Implementations hold no state between calls.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherView, FetchError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let client_config = config.client_config()?;
    Ok(Arc::new(OpenWeatherClient::new(client_config)))
}
