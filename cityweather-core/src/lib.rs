//! Core library for the `cityweather` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - Wire and display models, and the mapping between them
//! - The view-state controller that drives a presentation layer
//!
//! It is used by `cityweather-cli`, but any front end can drive a
//! [`WeatherController`] and render its [`FetchState`].

pub mod config;
pub mod controller;
pub mod error;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod state;

pub use config::{ClientConfig, Config};
pub use controller::{FetchTask, WeatherController};
pub use error::FetchError;
pub use model::{FetchState, RawWeatherPayload, WeatherCondition, WeatherView};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::Observable;
