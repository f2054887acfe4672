//! View-state controller: owns the query text and the fetch state.
//!
//! A submission moves the state to [`FetchState::Loading`] right away and then
//! commits `Success` or `Error` from a spawned task. In-flight fetches are never
//! cancelled by the controller, so when submissions overlap the last task to
//! finish wins, even if it was started first.

use std::sync::Arc;

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

use crate::{
    FetchError, FetchState, WeatherProvider, WeatherView, config::DEFAULT_CITY, state::Observable,
};

/// Handle to one fetch cycle.
#[derive(Debug)]
pub struct FetchTask {
    handle: JoinHandle<FetchState>,
}

impl FetchTask {
    /// Wait for the task to commit its terminal state and return it.
    pub async fn join(self) -> Result<FetchState, tokio::task::JoinError> {
        self.handle.await
    }

    /// Stop the fetch before it commits. The state stays as it is.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Fetches are spawned onto the runtime given at construction.
#[derive(Debug)]
pub struct WeatherController {
    provider: Arc<dyn WeatherProvider>,
    runtime: Handle,
    query: String,
    state: Observable<FetchState>,
}

impl WeatherController {
    pub fn new(provider: Arc<dyn WeatherProvider>, runtime: Handle) -> Self {
        Self::with_query(provider, runtime, DEFAULT_CITY)
    }

    pub fn with_query(
        provider: Arc<dyn WeatherProvider>,
        runtime: Handle,
        query: impl Into<String>,
    ) -> Self {
        Self { provider, runtime, query: query.into(), state: Observable::new(FetchState::Initial) }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn current_query(&self) -> &str {
        &self.query
    }

    pub fn current_state(&self) -> FetchState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Start a fetch for the current query. Callable from any thread.
    pub fn submit_query(&self) -> FetchTask {
        let city = self.query.clone();
        let provider = Arc::clone(&self.provider);
        let state = self.state.clone();

        tracing::debug!(city = %city, "fetch started");
        state.set(FetchState::Loading);

        let handle = self.runtime.spawn(async move {
            let next = resolve(provider.fetch_weather(&city).await);
            match &next {
                FetchState::Success(view) => {
                    tracing::info!(city = %view.city, temp = %view.temperature_c, "weather loaded")
                }
                FetchState::Error(message) => {
                    tracing::warn!(city = %city, error = %message, "weather fetch failed")
                }
                FetchState::Initial | FetchState::Loading => {}
            }
            state.set(next.clone());
            next
        });

        FetchTask { handle }
    }
}

/// Terminal state for a finished fetch. A decoded payload whose `cod` starts
/// with "4" is the provider saying the city does not exist.
fn resolve(result: Result<WeatherView, FetchError>) -> FetchState {
    match result {
        Ok(view) if view.status_code.starts_with('4') => {
            FetchState::Error(FetchError::CityNotFound { code: view.status_code }.to_string())
        }
        Ok(view) => FetchState::Success(view),
        Err(err) => FetchState::Error(err.to_string()),
    }
}
