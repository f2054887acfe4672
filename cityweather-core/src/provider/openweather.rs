use async_trait::async_trait;
use reqwest::Client;

use crate::{ClientConfig, FetchError, WeatherView, model::RawWeatherPayload};

use super::WeatherProvider;

/// Readings come back in °C and m/s.
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    /// Use a preconfigured reqwest client (proxy, TLS, timeouts).
    pub fn with_http(config: ClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.config.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherView, FetchError> {
        tracing::debug!(city = %city, "requesting current weather");

        let res = self
            .http
            .get(self.weather_url())
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::network(&e))?;

        tracing::debug!(status = %status, body = %truncate_body(&body), "received weather response");

        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), &body));
        }

        let parsed: RawWeatherPayload =
            serde_json::from_str(&body).map_err(|e| FetchError::Unknown(e.to_string()))?;

        Ok(WeatherView::from(parsed))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::tests::SURABAYA_JSON;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    /// Serves exactly one canned HTTP response and reports the request line.
    async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/data/2.5"), rx)
    }

    fn client(base_url: String) -> OpenWeatherClient {
        let config = ClientConfig { base_url, api_key: "TEST_KEY".into() };
        OpenWeatherClient::with_http(config, Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn success_maps_payload_and_sends_query() {
        let (base, request) = serve_once("200 OK", SURABAYA_JSON).await;

        let view = client(base).fetch_weather("Surabaya").await.expect("should succeed");
        assert_eq!(view.city, "Surabaya");
        assert_eq!(view.status_code, "200");

        let line = request.await.unwrap();
        assert!(line.starts_with("GET /data/2.5/weather?"), "{line}");
        assert!(line.contains("q=Surabaya"));
        assert!(line.contains("appid=TEST_KEY"));
        assert!(line.contains("units=metric"));
    }

    #[tokio::test]
    async fn embedded_4xx_code_is_returned_as_success() {
        let body = SURABAYA_JSON.replace(r#""cod": 200"#, r#""cod": "404""#);
        let (base, _) = serve_once("200 OK", &body).await;

        let view = client(base).fetch_weather("Atlantis").await.expect("decode succeeds");
        assert_eq!(view.status_code, "404");
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let (base, _) = serve_once("429 Too Many Requests", "rate limited").await;

        let err = client(base).fetch_weather("Surabaya").await.unwrap_err();
        assert_eq!(err, FetchError::Http { status: 429, body: Some("rate limited".into()) });
        assert_eq!(err.to_string(), "HTTP 429: rate limited");
    }

    #[tokio::test]
    async fn non_success_status_with_empty_body() {
        let (base, _) = serve_once("500 Internal Server Error", "").await;

        let err = client(base).fetch_weather("Surabaya").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Unknown HTTP error");
    }

    #[tokio::test]
    async fn empty_city_is_sent_as_is() {
        let (base, request) =
            serve_once("400 Bad Request", r#"{"cod":"400","message":"Nothing to geocode"}"#).await;

        let err = client(base).fetch_weather("").await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 400, .. }));

        let line = request.await.unwrap();
        assert!(line.contains("q=&"), "{line}");
    }

    #[tokio::test]
    async fn malformed_body_is_unknown_error() {
        let (base, _) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = client(base).fetch_weather("Surabaya").await.unwrap_err();
        assert!(matches!(err, FetchError::Unknown(_)));
        assert!(err.to_string().starts_with("An unknown error occurred: "));
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}")).fetch_weather("Surabaya").await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.to_string().starts_with("Network error: "));
    }

    async fn submit_against(status: &str, body: &str) -> crate::FetchState {
        let (base, _) = serve_once(status, body).await;
        let provider = std::sync::Arc::new(client(base));
        let controller =
            crate::WeatherController::new(provider, tokio::runtime::Handle::current());
        controller.submit_query().join().await.unwrap()
    }

    #[tokio::test]
    async fn controller_reports_client_outcomes() {
        let state = submit_against("200 OK", SURABAYA_JSON).await;
        assert!(matches!(state, crate::FetchState::Success(ref v) if v.city == "Surabaya"));

        let body = SURABAYA_JSON.replace(r#""cod": 200"#, r#""cod": "404""#);
        let state = submit_against("200 OK", &body).await;
        assert_eq!(state, crate::FetchState::Error("City not found (HTTP 404)".into()));

        let state = submit_against("429 Too Many Requests", "rate limited").await;
        assert_eq!(state, crate::FetchState::Error("HTTP 429: rate limited".into()));
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        let long = "x".repeat(300);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
