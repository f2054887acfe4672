use thiserror::Error;

/// Ways a fetch cycle can fail.
///
/// The `Display` text is what the user sees in `FetchState::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// DNS, connect, reset, body read.
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", body_or_placeholder(.body))]
    Http { status: u16, body: Option<String> },

    /// A 2xx payload carrying a 4xx `cod`.
    #[error("City not found (HTTP {code})")]
    CityNotFound { code: String },

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn network(err: &(dyn std::error::Error + 'static)) -> Self {
        FetchError::Network(error_chain(err))
    }

    /// Empty bodies count as absent.
    pub fn http(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body = (!body.is_empty()).then(|| body.to_string());
        FetchError::Http { status, body }
    }
}

fn body_or_placeholder(body: &Option<String>) -> &str {
    body.as_deref().unwrap_or("Unknown HTTP error")
}

/// Joins an error with its sources, e.g. `error sending request: connection refused`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !msg.contains(&cause_msg) {
            msg.push_str(": ");
            msg.push_str(&cause_msg);
        }
        source = cause.source();
    }
    msg
}
