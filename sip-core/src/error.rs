use std::fmt;

/// Message shown when a request is aborted by the client-side timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. The server might be busy or the request is complex. Try a smaller date/year range or different parameters.";

/// Errors that can occur when talking to the irradiance backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-success HTTP status. `message` is the backend's `error` text when
    /// the body carried one.
    Http { status: u16, message: String },
    /// The request was aborted after the client-side timeout elapsed.
    Timeout,
    /// Connection-level failure (DNS, refused, reset, ...).
    Network(String),
    /// The response body did not have the expected shape.
    Format(String),
}

impl ApiError {
    /// Build an HTTP error from a failed response, preferring the backend's
    /// JSON `{"error": "..."}` text over the bare status line.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let backend_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty());
        let message = backend_message.unwrap_or_else(|| {
            format!("Data request failed: {} {}", status, status_text)
                .trim_end()
                .to_string()
        });
        ApiError::Http { status, message }
    }

    /// True for the timeout variant, which the UI reports differently.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }

    /// Text suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Network(detail) => format!("Failed to fetch data: {}", detail),
            ApiError::Format(detail) => format!("Invalid data format received from server: {}", detail),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Timeout => write!(f, "{}", TIMEOUT_MESSAGE),
            ApiError::Network(detail) => write!(f, "network error: {}", detail),
            ApiError::Format(detail) => write!(f, "data format error: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

/// A wire value that does not name any known variant of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}
