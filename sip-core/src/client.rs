//! HTTP client for the irradiance backends (native builds only).

use crate::error::ApiError;
use crate::geocode::{parse_search_results, Location, NOMINATIM_SEARCH_URL};
use crate::request::VisualizeRequest;
use crate::sample::{decode_response, RawSample};
use crate::source::ExportFormat;
use log::{info, warn};
use reqwest::{Client, Response};
use std::time::Duration;

/// Requests still pending after this long are aborted and reported as
/// [`ApiError::Timeout`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default backend location for local development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const USER_AGENT: &str = concat!("sip-cli/", env!("CARGO_PKG_VERSION"));

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Format(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Client for the data, export and geocoding endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(BackendClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to its data source and decode the `data` array.
    pub async fn fetch_samples(&self, request: &VisualizeRequest) -> Result<Vec<RawSample>, ApiError> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        info!("Requesting {} data from {}", request.granularity, url);
        let response = self.http.post(&url).json(request).send().await?;
        let body = success_text(response).await?;
        let samples = decode_response(&body)?;
        info!("Received {} samples from {}", samples.len(), request.data_source);
        Ok(samples)
    }

    /// POST the request to the export endpoint and return the file bytes
    /// untouched.
    pub async fn export(&self, request: &VisualizeRequest, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base_url, format.endpoint());
        info!("Requesting {} export from {}", format.extension(), url);
        let response = self.http.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Resolve free text to the first matching location.
    pub async fn geocode(&self, query: &str) -> Result<Option<Location>, ApiError> {
        let response = self
            .http
            .get(NOMINATIM_SEARCH_URL)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;
        let body = success_text(response).await?;
        parse_search_results(&body)
    }
}

async fn success_text(response: Response) -> Result<String, ApiError> {
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    Ok(response.text().await?)
}

async fn failure(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|e| {
        warn!("Could not read error body: {}", e);
        String::new()
    });
    ApiError::from_response(
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        &body,
    )
}
