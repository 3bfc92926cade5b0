//! HTTP transit data provider.
//!
//! Fetches the network description from the app's data-access service over
//! JSON. The line list is fetched once at connect time (it is the static
//! snapshot the graph is built from); stop sequences and correspondences
//! are fetched on demand during graph builds.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::error::ProviderError;
use super::types::{CorrespondenceDto, LineDto, StopDto};
use crate::domain::{Correspondence, Line, RouteId, Stop, StopId};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the HTTP provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the transit data service.
    pub base_url: String,
    /// Optional API key, sent as an `x-apikey` header.
    pub api_key: Option<String>,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transit data provider backed by an HTTP JSON API.
///
/// Uses a semaphore to bound concurrent requests during graph-build
/// fan-out.
#[derive(Debug, Clone)]
pub struct HttpTransitProvider {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    lines: Vec<Line>,
}

impl HttpTransitProvider {
    /// Create a provider and fetch the current line list.
    ///
    /// # Errors
    ///
    /// Fails if the client cannot be constructed or the line list cannot be
    /// fetched or parsed. Unlike per-route/per-stop fetches, there is no
    /// useful degraded mode without any lines.
    pub async fn connect(config: ProviderConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| {
                ProviderError::InvalidData("API key is not a valid header value".to_string())
            })?;
            headers.insert("x-apikey", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut provider = Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            lines: Vec::new(),
        };

        let dtos: Vec<LineDto> = provider.get_json(format!("{}/lines", provider.base_url)).await?;
        provider.lines = dtos
            .into_iter()
            .map(LineDto::into_domain)
            .collect::<Result<_, _>>()?;

        Ok(provider)
    }

    /// GET a JSON document, mapping non-success statuses to errors.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ProviderError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| ProviderError::Api {
            status: 0,
            message: "semaphore closed".to_string(),
        })?;

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: format!("{e} (body: {})", body.chars().take(200).collect::<String>()),
        })
    }
}

impl super::TransitDataProvider for HttpTransitProvider {
    fn lines(&self) -> Vec<Line> {
        self.lines.clone()
    }

    async fn stops_for_route(&self, route: &RouteId) -> Result<Vec<Stop>, ProviderError> {
        let url = format!("{}/routes/{}/stops", self.base_url, route);
        let dtos: Vec<StopDto> = self.get_json(url).await?;
        Ok(dtos.into_iter().map(StopDto::into_domain).collect())
    }

    async fn correspondences(&self, stop: &StopId) -> Result<Vec<Correspondence>, ProviderError> {
        let url = format!("{}/stops/{}/correspondences", self.base_url, stop);

        match self.get_json::<Vec<CorrespondenceDto>>(url).await {
            Ok(dtos) => Ok(dtos.into_iter().map(CorrespondenceDto::into_domain).collect()),
            // A station with no recorded correspondences is routinely a 404
            // upstream; treat it as an empty list.
            Err(ProviderError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
