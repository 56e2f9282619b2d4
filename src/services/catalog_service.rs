use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult, CatalogErrorCode};
use crate::models::activity::{Activity, ActivitySearchEnvelope, LocationsEnvelope};
use crate::models::selection::DEFAULT_LOCATIONS;
use crate::models::weather::{WeatherEnvelope, WeatherSnapshot};
use crate::services::search_plan::{MoodQuery, StructuredQuery};

const DEFAULT_BASE_URL: &str = "https://api.tottrot.app";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub http_timeout: StdDuration,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("TOTTROT_CATALOG_BASE_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("TOTTROT_CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            http_timeout: StdDuration::from_secs(timeout_secs),
        }
    }
}

/// The catalog contract the orchestrator depends on. One HTTP implementation
/// in production; tests substitute scripted implementations where the wire is
/// not the point.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search_structured(&self, query: &StructuredQuery) -> AppResult<Vec<Activity>>;
    async fn search_mood(&self, query: &MoodQuery) -> AppResult<Vec<Activity>>;
    async fn fetch_locations(&self) -> AppResult<Vec<String>>;
    async fn fetch_weather(&self, location: &str) -> AppResult<WeatherSnapshot>;
}

pub struct CatalogService {
    client: reqwest::Client,
    base_url: String,
}

/// Minimal shape probed on non-2xx bodies; when the catalog bothered to send
/// its envelope, the declared error message is surfaced verbatim.
#[derive(Debug, Deserialize)]
struct ErrorProbe {
    #[serde(default)]
    error: Option<String>,
}

impl CatalogService {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build catalog HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(&CatalogConfig::from_env())
    }

    fn activities_endpoint(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    fn mood_search_endpoint(&self) -> String {
        format!("{}/activities/mood-search", self.base_url)
    }

    fn locations_endpoint(&self) -> String {
        format!("{}/locations", self.base_url)
    }

    fn weather_endpoint(&self, location: &str) -> String {
        format!("{}/weather/{}", self.base_url, location)
    }

    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
        correlation_id: &str,
    ) -> AppResult<String> {
        debug!(
            target: "app::catalog",
            operation,
            correlation_id = %correlation_id,
            "dispatching catalog request"
        );

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|err| Self::error_from_reqwest(err, correlation_id))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis();
        let body = response.text().await.map_err(|err| {
            AppError::catalog_with_correlation(
                CatalogErrorCode::Unreachable,
                format!("failed to read catalog response body: {err}"),
                Some(correlation_id),
            )
        })?;

        debug!(
            target: "app::catalog",
            operation,
            correlation_id = %correlation_id,
            status = status.as_u16(),
            latency_ms,
            "catalog responded"
        );

        if status.is_success() {
            return Ok(body);
        }

        if let Ok(probe) = serde_json::from_str::<ErrorProbe>(&body) {
            if let Some(message) = probe.error {
                return Err(AppError::catalog_with_correlation(
                    CatalogErrorCode::Rejected,
                    message,
                    Some(correlation_id),
                ));
            }
        }

        Err(Self::map_http_error(status, correlation_id))
    }

    fn map_http_error(status: StatusCode, correlation_id: &str) -> AppError {
        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                AppError::catalog_with_correlation(
                    CatalogErrorCode::HttpTimeout,
                    format!("catalog timed out (status {})", status.as_u16()),
                    Some(correlation_id),
                )
            }
            _ => AppError::catalog_with_correlation(
                CatalogErrorCode::Unreachable,
                format!("catalog returned status {}", status.as_u16()),
                Some(correlation_id),
            ),
        }
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
        if err.is_timeout() {
            AppError::catalog_with_correlation(
                CatalogErrorCode::HttpTimeout,
                "catalog request timed out",
                Some(correlation_id),
            )
        } else if err.is_decode() {
            AppError::catalog_with_correlation(
                CatalogErrorCode::InvalidResponse,
                format!("failed to decode catalog response: {err}"),
                Some(correlation_id),
            )
        } else {
            AppError::catalog_with_correlation(
                CatalogErrorCode::Unreachable,
                format!("catalog request failed: {err}"),
                Some(correlation_id),
            )
        }
    }

    fn decode_activities(body: &str, correlation_id: &str) -> AppResult<Vec<Activity>> {
        let envelope: ActivitySearchEnvelope = serde_json::from_str(body).map_err(|err| {
            AppError::catalog_with_correlation(
                CatalogErrorCode::InvalidResponse,
                format!("catalog response was not the expected shape: {err}"),
                Some(correlation_id),
            )
        })?;

        if !envelope.success {
            return Err(match envelope.error {
                Some(message) => AppError::catalog_with_correlation(
                    CatalogErrorCode::Rejected,
                    message,
                    Some(correlation_id),
                ),
                None => AppError::catalog_with_correlation(
                    CatalogErrorCode::Unknown,
                    "catalog reported failure without a message",
                    Some(correlation_id),
                ),
            });
        }

        Ok(envelope.activities)
    }
}

#[async_trait]
impl CatalogApi for CatalogService {
    async fn search_structured(&self, query: &StructuredQuery) -> AppResult<Vec<Activity>> {
        let correlation_id = Uuid::new_v4().to_string();
        let request = self
            .client
            .get(self.activities_endpoint())
            .query(&query.query_pairs());

        let body = self
            .dispatch(request, "structuredSearch", &correlation_id)
            .await?;
        Self::decode_activities(&body, &correlation_id)
    }

    async fn search_mood(&self, query: &MoodQuery) -> AppResult<Vec<Activity>> {
        let correlation_id = Uuid::new_v4().to_string();
        let request = self
            .client
            .post(self.mood_search_endpoint())
            .json(&query.body());

        let body = self.dispatch(request, "moodSearch", &correlation_id).await?;
        Self::decode_activities(&body, &correlation_id)
    }

    async fn fetch_locations(&self) -> AppResult<Vec<String>> {
        let correlation_id = Uuid::new_v4().to_string();
        let request = self.client.get(self.locations_endpoint());

        let body = self.dispatch(request, "locations", &correlation_id).await?;
        let envelope: LocationsEnvelope = serde_json::from_str(&body).map_err(|err| {
            AppError::catalog_with_correlation(
                CatalogErrorCode::InvalidResponse,
                format!("locations response was not the expected shape: {err}"),
                Some(&correlation_id),
            )
        })?;

        if !envelope.success || envelope.locations.is_empty() {
            return Err(AppError::catalog_with_correlation(
                CatalogErrorCode::Rejected,
                envelope
                    .error
                    .unwrap_or_else(|| "catalog returned no locations".to_string()),
                Some(&correlation_id),
            ));
        }

        Ok(envelope.locations)
    }

    async fn fetch_weather(&self, location: &str) -> AppResult<WeatherSnapshot> {
        let correlation_id = Uuid::new_v4().to_string();
        let request = self.client.get(self.weather_endpoint(location));

        let body = self.dispatch(request, "weather", &correlation_id).await?;
        let envelope: WeatherEnvelope = serde_json::from_str(&body).map_err(|err| {
            AppError::catalog_with_correlation(
                CatalogErrorCode::InvalidResponse,
                format!("weather response was not the expected shape: {err}"),
                Some(&correlation_id),
            )
        })?;

        match envelope.weather {
            Some(snapshot) if envelope.success => Ok(snapshot),
            _ => Err(AppError::catalog_with_correlation(
                CatalogErrorCode::Rejected,
                envelope
                    .error
                    .unwrap_or_else(|| "catalog returned no weather".to_string()),
                Some(&correlation_id),
            )),
        }
    }
}

/// City domain bootstrap: the fixed default set stands in whenever the
/// catalog cannot provide one.
pub async fn load_locations_or_default(catalog: &dyn CatalogApi) -> Vec<String> {
    match catalog.fetch_locations().await {
        Ok(locations) => locations,
        Err(error) => {
            warn!(
                target: "app::catalog",
                error = %error,
                "falling back to the default location set"
            );
            DEFAULT_LOCATIONS.iter().map(|city| city.to_string()).collect()
        }
    }
}

pub mod testing {
    use super::*;

    /// Expose status mapping for integration tests without widening the
    /// public API surface.
    pub fn map_http_error(status: StatusCode) -> AppError {
        CatalogService::map_http_error(status, "test-correlation-id")
    }

    pub fn service_for(base_url: &str, timeout: StdDuration) -> AppResult<CatalogService> {
        CatalogService::new(&CatalogConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_timeout: timeout,
        })
    }
}
