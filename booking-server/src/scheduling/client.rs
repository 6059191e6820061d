//! Scheduling provider HTTP client.
//!
//! Provides async access to the upstream appointment-inventory API.
//! Handles authentication, concurrency limiting, and conversion to domain
//! types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;

use crate::domain::{CalendarDate, CentreId, REFERENCE_ZONE, TestType};

use super::error::SchedulingError;
use super::types::{SlotsResponse, SlotsResult, convert_response};

/// Default base URL for the scheduling provider.
const DEFAULT_BASE_URL: &str = "https://scheduling.example.gov.uk/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the scheduling client.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SchedulingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
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

/// Scheduling provider API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct SchedulingClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl SchedulingClient {
    /// Create a new scheduling client with the given configuration.
    pub fn new(config: SchedulingConfig) -> Result<Self, SchedulingError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| SchedulingError::ApiError {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("x-apikey", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch bookable slots for a centre and test type over a date range.
    ///
    /// One call covers `date_from..=date_to`; the result is grouped by
    /// reference-zone local date. `preferred_date` is the first-exposure
    /// KPI signal: pass it only while KPI identifiers have not yet been
    /// captured for the booking attempt, and the provider returns
    /// `kpiIdentifiers` alongside the slots.
    pub async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| SchedulingError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/test-centres/{}/slots", self.base_url, centre.as_str());

        let mut query = vec![
            ("testType", test_type.as_str().to_string()),
            ("dateFrom", date_from.to_string()),
            ("dateTo", date_to.to_string()),
        ];
        if let Some(preferred) = preferred_date {
            query.push(("preferredDate", preferred.to_string()));
        }

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SchedulingError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SchedulingError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SchedulingError::CentreNotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SchedulingError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SlotsResponse =
            serde_json::from_str(&body).map_err(|e| SchedulingError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        convert_response(parsed, REFERENCE_ZONE).map_err(|e| SchedulingError::Json {
            message: e.to_string(),
            body: None,
        })
    }
}
