//! Upstream feed client -- typed reqwest access to the incident-tracking
//! service's read endpoints.
//!
//! The feed owns storage and enrichment; this crate only reads. Every error
//! here is local and retryable: a failed fetch is surfaced to its view,
//! never rendered partially and never fatal to the process.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analytics::{CountByCategory, ThreatActorSummary, TimeSeriesPoint};
use crate::incident::{
    DashboardResponse, DashboardStats, FilterOptions, IncidentDetail, IncidentListResponse,
};
use crate::query::IncidentQuery;

/// Default upstream timeout. Slow aggregate queries get a bounded wait, not
/// a hung view.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("failed to decode feed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FeedError {
    /// Upstream HTTP status, when the feed answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pre-aggregated category analytics as served by the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAnalytics {
    #[serde(default)]
    pub data: Vec<CountByCategory>,
    pub total: u64,
}

/// Pre-aggregated monthly time series as served by the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineAnalytics {
    #[serde(default)]
    pub data: Vec<TimeSeriesPoint>,
    pub total: u64,
}

/// Threat-actor rollups as served by the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatActorAnalytics {
    #[serde(default)]
    pub threat_actors: Vec<ThreatActorSummary>,
    pub total: u64,
}

/// Read access to the incident feed. The HTTP client implements this; tests
/// substitute fixtures.
#[async_trait]
pub trait IncidentFeed: Send + Sync {
    async fn incidents(&self, query: &IncidentQuery) -> Result<IncidentListResponse, FeedError>;
    async fn incident(&self, id: &str) -> Result<IncidentDetail, FeedError>;
    async fn filters(&self) -> Result<FilterOptions, FeedError>;
    async fn stats(&self) -> Result<DashboardStats, FeedError>;
    async fn dashboard(&self) -> Result<DashboardResponse, FeedError>;
    async fn countries(&self, limit: u32) -> Result<CategoryAnalytics, FeedError>;
    async fn attack_types(&self, limit: u32) -> Result<CategoryAnalytics, FeedError>;
    async fn ransomware(&self, limit: u32) -> Result<CategoryAnalytics, FeedError>;
    async fn timeline(&self, months: u32) -> Result<TimelineAnalytics, FeedError>;
    async fn threat_actors(&self, limit: u32) -> Result<ThreatActorAnalytics, FeedError>;
}

/// HTTP client for the feed's JSON API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Build a client against `base_url` (scheme + host, no trailing path).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FeedError> {
        let url = self.url(path);
        debug!(%url, "fetching from feed");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response.json::<T>().await.map_err(|source| FeedError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl IncidentFeed for FeedClient {
    async fn incidents(&self, query: &IncidentQuery) -> Result<IncidentListResponse, FeedError> {
        self.get_json("/api/incidents", &query.query_params()).await
    }

    async fn incident(&self, id: &str) -> Result<IncidentDetail, FeedError> {
        self.get_json(&format!("/api/incidents/{id}"), &[]).await
    }

    async fn filters(&self) -> Result<FilterOptions, FeedError> {
        self.get_json("/api/filters", &[]).await
    }

    async fn stats(&self) -> Result<DashboardStats, FeedError> {
        self.get_json("/api/stats", &[]).await
    }

    async fn dashboard(&self) -> Result<DashboardResponse, FeedError> {
        self.get_json("/api/dashboard", &[]).await
    }

    async fn countries(&self, limit: u32) -> Result<CategoryAnalytics, FeedError> {
        self.get_json("/api/analytics/countries", &[("limit", limit.to_string())])
            .await
    }

    async fn attack_types(&self, limit: u32) -> Result<CategoryAnalytics, FeedError> {
        self.get_json("/api/analytics/attack-types", &[("limit", limit.to_string())])
            .await
    }

    async fn ransomware(&self, limit: u32) -> Result<CategoryAnalytics, FeedError> {
        self.get_json("/api/analytics/ransomware", &[("limit", limit.to_string())])
            .await
    }

    async fn timeline(&self, months: u32) -> Result<TimelineAnalytics, FeedError> {
        self.get_json("/api/analytics/timeline", &[("months", months.to_string())])
            .await
    }

    async fn threat_actors(&self, limit: u32) -> Result<ThreatActorAnalytics, FeedError> {
        self.get_json(
            "/api/analytics/threat-actors",
            &[("limit", limit.to_string())],
        )
        .await
    }
}
