//! API route definitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::analytics::{group_by_region, RegionBucket};
use crate::feed::{CategoryAnalytics, FeedError, ThreatActorAnalytics, TimelineAnalytics};
use crate::incident::{
    DashboardResponse, DashboardStats, FilterOptions, IncidentDetail, IncidentListResponse,
};
use crate::query::{IncidentFilter, IncidentQuery};

type Failure = (StatusCode, Json<Value>);

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/incidents", get(list_incidents))
        .route("/incidents/{id}", get(get_incident))
        .route("/filters", get(filters))
        .route("/stats", get(stats))
        .route("/analytics/countries", get(analytics_countries))
        .route("/analytics/attack-types", get(analytics_attack_types))
        .route("/analytics/ransomware", get(analytics_ransomware))
        .route("/analytics/timeline", get(analytics_timeline))
        .route("/analytics/threat-actors", get(analytics_threat_actors))
        .route("/analytics/regions", get(analytics_regions))
}

/// Map an upstream failure to a per-view, retryable error response. Nothing
/// stale is rendered in its place.
fn feed_failure(err: FeedError) -> Failure {
    tracing::warn!(error = %err, "upstream feed request failed");
    let status = match err.status() {
        Some(404) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(json!({ "error": err.to_string(), "retryable": true })),
    )
}

async fn health() -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Query parameters accepted by the incident list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<u64>,
    per_page: Option<u64>,
    country: Option<String>,
    attack_category: Option<String>,
    ransomware_family: Option<String>,
    threat_actor: Option<String>,
    institution_type: Option<String>,
    year: Option<i32>,
    enriched_only: Option<bool>,
    search: Option<String>,
}

impl ListParams {
    fn into_query(self, default_per_page: u64) -> IncidentQuery {
        let mut query = IncidentQuery::new(self.per_page.unwrap_or(default_per_page));
        query.set_filter(IncidentFilter {
            country: self.country,
            attack_category: self.attack_category,
            ransomware_family: self.ransomware_family,
            threat_actor: self.threat_actor,
            institution_type: self.institution_type,
            year: self.year,
            enriched_only: self.enriched_only.unwrap_or(false),
        });
        query.set_search(self.search);
        // Page last: every setter above resets it to 1.
        query.set_page(self.page.unwrap_or(1));
        query
    }
}

async fn list_incidents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<IncidentListResponse>, Failure> {
    let query = params.into_query(state.per_page);
    let list = state.feed.incidents(&query).await.map_err(feed_failure)?;
    Ok(Json(list))
}

async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IncidentDetail>, Failure> {
    let detail = state.feed.incident(&id).await.map_err(feed_failure)?;
    Ok(Json(detail))
}

async fn filters(State(state): State<AppState>) -> Result<Json<FilterOptions>, Failure> {
    let options = state.feed.filters().await.map_err(feed_failure)?;
    Ok(Json(options))
}

async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, Failure> {
    let stats = state.feed.stats().await.map_err(feed_failure)?;
    Ok(Json(stats))
}

/// Landing-view bundle. Serves the cached copy when one exists; the
/// background refresh keeps it current.
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, Failure> {
    if let Some(bundle) = state.dashboard.get() {
        return Ok(Json(bundle));
    }

    let generation = state.dashboard.begin();
    let bundle = state.feed.dashboard().await.map_err(feed_failure)?;
    state.dashboard.commit(generation, bundle.clone());
    Ok(Json(bundle))
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MonthsParams {
    months: Option<u32>,
}

async fn analytics_countries(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<CategoryAnalytics>, Failure> {
    let data = state
        .feed
        .countries(params.limit.unwrap_or(20))
        .await
        .map_err(feed_failure)?;
    Ok(Json(data))
}

async fn analytics_attack_types(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<CategoryAnalytics>, Failure> {
    let data = state
        .feed
        .attack_types(params.limit.unwrap_or(15))
        .await
        .map_err(feed_failure)?;
    Ok(Json(data))
}

async fn analytics_ransomware(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<CategoryAnalytics>, Failure> {
    let data = state
        .feed
        .ransomware(params.limit.unwrap_or(15))
        .await
        .map_err(feed_failure)?;
    Ok(Json(data))
}

async fn analytics_timeline(
    State(state): State<AppState>,
    Query(params): Query<MonthsParams>,
) -> Result<Json<TimelineAnalytics>, Failure> {
    let data = state
        .feed
        .timeline(params.months.unwrap_or(24))
        .await
        .map_err(feed_failure)?;
    Ok(Json(data))
}

async fn analytics_threat_actors(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ThreatActorAnalytics>, Failure> {
    let data = state
        .feed
        .threat_actors(params.limit.unwrap_or(20))
        .await
        .map_err(feed_failure)?;
    Ok(Json(data))
}

/// Country aggregates partitioned into coarse geographic regions. Computed
/// here from the feed's country analytics; the feed has no region concept.
async fn analytics_regions(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<RegionBucket>>, Failure> {
    let countries = state
        .feed
        .countries(params.limit.unwrap_or(50))
        .await
        .map_err(feed_failure)?;
    Ok(Json(group_by_region(&countries.data)))
}
