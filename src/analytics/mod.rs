//! Aggregation engine -- grouped counts, time series, and rollups over
//! incident snapshots.
//!
//! Everything here is a pure function over an immutable slice of records;
//! the same shapes are served pre-aggregated by the feed's analytics
//! endpoints, so local and remote aggregation stay interchangeable.

pub mod actors;
pub mod aggregate;
pub mod regions;
pub mod stats;
pub mod timeline;

pub use actors::rollup_by_actor;
pub use aggregate::{aggregate_by_category, Dimension};
pub use regions::{group_by_region, RegionBucket};
pub use stats::dashboard_stats;
pub use timeline::{monthly_series, monthly_series_to_latest};

use serde::{Deserialize, Serialize};

/// One grouped count: raw category value, count, and its share of records
/// where the dimension is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountByCategory {
    pub category: String,
    pub count: u64,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_emoji: Option<String>,
}

/// One calendar-month bucket of a time series, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub count: u64,
}

/// Per-threat-actor rollup across that actor's incidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatActorSummary {
    pub name: String,
    pub incident_count: u64,
    pub countries_targeted: Vec<String>,
    pub ransomware_families: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// Round to one decimal place, half away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
