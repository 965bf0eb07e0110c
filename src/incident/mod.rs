//! Incident data model -- the shapes the upstream feed serves.
//!
//! Incidents are created and enriched exclusively by the feed; this crate
//! only reads immutable snapshots. `incident_id` is the sole join key across
//! list, detail, and aggregate views.

pub mod enrichment;

use serde::{Deserialize, Serialize};

use crate::query::page::PageMeta;
use enrichment::{
    AttackDynamics, DataImpact, EducationRelevance, FinancialImpact, MitreTechnique,
    RecoveryMetrics, RegulatoryImpact, SystemImpact, TimelineEvent, TransparencyMetrics,
    UserImpact,
};

/// One row of the incident list view.
///
/// Classification and location fields are independently optional; absence
/// means "not known", never "zero" or "none of the above".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub incident_id: String,
    pub university_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victim_raw_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_precision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_type_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ransomware_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_actor_name: Option<String>,
    pub status: String,
    pub source_confidence: String,
    pub llm_enriched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_enriched_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingested_at: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl IncidentSummary {
    /// The attack classification shown in list views: the curated category
    /// when present, otherwise the ingest-time hint.
    pub fn attack_label_source(&self) -> Option<&str> {
        self.attack_category
            .as_deref()
            .or(self.attack_type_hint.as_deref())
    }

    /// Four-digit year of `incident_date`, if one is recorded.
    pub fn incident_year(&self) -> Option<i32> {
        self.incident_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

/// Provenance entry: which source reported the incident and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentSource {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event_id: Option<String>,
    pub first_seen_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

/// Full incident record served by the detail endpoint. Superset of
/// [`IncidentSummary`] plus the enrichment sub-objects, which are only
/// expected to be populated when `llm_enriched` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDetail {
    pub incident_id: String,
    pub university_name: String,
    #[serde(default)]
    pub victim_raw_name: Option<String>,
    #[serde(default)]
    pub institution_type: Option<String>,
    #[serde(default)]
    pub institution_size: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub date_precision: Option<String>,
    #[serde(default)]
    pub discovery_date: Option<String>,
    #[serde(default)]
    pub source_published_date: Option<String>,
    #[serde(default)]
    pub ingested_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub enriched_summary: Option<String>,
    #[serde(default)]
    pub initial_access_description: Option<String>,
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub all_urls: Vec<String>,
    #[serde(default)]
    pub leak_site_url: Option<String>,
    #[serde(default)]
    pub attack_type_hint: Option<String>,
    #[serde(default)]
    pub attack_category: Option<String>,
    #[serde(default)]
    pub incident_severity: Option<String>,
    pub status: String,
    pub source_confidence: String,
    #[serde(default)]
    pub threat_actor_name: Option<String>,
    #[serde(default)]
    pub threat_actor_category: Option<String>,
    #[serde(default)]
    pub threat_actor_motivation: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub mitre_attack_techniques: Vec<MitreTechnique>,
    #[serde(default)]
    pub attack_dynamics: Option<AttackDynamics>,
    #[serde(default)]
    pub data_impact: Option<DataImpact>,
    #[serde(default)]
    pub system_impact: Option<SystemImpact>,
    #[serde(default)]
    pub user_impact: Option<UserImpact>,
    #[serde(default)]
    pub financial_impact: Option<FinancialImpact>,
    #[serde(default)]
    pub regulatory_impact: Option<RegulatoryImpact>,
    #[serde(default)]
    pub recovery_metrics: Option<RecoveryMetrics>,
    #[serde(default)]
    pub transparency_metrics: Option<TransparencyMetrics>,
    #[serde(default)]
    pub education_relevance: Option<EducationRelevance>,
    pub llm_enriched: bool,
    #[serde(default)]
    pub llm_enriched_at: Option<String>,
    #[serde(default)]
    pub sources: Vec<IncidentSource>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Incident list response: one page of summaries plus navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentListResponse {
    pub incidents: Vec<IncidentSummary>,
    pub pagination: PageMeta,
}

/// Valid values per filter dimension, enumerated by the feed so filter
/// controls never have to guess.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub attack_categories: Vec<String>,
    #[serde(default)]
    pub ransomware_families: Vec<String>,
    #[serde(default)]
    pub threat_actors: Vec<String>,
    #[serde(default)]
    pub institution_types: Vec<String>,
    #[serde(default)]
    pub years: Vec<i32>,
}

/// Headline counters for the landing view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_incidents: u64,
    pub enriched_incidents: u64,
    pub unenriched_incidents: u64,
    pub incidents_with_ransomware: u64,
    pub incidents_with_data_breach: u64,
    pub countries_affected: u64,
    pub unique_threat_actors: u64,
    pub unique_ransomware_families: u64,
    pub last_updated: String,
}

/// Trimmed incident row for the landing view's recent-activity list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentIncident {
    pub incident_id: String,
    pub university_name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub attack_category: Option<String>,
    #[serde(default)]
    pub ransomware_family: Option<String>,
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub threat_actor_name: Option<String>,
}

impl From<&IncidentSummary> for RecentIncident {
    fn from(s: &IncidentSummary) -> Self {
        Self {
            incident_id: s.incident_id.clone(),
            university_name: s.university_name.clone(),
            country: s.country.clone(),
            attack_category: s.attack_category.clone(),
            ransomware_family: s.ransomware_family.clone(),
            incident_date: s.incident_date.clone(),
            title: s.title.clone(),
            threat_actor_name: s.threat_actor_name.clone(),
        }
    }
}

/// Composite bundle for the landing view: stats, three category aggregates,
/// one time series, and recent incidents in a single fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub incidents_by_country: Vec<crate::analytics::CountByCategory>,
    pub incidents_by_attack_type: Vec<crate::analytics::CountByCategory>,
    pub incidents_by_ransomware: Vec<crate::analytics::CountByCategory>,
    pub incidents_over_time: Vec<crate::analytics::TimeSeriesPoint>,
    pub recent_incidents: Vec<RecentIncident>,
}
