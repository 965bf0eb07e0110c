//! Headline dashboard counters and percent-of-total rates.

use std::collections::HashSet;

use crate::analytics::round1;
use crate::incident::{DashboardStats, IncidentSummary};

/// Compute the landing-view counters from a full incident snapshot.
///
/// `last_updated` is the feed-reported snapshot timestamp, passed through
/// untouched. Counter semantics: an incident counts as ransomware when a
/// family is attributed or its attack category contains "ransomware"; as a
/// data breach when the category contains "data_breach".
pub fn dashboard_stats(records: &[IncidentSummary], last_updated: &str) -> DashboardStats {
    let mut enriched = 0u64;
    let mut with_ransomware = 0u64;
    let mut with_data_breach = 0u64;
    let mut countries: HashSet<&str> = HashSet::new();
    let mut actors: HashSet<&str> = HashSet::new();
    let mut families: HashSet<&str> = HashSet::new();

    for incident in records {
        if incident.llm_enriched {
            enriched += 1;
        }

        let category = incident
            .attack_category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        if incident.ransomware_family.is_some() || category.contains("ransomware") {
            with_ransomware += 1;
        }
        if category.contains("data_breach") {
            with_data_breach += 1;
        }

        if let Some(c) = incident.country.as_deref() {
            countries.insert(c);
        }
        if let Some(a) = incident.threat_actor_name.as_deref() {
            actors.insert(a);
        }
        if let Some(f) = incident.ransomware_family.as_deref() {
            families.insert(f);
        }
    }

    let total = records.len() as u64;
    DashboardStats {
        total_incidents: total,
        enriched_incidents: enriched,
        unenriched_incidents: total - enriched,
        incidents_with_ransomware: with_ransomware,
        incidents_with_data_breach: with_data_breach,
        countries_affected: countries.len() as u64,
        unique_threat_actors: actors.len() as u64,
        unique_ransomware_families: families.len() as u64,
        last_updated: last_updated.to_string(),
    }
}

/// Percent-of-total rate for dashboard-level metrics (ransomware rate, data
/// breach rate, enrichment coverage). Unlike category percentages, the
/// denominator here is ALL incidents, and callers must label it as such.
pub fn rate_of_total(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 * 100.0 / total as f64)
}
