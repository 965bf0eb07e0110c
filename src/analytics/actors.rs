//! Per-threat-actor rollups: incident counts, targeted countries, and
//! ransomware families across each actor's incidents.

use crate::analytics::ThreatActorSummary;
use crate::incident::IncidentSummary;

/// Roll up incidents per threat actor, most active first (ties by name).
///
/// `countries_targeted` and `ransomware_families` are insertion-ordered
/// unique sequences -- first-encountered order is what keeps "+N more"
/// display truncation stable between renders. `first_seen`/`last_seen` are
/// the min/max `incident_date`; incidents without a date are excluded from
/// the min/max but still count toward `incident_count`. At most `limit`
/// actors are returned.
pub fn rollup_by_actor(records: &[IncidentSummary], limit: usize) -> Vec<ThreatActorSummary> {
    let mut rollups: Vec<ThreatActorSummary> = Vec::new();

    for incident in records {
        let Some(name) = incident.threat_actor_name.as_deref() else {
            continue;
        };

        let pos = match rollups.iter().position(|r| r.name == name) {
            Some(pos) => pos,
            None => {
                rollups.push(ThreatActorSummary {
                    name: name.to_string(),
                    incident_count: 0,
                    countries_targeted: Vec::new(),
                    ransomware_families: Vec::new(),
                    first_seen: None,
                    last_seen: None,
                });
                rollups.len() - 1
            }
        };
        let entry = &mut rollups[pos];

        entry.incident_count += 1;

        if let Some(country) = incident.country.as_deref() {
            push_unique(&mut entry.countries_targeted, country);
        }
        if let Some(family) = incident.ransomware_family.as_deref() {
            push_unique(&mut entry.ransomware_families, family);
        }

        // ISO date strings order lexicographically, including truncated
        // month/year precision values.
        if let Some(date) = incident.incident_date.as_deref() {
            match &entry.first_seen {
                Some(first) if first.as_str() <= date => {}
                _ => entry.first_seen = Some(date.to_string()),
            }
            match &entry.last_seen {
                Some(last) if last.as_str() >= date => {}
                _ => entry.last_seen = Some(date.to_string()),
            }
        }
    }

    rollups.sort_by(|a, b| {
        b.incident_count
            .cmp(&a.incident_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    rollups.truncate(limit);
    rollups
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
