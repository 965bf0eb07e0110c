//! Category aggregation: group incidents by a raw classification value and
//! report counts with share-of-known percentages.

use std::collections::HashMap;

use crate::analytics::{round1, CountByCategory};
use crate::incident::IncidentSummary;
use crate::taxonomy::flags;

/// Classification axes an incident collection can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Country,
    AttackCategory,
    RansomwareFamily,
    ThreatActor,
    InstitutionType,
    Status,
}

impl Dimension {
    fn value<'a>(&self, incident: &'a IncidentSummary) -> Option<&'a str> {
        match self {
            Dimension::Country => incident.country.as_deref(),
            Dimension::AttackCategory => incident.attack_category.as_deref(),
            Dimension::RansomwareFamily => incident.ransomware_family.as_deref(),
            Dimension::ThreatActor => incident.threat_actor_name.as_deref(),
            Dimension::InstitutionType => incident.institution_type.as_deref(),
            Dimension::Status => Some(incident.status.as_str()),
        }
    }
}

/// Group `records` by the raw value of `dimension`.
///
/// Records where the dimension is absent are excluded from both the groups
/// and the percentage denominator; the denominator is "records with a known
/// value", not the grand total. Groups are keyed by the RAW value -- two
/// distinct tokens that happen to share a display label stay separate.
/// Output is ordered by count descending, ties by category ascending.
pub fn aggregate_by_category(
    records: &[IncidentSummary],
    dimension: Dimension,
) -> Vec<CountByCategory> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for incident in records {
        if let Some(value) = dimension.value(incident) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let known: u64 = counts.values().sum();
    let mut groups: Vec<(&str, u64)> = counts.into_iter().collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    groups
        .into_iter()
        .map(|(category, count)| {
            let percentage = if known == 0 {
                0.0
            } else {
                round1(count as f64 * 100.0 / known as f64)
            };
            let (country_code, flag_emoji) = match dimension {
                Dimension::Country => (
                    flags::iso_code(category).map(str::to_string),
                    Some(flags::country_flag(Some(category), None)),
                ),
                _ => (None, None),
            };
            CountByCategory {
                category: category.to_string(),
                count,
                percentage,
                country_code,
                flag_emoji,
            }
        })
        .collect()
}
