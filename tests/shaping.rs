//! End-to-end shaping tests -- run a fixture snapshot through the filter,
//! pagination, aggregation, and regional grouping layers the way a view
//! would.

use eduthreat::analytics::{
    aggregate_by_category, group_by_region, monthly_series_to_latest, rollup_by_actor,
    stats::rate_of_total, dashboard_stats, Dimension,
};
use eduthreat::incident::IncidentSummary;
use eduthreat::query::{page::paginate, IncidentQuery};
use serde_json::json;

fn incident(
    id: u32,
    country: Option<&str>,
    attack: Option<&str>,
    actor: Option<&str>,
    family: Option<&str>,
    date: Option<&str>,
    enriched: bool,
) -> IncidentSummary {
    serde_json::from_value(json!({
        "incident_id": format!("inc-{id:03}"),
        "university_name": format!("University {id}"),
        "country": country,
        "attack_category": attack,
        "threat_actor_name": actor,
        "ransomware_family": family,
        "incident_date": date,
        "status": "confirmed",
        "source_confidence": "high",
        "llm_enriched": enriched
    }))
    .unwrap()
}

fn snapshot() -> Vec<IncidentSummary> {
    vec![
        incident(1, Some("United States"), Some("ransomware"), Some("LockBit"), Some("lockbit"), Some("2024-01-10"), true),
        incident(2, Some("United States"), Some("ransomware"), Some("LockBit"), Some("lockbit"), Some("2024-03-05"), true),
        incident(3, Some("United States"), Some("phishing"), None, None, Some("2024-02-14"), false),
        incident(4, Some("Canada"), Some("data_breach"), Some("Vice Society"), None, Some("2024-03-20"), true),
        incident(5, Some("United Kingdom"), Some("ransomware"), Some("Vice Society"), Some("hello_kitty"), Some("2024-01-28"), false),
        incident(6, Some("Germany"), Some("ddos"), None, None, Some("2024-03-01"), false),
        incident(7, Some("Atlantis"), Some("data_breach"), None, None, None, false),
        incident(8, None, None, Some("LockBit"), None, Some("2024-02-02"), true),
    ]
}

#[test]
fn filtered_list_view_pipeline() {
    let records = snapshot();

    // The user picks a country, then narrows further by enrichment.
    let mut query = IncidentQuery::new(2);
    query.set_country(Some("United States".into()));
    let matched: Vec<&IncidentSummary> = records.iter().filter(|i| query.matches(i)).collect();
    assert_eq!(matched.len(), 3);

    query.set_page(2);
    query.set_enriched_only(true);
    // The narrowing reset pagination.
    assert_eq!(query.page, 1);

    let narrowed: Vec<&IncidentSummary> = records.iter().filter(|i| query.matches(i)).collect();
    assert_eq!(narrowed.len(), 2);
    // Subset property: every narrowed hit was already a broad hit.
    assert!(narrowed
        .iter()
        .all(|n| matched.iter().any(|m| m.incident_id == n.incident_id)));

    let meta = paginate(narrowed.len() as u64, query.page, query.per_page);
    assert_eq!(meta.total_pages, 1);
    assert_eq!(meta.display_range(), Some((1, 2)));
}

#[test]
fn attack_type_chart_pipeline() {
    let records = snapshot();
    let aggregates = aggregate_by_category(&records, Dimension::AttackCategory);

    // 7 records carry a category; inc-008 does not and is excluded.
    let total: u64 = aggregates.iter().map(|a| a.count).sum();
    assert_eq!(total, 7);

    let shaped: Vec<(&str, u64, f64)> = aggregates
        .iter()
        .map(|a| (a.category.as_str(), a.count, a.percentage))
        .collect();
    assert_eq!(
        shaped,
        vec![
            ("ransomware", 3, 42.9),
            ("data_breach", 2, 28.6),
            ("ddos", 1, 14.3),
            ("phishing", 1, 14.3),
        ]
    );

    // The dashboard-level ransomware rate uses the grand total instead.
    assert_eq!(rate_of_total(3, records.len() as u64), 37.5);
}

#[test]
fn timeline_chart_is_gap_free() {
    let records = snapshot();
    let series = monthly_series_to_latest(&records, 3);

    let keys: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
    let counts: Vec<u64> = series.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![2, 2, 3]);
}

#[test]
fn region_cards_pipeline() {
    let records = snapshot();
    let countries = aggregate_by_category(&records, Dimension::Country);
    let buckets = group_by_region(&countries);

    // North America leads: US(3) + Canada(1).
    assert_eq!(buckets[0].region, "North America");
    assert_eq!(buckets[0].total, 4);

    // The fictional country is grouped, not dropped.
    let other = buckets
        .iter()
        .find(|b| b.region == "Other")
        .expect("unmapped country lands in Other");
    assert_eq!(other.total, 1);
    assert_eq!(other.countries[0].category, "Atlantis");

    // Region totals track the country aggregation exactly.
    let sum_of_buckets: u64 = buckets.iter().map(|b| b.total).sum();
    let sum_of_countries: u64 = countries.iter().map(|c| c.count).sum();
    assert_eq!(sum_of_buckets, sum_of_countries);
}

#[test]
fn threat_actor_cards_pipeline() {
    let records = snapshot();
    let actors = rollup_by_actor(&records, 10);

    assert_eq!(actors[0].name, "LockBit");
    assert_eq!(actors[0].incident_count, 3);
    // inc-008 has no country; it still counted above but added nothing here.
    assert_eq!(actors[0].countries_targeted, vec!["United States"]);
    assert_eq!(actors[0].first_seen.as_deref(), Some("2024-01-10"));
    assert_eq!(actors[0].last_seen.as_deref(), Some("2024-03-05"));

    let vice = &actors[1];
    assert_eq!(vice.name, "Vice Society");
    assert_eq!(vice.countries_targeted, vec!["Canada", "United Kingdom"]);
}

#[test]
fn landing_stats_pipeline() {
    let records = snapshot();
    let stats = dashboard_stats(&records, "2024-04-01T12:00:00Z");

    assert_eq!(stats.total_incidents, 8);
    assert_eq!(stats.enriched_incidents, 4);
    assert_eq!(stats.unenriched_incidents, 4);
    assert_eq!(stats.incidents_with_ransomware, 3);
    assert_eq!(stats.incidents_with_data_breach, 2);
    assert_eq!(stats.countries_affected, 5);
    assert_eq!(stats.unique_threat_actors, 2);
    assert_eq!(stats.unique_ransomware_families, 2);
}
