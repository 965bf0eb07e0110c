//! Regional grouper -- partition country aggregates into coarse geographic
//! regions via a static table, with an explicit "Other" catch-all.

use serde::{Deserialize, Serialize};

use crate::analytics::CountByCategory;

/// Bucket for countries that are in no region's member list. A deliberate
/// catch-all: unmapped countries are grouped, never dropped.
pub const OTHER_REGION: &str = "Other";

/// Hand-maintained region membership, keyed by full country name. This is a
/// coarse display grouping and is independent of any incident's own
/// sub-national `region` field.
pub const REGION_TABLE: &[(&str, &[&str])] = &[
    ("North America", &["United States", "Canada", "Mexico"]),
    (
        "Europe",
        &[
            "United Kingdom",
            "Germany",
            "France",
            "Italy",
            "Spain",
            "Netherlands",
            "Belgium",
            "Austria",
            "Switzerland",
            "Poland",
            "Sweden",
            "Norway",
            "Denmark",
            "Finland",
            "Ireland",
            "Portugal",
            "Greece",
            "Czech Republic",
            "Hungary",
            "Romania",
            "Bulgaria",
            "Croatia",
            "Slovakia",
            "Slovenia",
            "Lithuania",
            "Latvia",
            "Estonia",
            "Luxembourg",
            "Malta",
            "Cyprus",
            "Iceland",
        ],
    ),
    (
        "Asia Pacific",
        &[
            "Australia",
            "New Zealand",
            "Japan",
            "South Korea",
            "Singapore",
            "Hong Kong",
            "Taiwan",
            "India",
            "Philippines",
            "Malaysia",
            "Thailand",
            "Indonesia",
            "Vietnam",
            "China",
        ],
    ),
    (
        "Middle East & Africa",
        &[
            "Israel",
            "United Arab Emirates",
            "Saudi Arabia",
            "South Africa",
            "Egypt",
            "Nigeria",
            "Kenya",
        ],
    ),
    (
        "Latin America",
        &["Brazil", "Argentina", "Chile", "Colombia", "Peru"],
    ),
];

/// Region a country belongs to, or [`OTHER_REGION`] when unmapped.
pub fn region_for(country: &str) -> &'static str {
    REGION_TABLE
        .iter()
        .find(|(_, members)| members.contains(&country))
        .map(|(region, _)| *region)
        .unwrap_or(OTHER_REGION)
}

/// One region card: contained country aggregates and their summed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBucket {
    pub region: String,
    pub total: u64,
    pub countries: Vec<CountByCategory>,
}

/// Partition country aggregates into region buckets.
///
/// Within a region, countries keep the upstream aggregation order. Region
/// totals are summed from the contained counts on every call, never cached.
/// Buckets come back sorted by total descending (stable, so equal-total
/// regions keep first-encountered order), ready for rendering.
pub fn group_by_region(country_aggregates: &[CountByCategory]) -> Vec<RegionBucket> {
    let mut buckets: Vec<RegionBucket> = Vec::new();

    for aggregate in country_aggregates {
        let region = region_for(&aggregate.category);
        let bucket = match buckets.iter_mut().find(|b| b.region == region) {
            Some(existing) => existing,
            None => {
                buckets.push(RegionBucket {
                    region: region.to_string(),
                    total: 0,
                    countries: Vec::new(),
                });
                let last = buckets.len() - 1;
                &mut buckets[last]
            }
        };
        bucket.total += aggregate.count;
        bucket.countries.push(aggregate.clone());
    }

    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(category: &str, count: u64) -> CountByCategory {
        CountByCategory {
            category: category.to_string(),
            count,
            percentage: 0.0,
            country_code: None,
            flag_emoji: None,
        }
    }

    #[test]
    fn known_countries_map_to_their_region() {
        assert_eq!(region_for("United States"), "North America");
        assert_eq!(region_for("Germany"), "Europe");
        assert_eq!(region_for("Singapore"), "Asia Pacific");
        assert_eq!(region_for("Kenya"), "Middle East & Africa");
        assert_eq!(region_for("Chile"), "Latin America");
    }

    #[test]
    fn unmapped_country_lands_in_other_with_its_count() {
        let buckets = group_by_region(&[agg("United States", 10), agg("Atlantis", 4)]);

        let other = buckets
            .iter()
            .find(|b| b.region == OTHER_REGION)
            .expect("Other bucket present");
        assert_eq!(other.total, 4);
        assert_eq!(other.countries.len(), 1);
        assert_eq!(other.countries[0].category, "Atlantis");
    }

    #[test]
    fn within_region_order_follows_input() {
        // Upstream aggregation orders by count; the grouper must not re-sort.
        let buckets = group_by_region(&[
            agg("United Kingdom", 30),
            agg("France", 20),
            agg("Germany", 10),
        ]);
        let europe = &buckets[0];
        let order: Vec<&str> = europe.countries.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["United Kingdom", "France", "Germany"]);
        assert_eq!(europe.total, 60);
    }

    #[test]
    fn buckets_sorted_by_total_descending() {
        let buckets = group_by_region(&[
            agg("Canada", 5),
            agg("Germany", 8),
            agg("France", 4),
            agg("Brazil", 2),
        ]);
        let regions: Vec<&str> = buckets.iter().map(|b| b.region.as_str()).collect();
        assert_eq!(regions, vec!["Europe", "North America", "Latin America"]);
    }

    #[test]
    fn totals_recomputed_from_input() {
        let first = group_by_region(&[agg("Canada", 5)]);
        assert_eq!(first[0].total, 5);
        // Changed upstream aggregates produce changed totals; nothing sticks.
        let second = group_by_region(&[agg("Canada", 9), agg("Mexico", 1)]);
        assert_eq!(second[0].total, 10);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(group_by_region(&[]).is_empty());
    }
}
