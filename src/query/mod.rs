//! Query shaping -- filter descriptors and pagination for incident lists.
//!
//! Filters are independent, optional dimensions combined with AND; free-text
//! search is ORed across name fields and ANDed against the structured
//! filters. Any filter or search change invalidates the current page offset,
//! so mutation goes through setters that reset to page 1.

pub mod page;

use serde::{Deserialize, Serialize};

use crate::incident::IncidentSummary;

/// Default page size for list views. Fixed per session; the feed accepts an
/// override but the UI does not expose one.
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Structured filter dimensions. Each is independently optional; an unset
/// dimension imposes no constraint (it is not a filter on null).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ransomware_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enriched_only: bool,
}

impl IncidentFilter {
    /// Number of active dimensions, as shown on the filter toggle badge.
    pub fn active_count(&self) -> usize {
        [
            self.country.is_some(),
            self.attack_category.is_some(),
            self.ransomware_family.is_some(),
            self.threat_actor.is_some(),
            self.institution_type.is_some(),
            self.year.is_some(),
            self.enriched_only,
        ]
        .iter()
        .filter(|v| **v)
        .count()
    }
}

/// A complete list query: structured filters, free-text search, and the
/// page window. This is the descriptor sent to the feed and the predicate
/// applied to local snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentQuery {
    #[serde(default)]
    pub filter: IncidentFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

impl Default for IncidentQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl IncidentQuery {
    /// The unfiltered default query at the given page size.
    pub fn new(per_page: u64) -> Self {
        Self {
            filter: IncidentFilter::default(),
            search: None,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Replace the structured filters. Resets to the first page: a page
    /// offset taken against the previous result set is meaningless.
    pub fn set_filter(&mut self, filter: IncidentFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_country(&mut self, country: Option<String>) {
        self.filter.country = none_if_empty(country);
        self.page = 1;
    }

    pub fn set_attack_category(&mut self, category: Option<String>) {
        self.filter.attack_category = none_if_empty(category);
        self.page = 1;
    }

    pub fn set_ransomware_family(&mut self, family: Option<String>) {
        self.filter.ransomware_family = none_if_empty(family);
        self.page = 1;
    }

    pub fn set_threat_actor(&mut self, actor: Option<String>) {
        self.filter.threat_actor = none_if_empty(actor);
        self.page = 1;
    }

    pub fn set_institution_type(&mut self, kind: Option<String>) {
        self.filter.institution_type = none_if_empty(kind);
        self.page = 1;
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.filter.year = year;
        self.page = 1;
    }

    pub fn set_enriched_only(&mut self, enriched_only: bool) {
        self.filter.enriched_only = enriched_only;
        self.page = 1;
    }

    /// Replace the free-text search term. Resets to the first page.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = none_if_empty(search);
        self.page = 1;
    }

    /// Jump to a page. Clamped to 1 at the low end here; the high end is
    /// clamped against the actual total by [`page::paginate`].
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Drop every filter and the search term, restoring the default query
    /// exactly (page size is session-fixed and survives the reset).
    pub fn clear(&mut self) {
        *self = Self::new(self.per_page);
    }

    /// Apply this query's predicate to a single incident. Mirrors the
    /// server-side semantics: all set dimensions must hold, and the search
    /// term must match at least one of institution name, title, or threat
    /// actor name, case-insensitively.
    pub fn matches(&self, incident: &IncidentSummary) -> bool {
        let f = &self.filter;

        if let Some(want) = &f.country {
            if incident.country.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &f.attack_category {
            if incident.attack_category.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &f.ransomware_family {
            if incident.ransomware_family.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &f.threat_actor {
            if incident.threat_actor_name.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &f.institution_type {
            if incident.institution_type.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = f.year {
            if incident.incident_year() != Some(want) {
                return false;
            }
        }
        if f.enriched_only && !incident.llm_enriched {
            return false;
        }

        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = contains_ci(Some(&incident.university_name), &needle)
                || contains_ci(incident.title.as_deref(), &needle)
                || contains_ci(incident.threat_actor_name.as_deref(), &needle);
            if !hit {
                return false;
            }
        }

        true
    }

    /// URL query pairs for the feed's list endpoint. Unset dimensions are
    /// omitted entirely.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        let f = &self.filter;
        if let Some(v) = &f.country {
            params.push(("country", v.clone()));
        }
        if let Some(v) = &f.attack_category {
            params.push(("attack_category", v.clone()));
        }
        if let Some(v) = &f.ransomware_family {
            params.push(("ransomware_family", v.clone()));
        }
        if let Some(v) = &f.threat_actor {
            params.push(("threat_actor", v.clone()));
        }
        if let Some(v) = &f.institution_type {
            params.push(("institution_type", v.clone()));
        }
        if let Some(v) = f.year {
            params.push(("year", v.to_string()));
        }
        if f.enriched_only {
            params.push(("enriched_only", "true".to_string()));
        }
        if let Some(v) = &self.search {
            params.push(("search", v.clone()));
        }
        params
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ci(haystack: Option<&str>, lowered_needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(lowered_needle))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(id: &str) -> IncidentSummary {
        serde_json::from_str(&format!(
            r#"{{
                "incident_id": "{id}",
                "university_name": "Example State University",
                "status": "confirmed",
                "source_confidence": "high",
                "llm_enriched": false
            }}"#
        ))
        .unwrap()
    }

    fn populated_incident() -> IncidentSummary {
        let mut i = incident("inc-100");
        i.country = Some("United States".into());
        i.attack_category = Some("ransomware".into());
        i.ransomware_family = Some("lockbit".into());
        i.threat_actor_name = Some("Vice Society".into());
        i.institution_type = Some("university".into());
        i.incident_date = Some("2023-06-14".into());
        i.title = Some("Campus network encrypted over the weekend".into());
        i.llm_enriched = true;
        i
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = IncidentQuery::default();
        assert!(q.matches(&incident("a")));
        assert!(q.matches(&populated_incident()));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut q = IncidentQuery::default();
        q.set_country(Some("United States".into()));
        q.set_year(Some(2023));
        assert!(q.matches(&populated_incident()));

        q.set_year(Some(2022));
        assert!(!q.matches(&populated_incident()));
    }

    #[test]
    fn unset_dimension_is_not_a_null_filter() {
        // An incident with no country must still pass a query that does not
        // constrain country.
        let mut q = IncidentQuery::default();
        q.set_year(Some(2023));
        let mut i = incident("b");
        i.incident_date = Some("2023-01-01".into());
        assert!(q.matches(&i));
    }

    #[test]
    fn search_is_or_across_fields_and_case_insensitive() {
        let mut q = IncidentQuery::default();
        q.set_search(Some("vice".into()));
        assert!(q.matches(&populated_incident()));

        q.set_search(Some("WEEKEND".into()));
        assert!(q.matches(&populated_incident()));

        q.set_search(Some("example state".into()));
        assert!(q.matches(&populated_incident()));

        q.set_search(Some("no such thing".into()));
        assert!(!q.matches(&populated_incident()));
    }

    #[test]
    fn search_is_anded_with_filters() {
        let mut q = IncidentQuery::default();
        q.set_search(Some("vice".into()));
        q.set_country(Some("Canada".into()));
        assert!(!q.matches(&populated_incident()));
    }

    #[test]
    fn narrower_filter_yields_subset() {
        let records: Vec<IncidentSummary> = (0..6)
            .map(|n| {
                let mut i = incident(&format!("inc-{n}"));
                i.country = Some(if n % 2 == 0 { "Canada" } else { "France" }.into());
                i.llm_enriched = n % 3 == 0;
                i
            })
            .collect();

        let mut broad = IncidentQuery::default();
        broad.set_country(Some("Canada".into()));
        let mut narrow = broad.clone();
        narrow.set_enriched_only(true);

        let broad_ids: Vec<&str> = records
            .iter()
            .filter(|i| broad.matches(i))
            .map(|i| i.incident_id.as_str())
            .collect();
        let narrow_ids: Vec<&str> = records
            .iter()
            .filter(|i| narrow.matches(i))
            .map(|i| i.incident_id.as_str())
            .collect();

        assert!(!narrow_ids.is_empty());
        assert!(narrow_ids.iter().all(|id| broad_ids.contains(id)));
    }

    #[test]
    fn any_change_resets_page() {
        let mut q = IncidentQuery::default();
        q.set_page(7);
        q.set_country(Some("Canada".into()));
        assert_eq!(q.page, 1);

        q.set_page(4);
        q.set_search(Some("college".into()));
        assert_eq!(q.page, 1);

        q.set_page(3);
        q.set_enriched_only(true);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn clear_restores_default_exactly() {
        let mut q = IncidentQuery::new(50);
        q.set_country(Some("Canada".into()));
        q.set_search(Some("college".into()));
        q.set_page(9);
        q.clear();
        assert_eq!(q, IncidentQuery::new(50));
        // Clearing twice is a no-op.
        q.clear();
        assert_eq!(q, IncidentQuery::new(50));
    }

    #[test]
    fn empty_strings_are_treated_as_unset() {
        let mut q = IncidentQuery::default();
        q.set_country(Some(String::new()));
        q.set_search(Some(String::new()));
        assert_eq!(q.filter.country, None);
        assert_eq!(q.search, None);
        assert_eq!(q.filter.active_count(), 0);
    }

    #[test]
    fn query_params_omit_unset_dimensions() {
        let mut q = IncidentQuery::default();
        q.set_country(Some("France".into()));
        q.set_enriched_only(true);
        q.set_page(2);

        let params = q.query_params();
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("country", "France".to_string())));
        assert!(params.contains(&("enriched_only", "true".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "year"));
        assert!(!params.iter().any(|(k, _)| *k == "search"));
    }
}
