//! Monthly time series over incident dates, gap-free for charting.

use crate::analytics::TimeSeriesPoint;
use crate::incident::IncidentSummary;

/// Calendar month used to anchor a series window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// `YYYY-MM` bucket key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    /// Parse the `YYYY-MM` prefix of an ISO date string.
    fn parse_prefix(date: &str) -> Option<Self> {
        let year: i32 = date.get(..4)?.parse().ok()?;
        if date.as_bytes().get(4) != Some(&b'-') {
            return None;
        }
        let month: u32 = date.get(5..7)?.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

/// Bucket incidents into calendar months over a window ending at `end`.
///
/// The window covers `window_months` consecutive months, inclusive of `end`.
/// Every month in the window appears in the output even with zero incidents,
/// so the series is gap-free. Incidents outside the window, or without a
/// parseable month in `incident_date`, are ignored.
pub fn monthly_series(
    records: &[IncidentSummary],
    window_months: u32,
    end: Month,
) -> Vec<TimeSeriesPoint> {
    if window_months == 0 {
        return Vec::new();
    }

    let end_index = end.index();
    let start_index = end_index - (window_months as i64 - 1);

    let mut counts = vec![0u64; window_months as usize];
    for incident in records {
        let Some(date) = incident.incident_date.as_deref() else {
            continue;
        };
        let Some(month) = Month::parse_prefix(date) else {
            continue;
        };
        let idx = month.index();
        if idx < start_index || idx > end_index {
            continue;
        }
        counts[(idx - start_index) as usize] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(offset, count)| TimeSeriesPoint {
            date: Month::from_index(start_index + offset as i64).key(),
            count,
        })
        .collect()
}

/// [`monthly_series`] anchored at the latest `incident_date` in the input.
/// Returns an empty series when no record carries a usable date.
pub fn monthly_series_to_latest(
    records: &[IncidentSummary],
    window_months: u32,
) -> Vec<TimeSeriesPoint> {
    let latest = records
        .iter()
        .filter_map(|i| i.incident_date.as_deref())
        .filter_map(Month::parse_prefix)
        .max_by_key(Month::index);

    match latest {
        Some(end) => monthly_series(records, window_months, end),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(id: u32, date: Option<&str>) -> IncidentSummary {
        let mut i: IncidentSummary = serde_json::from_str(&format!(
            r#"{{
                "incident_id": "inc-{id}",
                "university_name": "U{id}",
                "status": "confirmed",
                "source_confidence": "high",
                "llm_enriched": false
            }}"#
        ))
        .unwrap();
        i.incident_date = date.map(str::to_string);
        i
    }

    #[test]
    fn gap_months_appear_with_zero() {
        let records = vec![
            incident(0, Some("2024-01-15")),
            incident(1, Some("2024-03-02")),
            incident(2, Some("2024-03-20")),
        ];
        let series = monthly_series(&records, 3, Month::new(2024, 3));
        assert_eq!(series.len(), 3);
        assert_eq!(series[0], TimeSeriesPoint { date: "2024-01".into(), count: 1 });
        assert_eq!(series[1], TimeSeriesPoint { date: "2024-02".into(), count: 0 });
        assert_eq!(series[2], TimeSeriesPoint { date: "2024-03".into(), count: 2 });
    }

    #[test]
    fn window_spans_year_boundary() {
        let records = vec![
            incident(0, Some("2023-11-30")),
            incident(1, Some("2024-02-01")),
        ];
        let series = monthly_series(&records, 4, Month::new(2024, 2));
        let keys: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!(series[0].count, 1);
        assert_eq!(series[3].count, 1);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let records = vec![
            incident(0, Some("2020-01-01")),
            incident(1, Some("2024-06-01")),
            incident(2, Some("2024-05-01")),
        ];
        let series = monthly_series(&records, 2, Month::new(2024, 5));
        assert_eq!(series.iter().map(|p| p.count).sum::<u64>(), 1);
    }

    #[test]
    fn month_precision_dates_still_bucket() {
        let records = vec![incident(0, Some("2024-04"))];
        let series = monthly_series(&records, 1, Month::new(2024, 4));
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn unparseable_and_missing_dates_are_skipped() {
        let records = vec![
            incident(0, None),
            incident(1, Some("unknown")),
            incident(2, Some("2024")),
            incident(3, Some("2024-13-01")),
            incident(4, Some("2024-04-01")),
        ];
        let series = monthly_series(&records, 1, Month::new(2024, 4));
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn latest_anchor_is_derived_from_data() {
        let records = vec![
            incident(0, Some("2024-02-10")),
            incident(1, Some("2024-04-18")),
        ];
        let series = monthly_series_to_latest(&records, 3);
        let keys: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(keys, vec!["2024-02", "2024-03", "2024-04"]);
    }

    #[test]
    fn no_dates_means_empty_series() {
        assert!(monthly_series_to_latest(&[incident(0, None)], 12).is_empty());
        assert!(monthly_series(&[], 0, Month::new(2024, 1)).is_empty());
    }
}
