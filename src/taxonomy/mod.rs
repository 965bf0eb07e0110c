//! Taxonomy normalization -- raw category tokens to display-safe labels,
//! style tags, and country flags.

pub mod flags;

pub use flags::country_flag;

/// Label used whenever a classification field is absent or empty.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Semantic style tag attached to a category value. The presentation layer
/// maps these to concrete colors; the mapping here only decides *which* tag
/// a raw token gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Danger,
    Warning,
    Caution,
    Info,
    Accent,
    Success,
    Muted,
    Neutral,
}

impl StyleTag {
    /// Stable CSS class name for this tag.
    pub fn css_class(&self) -> &'static str {
        match self {
            StyleTag::Danger => "tag-danger",
            StyleTag::Warning => "tag-warning",
            StyleTag::Caution => "tag-caution",
            StyleTag::Info => "tag-info",
            StyleTag::Accent => "tag-accent",
            StyleTag::Success => "tag-success",
            StyleTag::Muted => "tag-muted",
            StyleTag::Neutral => "tag-neutral",
        }
    }
}

/// Classification axes that carry substring-based style rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDimension {
    AttackType,
    Severity,
    Status,
}

/// Ordered (substring, tag) rules per dimension. Evaluated top to bottom,
/// first match wins; a token containing several keywords resolves to the
/// highest-priority one.
const ATTACK_TYPE_RULES: &[(&str, StyleTag)] = &[
    ("ransomware", StyleTag::Danger),
    ("phishing", StyleTag::Warning),
    ("data_breach", StyleTag::Info),
    ("ddos", StyleTag::Caution),
    ("malware", StyleTag::Accent),
];

const SEVERITY_RULES: &[(&str, StyleTag)] = &[
    ("critical", StyleTag::Danger),
    ("high", StyleTag::Warning),
    ("medium", StyleTag::Caution),
    ("low", StyleTag::Success),
];

const STATUS_RULES: &[(&str, StyleTag)] = &[
    ("confirmed", StyleTag::Success),
    ("suspected", StyleTag::Caution),
];

/// Turn a raw `snake_case` category token into a title-cased display label.
///
/// Absent or empty input yields [`UNKNOWN_LABEL`]. No semantic merging
/// happens here: distinct raw tokens stay distinct.
pub fn display_label(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return UNKNOWN_LABEL.to_string(),
    };

    let spaced = raw.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
            if !ch.is_alphanumeric() {
                at_word_start = true;
            }
        }
    }
    out
}

/// Resolve the style tag for a raw token on the given dimension.
///
/// Matching is substring containment against the lowercased token, in rule
/// order. Unmatched or absent tokens get the dimension's default tag.
pub fn style_for(dimension: StyleDimension, raw: Option<&str>) -> StyleTag {
    let (rules, default) = match dimension {
        StyleDimension::AttackType => (ATTACK_TYPE_RULES, StyleTag::Neutral),
        StyleDimension::Severity => (SEVERITY_RULES, StyleTag::Info),
        StyleDimension::Status => (STATUS_RULES, StyleTag::Muted),
    };

    let token = match raw {
        Some(s) => s.to_lowercase(),
        None => return default,
    };

    rules
        .iter()
        .find(|(needle, _)| token.contains(needle))
        .map(|(_, tag)| *tag)
        .unwrap_or(default)
}

/// Human-readable date for an ISO `YYYY-MM-DD` (or truncated) date string.
///
/// Partial dates render at their precision ("Mar 2024", "2024"); anything
/// unparseable is passed through untouched rather than dropped.
pub fn format_date(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return UNKNOWN_LABEL.to_string(),
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return date.format("%b %Y").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_absent_is_unknown() {
        assert_eq!(display_label(None), "Unknown");
        assert_eq!(display_label(Some("")), "Unknown");
        assert_eq!(display_label(Some("   ")), "Unknown");
    }

    #[test]
    fn label_title_cases_snake_case() {
        assert_eq!(display_label(Some("data_breach")), "Data Breach");
        assert_eq!(display_label(Some("ransomware")), "Ransomware");
        assert_eq!(display_label(Some("third_party_vendor_breach")), "Third Party Vendor Breach");
    }

    #[test]
    fn label_preserves_inner_casing() {
        // Only the first character of each word is touched.
        assert_eq!(display_label(Some("dDoS_attack")), "DDoS Attack");
    }

    #[test]
    fn attack_type_priority_order() {
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("ransomware")),
            StyleTag::Danger
        );
        // Token containing two keywords resolves to the earlier rule.
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("ransomware_phishing_combo")),
            StyleTag::Danger
        );
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("spear_phishing")),
            StyleTag::Warning
        );
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("ddos")),
            StyleTag::Caution
        );
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("crypto_malware")),
            StyleTag::Accent
        );
        assert_eq!(
            style_for(StyleDimension::AttackType, Some("insider_threat")),
            StyleTag::Neutral
        );
        assert_eq!(style_for(StyleDimension::AttackType, None), StyleTag::Neutral);
    }

    #[test]
    fn severity_and_status_tags() {
        assert_eq!(style_for(StyleDimension::Severity, Some("Critical")), StyleTag::Danger);
        assert_eq!(style_for(StyleDimension::Severity, Some("low")), StyleTag::Success);
        assert_eq!(style_for(StyleDimension::Severity, Some("elevated")), StyleTag::Info);
        assert_eq!(style_for(StyleDimension::Status, Some("confirmed")), StyleTag::Success);
        assert_eq!(style_for(StyleDimension::Status, Some("suspected")), StyleTag::Caution);
        assert_eq!(style_for(StyleDimension::Status, Some("retracted")), StyleTag::Muted);
    }

    #[test]
    fn date_formatting_degrades_by_precision() {
        assert_eq!(format_date(Some("2024-03-15")), "Mar 15, 2024");
        assert_eq!(format_date(Some("2024-03")), "Mar 2024");
        assert_eq!(format_date(Some("not-a-date")), "not-a-date");
        assert_eq!(format_date(None), "Unknown");
    }
}
