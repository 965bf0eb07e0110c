//! Country flag resolution with a three-tier fallback: explicit glyph from
//! the feed, ISO-code derivation, then a static name table.

/// Glyph shown when no flag can be resolved.
pub const UNKNOWN_REGION: &str = "🌍";

/// Full country name to ISO 3166-1 alpha-2 code. Covers the countries the
/// feed is known to emit; anything else falls back to [`UNKNOWN_REGION`].
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("United Kingdom", "GB"),
    ("Canada", "CA"),
    ("Australia", "AU"),
    ("Germany", "DE"),
    ("France", "FR"),
    ("Italy", "IT"),
    ("Spain", "ES"),
    ("Netherlands", "NL"),
    ("Belgium", "BE"),
    ("Switzerland", "CH"),
    ("Austria", "AT"),
    ("Sweden", "SE"),
    ("Norway", "NO"),
    ("Denmark", "DK"),
    ("Finland", "FI"),
    ("Poland", "PL"),
    ("Czech Republic", "CZ"),
    ("Ireland", "IE"),
    ("Portugal", "PT"),
    ("Greece", "GR"),
    ("Hungary", "HU"),
    ("Romania", "RO"),
    ("Bulgaria", "BG"),
    ("Croatia", "HR"),
    ("Slovakia", "SK"),
    ("Slovenia", "SI"),
    ("Lithuania", "LT"),
    ("Latvia", "LV"),
    ("Estonia", "EE"),
    ("Luxembourg", "LU"),
    ("Malta", "MT"),
    ("Cyprus", "CY"),
    ("Iceland", "IS"),
    ("Japan", "JP"),
    ("China", "CN"),
    ("India", "IN"),
    ("South Korea", "KR"),
    ("Singapore", "SG"),
    ("Malaysia", "MY"),
    ("Thailand", "TH"),
    ("Philippines", "PH"),
    ("Indonesia", "ID"),
    ("Vietnam", "VN"),
    ("New Zealand", "NZ"),
    ("Brazil", "BR"),
    ("Mexico", "MX"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("Colombia", "CO"),
    ("Peru", "PE"),
    ("South Africa", "ZA"),
    ("Egypt", "EG"),
    ("Nigeria", "NG"),
    ("Kenya", "KE"),
    ("Israel", "IL"),
    ("United Arab Emirates", "AE"),
    ("Saudi Arabia", "SA"),
    ("Turkey", "TR"),
    ("Russia", "RU"),
    ("Ukraine", "UA"),
    ("Pakistan", "PK"),
    ("Bangladesh", "BD"),
    ("Taiwan", "TW"),
    ("Hong Kong", "HK"),
];

/// Look up the ISO code for a full country name.
pub fn iso_code(country: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
}

/// Resolve the flag glyph for a country.
///
/// The feed's explicit `flag_emoji` always wins. Otherwise a 2-letter ISO
/// code is mapped to its regional-indicator pair; a full name goes through
/// [`COUNTRY_CODES`] first. Never fails: unresolvable input yields
/// [`UNKNOWN_REGION`].
pub fn country_flag(country: Option<&str>, flag_emoji: Option<&str>) -> String {
    if let Some(glyph) = flag_emoji {
        if !glyph.is_empty() {
            return glyph.to_string();
        }
    }

    let country = match country {
        Some(c) if !c.is_empty() => c,
        _ => return UNKNOWN_REGION.to_string(),
    };

    if let Some(flag) = flag_from_code(country) {
        return flag;
    }

    match iso_code(country).and_then(flag_from_code) {
        Some(flag) => flag,
        None => UNKNOWN_REGION.to_string(),
    }
}

/// Map a 2-letter ISO code to its flag via regional indicator symbols.
fn flag_from_code(code: &str) -> Option<String> {
    let mut chars = code.chars();
    let (a, b) = (chars.next()?, chars.next()?);
    if chars.next().is_some() || !a.is_ascii_alphabetic() || !b.is_ascii_alphabetic() {
        return None;
    }

    // 'A' maps to U+1F1E6 REGIONAL INDICATOR SYMBOL LETTER A.
    let base = 0x1F1E6;
    let mut flag = String::with_capacity(8);
    for ch in [a, b] {
        let offset = (ch.to_ascii_uppercase() as u32) - ('A' as u32);
        flag.push(char::from_u32(base + offset)?);
    }
    Some(flag)
}
