/// Header and enum-label normalization for report exports.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// `"Manual CPC"` -> `"MANUAL_CPC"`, `"Target impression share"` -> `"TARGET_IMPRESSION_SHARE"`.
pub(crate) fn enum_token(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Placeholder cells the export writes instead of leaving them empty.
pub(crate) fn is_blank(value: &str) -> bool {
    matches!(value.trim(), "" | "--")
}
