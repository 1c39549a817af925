/// Canonical form for general field comparison: plain lowercasing.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
}

/// Strips every non-digit character. Applied to both the expected phone and
/// the whole extracted text so that dashes, spaces, and country-code
/// parentheses never cause a false negative. The trade-off (a coincidental
/// digit run elsewhere in the document can match) is accepted.
pub fn normalize_phone(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
