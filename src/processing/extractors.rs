use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

lazy_static! {
    // "Age:" followed by optional whitespace and a digit run, anywhere in the
    // document text. Only the first occurrence is considered.
    static ref AGE_PATTERN: Regex = Regex::new(r"(?i)\bAge:\s*(\d+)\b").unwrap();
}

/// Searches the raw OCR text for an `Age: XX` pattern and returns the parsed
/// age. Returns `None` when the pattern is absent, or when the captured
/// digits do not fit an integer (an oversized digit run must not panic).
pub fn extract_age(text: &str) -> Option<u32> {
    let captures = match AGE_PATTERN.captures(text) {
        Some(captures) => captures,
        None => {
            debug!("Age pattern 'Age: XX' not found in OCR text");
            return None;
        }
    };

    let digits = &captures[1];
    match digits.parse::<u32>() {
        Ok(age) => {
            debug!("Found age pattern. Extracted age: {}", age);
            Some(age)
        }
        Err(e) => {
            warn!(
                "Found age pattern '{}' but digits '{}' invalid: {}",
                &captures[0], digits, e
            );
            None
        }
    }
}
