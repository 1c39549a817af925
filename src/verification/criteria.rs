use log::debug;

use crate::models::{FieldMatchResult, VerificationRequest};
use crate::processing::{extract_age, normalize_phone, normalize_text};

/// Computes the per-criterion booleans for a request against the extracted
/// document text.
///
/// Text fields use case-insensitive substring containment. The phone check
/// compares digit-only forms of both sides and is forced false when the
/// expected phone normalizes to nothing, so an empty digit run never matches
/// trivially.
pub fn evaluate(request: &VerificationRequest, text: &str) -> FieldMatchResult {
    let text_lower = normalize_text(text);

    let expected_phone = normalize_phone(&request.phone);
    let text_digits = normalize_phone(text);
    debug!("Normalized expected phone: '{}'", expected_phone);

    let result = FieldMatchResult {
        name_match: text_lower.contains(&normalize_text(&request.name)),
        email_match: text_lower.contains(&normalize_text(&request.email)),
        company_match: text_lower.contains(&normalize_text(&request.company)),
        destination_match: text_lower.contains(&normalize_text(&request.destination)),
        phone_match: !expected_phone.is_empty() && text_digits.contains(&expected_phone),
        age: extract_age(text),
    };

    debug!(
        "Verification checks: name: {}, email: {}, company: {}, destination: {}, phone: {}, age found: {}",
        result.name_match,
        result.email_match,
        result.company_match,
        result.destination_match,
        result.phone_match,
        result.age.is_some()
    );

    result
}

/// Names every failing criterion, in the fixed check order. The destination
/// entry carries the expected value so the caller can show targeted guidance.
pub fn failed_criteria(request: &VerificationRequest, result: &FieldMatchResult) -> Vec<String> {
    let mut failed = Vec::new();
    if !result.name_match {
        failed.push("name".to_string());
    }
    if !result.email_match {
        failed.push("email".to_string());
    }
    if !result.company_match {
        failed.push("company".to_string());
    }
    if !result.destination_match {
        failed.push(format!("destination ({})", request.destination));
    }
    if !result.phone_match {
        failed.push("phone number".to_string());
    }
    if result.age.is_none() {
        failed.push("age (expected format 'Age: XX')".to_string());
    }
    failed
}
