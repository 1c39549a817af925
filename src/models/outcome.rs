use serde::Serialize;

use crate::utils::VisaError;

/// One boolean per checked criterion, plus the age extracted from the
/// document text when the `Age: XX` pattern was found.
#[derive(Debug, Clone, Default)]
pub struct FieldMatchResult {
    pub name_match: bool,
    pub email_match: bool,
    pub company_match: bool,
    pub destination_match: bool,
    pub phone_match: bool,
    pub age: Option<u32>,
}

impl FieldMatchResult {
    pub fn all_passed(&self) -> bool {
        self.name_match
            && self.email_match
            && self.company_match
            && self.destination_match
            && self.phone_match
            && self.age.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Success,
    Mismatch,
    Error,
}

/// Terminal result of a verification attempt. Owns no resources; the stored
/// document is already cleaned up by the time this is returned.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    pub message: String,
    /// Names of the failed criteria; empty iff status is `Success`.
    pub failed_criteria: Vec<String>,
    pub age: Option<u32>,
    http_status: u16,
}

impl VerificationOutcome {
    pub fn success(age: u32) -> Self {
        VerificationOutcome {
            status: VerificationStatus::Success,
            message: format!(
                "Visa verified successfully (including destination, phone, and age). Extracted Age: {}",
                age
            ),
            failed_criteria: Vec::new(),
            age: Some(age),
            http_status: 200,
        }
    }

    pub fn mismatch(failed_criteria: Vec<String>, age: Option<u32>) -> Self {
        let message = if failed_criteria.is_empty() {
            "Visa details do not match required criteria.".to_string()
        } else {
            format!(
                "Visa details mismatch or required info not found. Check failed for: {}.",
                failed_criteria.join(", ")
            )
        };
        VerificationOutcome {
            status: VerificationStatus::Mismatch,
            message,
            failed_criteria,
            age,
            http_status: 403,
        }
    }

    pub fn from_error(err: &VisaError) -> Self {
        VerificationOutcome {
            status: VerificationStatus::Error,
            message: err.public_message(),
            failed_criteria: Vec::new(),
            age: None,
            http_status: err.http_status(),
        }
    }

    /// Status code the transport layer answers with. Mismatch is surfaced as
    /// 403 so the frontend can distinguish it from validation (400) and
    /// server-side (500) failures; errors keep the 400/500 split from
    /// `VisaError::http_status`.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }
}

/// JSON body returned to the caller. Mismatch serializes as `"error"`; the
/// HTTP status code is what tells the two apart on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_age: Option<u32>,
}

impl From<&VerificationOutcome> for VerificationResponse {
    fn from(outcome: &VerificationOutcome) -> Self {
        match outcome.status {
            VerificationStatus::Success => VerificationResponse {
                status: "success",
                message: outcome.message.clone(),
                extracted_age: outcome.age,
            },
            VerificationStatus::Mismatch | VerificationStatus::Error => VerificationResponse {
                status: "error",
                message: outcome.message.clone(),
                extracted_age: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome_carries_age() {
        let outcome = VerificationOutcome::success(34);
        assert_eq!(outcome.status, VerificationStatus::Success);
        assert_eq!(outcome.age, Some(34));
        assert!(outcome.failed_criteria.is_empty());
        assert!(outcome.message.contains("34"));
        assert_eq!(outcome.http_status(), 200);
    }

    #[test]
    fn test_mismatch_message_enumerates_failures() {
        let outcome = VerificationOutcome::mismatch(
            vec!["destination (Paris)".to_string(), "phone number".to_string()],
            Some(34),
        );
        assert_eq!(outcome.status, VerificationStatus::Mismatch);
        assert!(outcome.message.contains("destination (Paris)"));
        assert!(outcome.message.contains("phone number"));
        assert_eq!(outcome.http_status(), 403);
    }

    #[test]
    fn test_error_outcomes_keep_client_server_split() {
        let validation =
            VerificationOutcome::from_error(&VisaError::MissingFields(vec!["name".to_string()]));
        assert_eq!(validation.status, VerificationStatus::Error);
        assert_eq!(validation.http_status(), 400);

        let storage = VerificationOutcome::from_error(&VisaError::Storage("disk full".to_string()));
        assert_eq!(storage.http_status(), 500);
        assert_eq!(storage.message, "Failed to save uploaded file");
    }

    #[test]
    fn test_mismatch_serializes_as_error_status() {
        let outcome = VerificationOutcome::mismatch(vec!["name".to_string()], None);
        let response = VerificationResponse::from(&outcome);
        assert_eq!(response.status, "error");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("extracted_age").is_none());
    }

    #[test]
    fn test_success_serializes_extracted_age() {
        let outcome = VerificationOutcome::success(29);
        let json = serde_json::to_value(VerificationResponse::from(&outcome)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["extracted_age"], 29);
    }
}
